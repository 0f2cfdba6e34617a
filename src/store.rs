//! Catalog Store: the last-fetched snapshot of all books

use std::sync::Arc;

use crate::{
    api::CatalogApi,
    error::AppResult,
    models::book::{Book, BookId},
};

/// Holds the snapshot as of the last successful load.
///
/// Only [`CatalogStore::load`] replaces it, and it does so with a single swap,
/// so readers never see a partial list.
pub struct CatalogStore {
    api: Arc<dyn CatalogApi>,
    books: Vec<Book>,
}

impl CatalogStore {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self {
            api,
            books: Vec::new(),
        }
    }

    /// Refetch the whole catalog. On failure the previous snapshot stays.
    pub async fn load(&mut self) -> AppResult<&[Book]> {
        let books = self.api.list_books().await?;

        for book in books.iter().filter(|b| !b.is_consistent()) {
            tracing::warn!(
                "Book id={} has inconsistent lending state (available={}, borrowed_by={:?})",
                book.id,
                book.available,
                book.borrowed_by
            );
        }

        tracing::info!("Catalog loaded: {} books", books.len());
        self.books = books;
        Ok(&self.books)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find_by_id(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
