//! Catalog Mutator: create, update and delete catalog entries

use std::sync::Arc;

use crate::{
    api::CatalogApi,
    error::AppResult,
    models::book::{Book, BookDraft, BookId},
    store::CatalogStore,
};

use super::{confirm::Prompt, notify::Notifier, reload_and_notify, surface};

#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
    notifier: Notifier,
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Create a book. Any `id` on the draft is dropped. Returns the created
    /// book when the service echoes it back.
    pub async fn create(&self, store: &mut CatalogStore, draft: &BookDraft) -> AppResult<Option<Book>> {
        let draft = BookDraft { id: None, ..draft.clone() };
        let created = self
            .api
            .create_book(&draft)
            .await
            .map_err(|e| surface(&self.notifier, e))?;

        match &created {
            Some(book) => tracing::info!("Catalog create: book id={} '{}'", book.id, book.title),
            None => tracing::info!("Catalog create: '{}'", draft.title),
        }
        reload_and_notify(store, &self.notifier, "Book Added").await;
        Ok(created)
    }

    /// Replace title, author and category of an existing book
    pub async fn update(
        &self,
        store: &mut CatalogStore,
        id: BookId,
        draft: &BookDraft,
    ) -> AppResult<Option<Book>> {
        let draft = draft.clone().with_id(id);
        let updated = self
            .api
            .update_book(id, &draft)
            .await
            .map_err(|e| surface(&self.notifier, e))?;

        tracing::info!("Catalog update: book id={}", id);
        reload_and_notify(store, &self.notifier, "Book Updated").await;
        Ok(updated)
    }

    /// Delete a book. Call only once the delete prompt has been confirmed.
    ///
    /// Whether a borrowed book may be deleted is the catalog service's call.
    pub async fn remove(&self, store: &mut CatalogStore, id: BookId) -> AppResult<()> {
        self.api
            .delete_book(id)
            .await
            .map_err(|e| surface(&self.notifier, e))?;

        tracing::info!("Catalog delete: book id={}", id);
        reload_and_notify(store, &self.notifier, "Book deleted").await;
        Ok(())
    }
}

/// Confirmation shown before deleting; falls back to a generic message when
/// the book is no longer in the snapshot
pub fn delete_prompt(store: &CatalogStore, id: BookId) -> Prompt {
    let message = match store.find_by_id(id) {
        Some(book) => format!("Delete '{}' permanently?", book.title),
        None => "Delete this book?".to_string(),
    };
    Prompt {
        title: "Confirm Delete".to_string(),
        message,
    }
}
