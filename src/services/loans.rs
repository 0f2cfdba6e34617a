//! Lending State Machine: borrow and return of a single copy
//!
//! The catalog service holds the authoritative lock. The client checks what it
//! can from its snapshot before sending anything, then reloads on acceptance.

use std::sync::Arc;

use validator::Validate;

use crate::{
    api::CatalogApi,
    error::{AppError, AppResult},
    models::book::{Book, BookId, BorrowRequest, LendingState},
    store::CatalogStore,
};

use super::{confirm::Prompt, notify::Notifier, reload_and_notify, surface};

#[derive(Clone)]
pub struct LoansService {
    api: Arc<dyn CatalogApi>,
    notifier: Notifier,
}

impl LoansService {
    pub fn new(api: Arc<dyn CatalogApi>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Borrow an available book for `borrower_name`
    pub async fn borrow(&self, store: &mut CatalogStore, id: BookId, borrower_name: &str) -> AppResult<Option<Book>> {
        let request = BorrowRequest::new(borrower_name);
        self.check_borrow(store, id, &request)
            .map_err(|e| surface(&self.notifier, e))?;

        let book = self
            .api
            .borrow_book(id, &request)
            .await
            .map_err(|e| surface(&self.notifier, e))?;

        tracing::info!("Loan: book id={} borrowed by {}", id, request.borrower_name);
        reload_and_notify(store, &self.notifier, "Book Borrowed!").await;
        Ok(book)
    }

    /// Return a borrowed book. Call only once the return prompt has been
    /// confirmed; the snapshot is not consulted, the service decides.
    pub async fn return_book(&self, store: &mut CatalogStore, id: BookId) -> AppResult<Option<Book>> {
        let book = self
            .api
            .return_book(id)
            .await
            .map_err(|e| surface(&self.notifier, e))?;

        tracing::info!("Loan: book id={} returned", id);
        reload_and_notify(store, &self.notifier, "Book Returned!").await;
        Ok(book)
    }

    fn check_borrow(&self, store: &CatalogStore, id: BookId, request: &BorrowRequest) -> AppResult<()> {
        request.validate()?;

        let book = store.find_by_id(id).ok_or(AppError::NotFound(id))?;
        match book.lending_state() {
            LendingState::Available => Ok(()),
            LendingState::Borrowed(holder) => Err(AppError::Conflict(format!(
                "Book is already borrowed by: {}",
                holder
            ))),
        }
    }
}

/// Confirmation shown before returning; falls back to a generic message when
/// the book is no longer in the snapshot
pub fn return_prompt(store: &CatalogStore, id: BookId) -> Prompt {
    let message = match store.find_by_id(id) {
        Some(book) => format!("Are you sure you want to return '{}'?", book.title),
        None => "Return this book?".to_string(),
    };
    Prompt {
        title: "Confirm Return".to_string(),
        message,
    }
}
