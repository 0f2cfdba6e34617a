//! Catalog service API
//!
//! [`CatalogApi`] is the seam to the remote `/books` resource. The HTTP
//! implementation lives in [`http`]; tests substitute a mock.

pub mod http;

use async_trait::async_trait;

use crate::{
    error::AppResult,
    models::book::{Book, BookDraft, BookId, BorrowRequest},
};

pub use http::HttpCatalogApi;

/// Fallback messages when a failure body carries none
pub const FETCH_FAILED: &str = "Failed to fetch books";
pub const SAVE_FAILED: &str = "Action failed";
pub const DELETE_FAILED: &str = "Failed to delete";
pub const BORROW_FAILED: &str = "Borrowing failed";
pub const RETURN_FAILED: &str = "Return failed";

/// REST contract of the catalog service.
///
/// Any non-2xx answer is an error: `Fetch` for the listing, `Conflict` with the
/// resolved user message for every mutation. A 2xx answer to a mutation is
/// success whatever its body holds; the echoed book is `None` when the body is
/// empty or not a book.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /books`
    async fn list_books(&self) -> AppResult<Vec<Book>>;

    /// `POST /books`
    async fn create_book(&self, draft: &BookDraft) -> AppResult<Option<Book>>;

    /// `PUT /books/{id}`
    async fn update_book(&self, id: BookId, draft: &BookDraft) -> AppResult<Option<Book>>;

    /// `DELETE /books/{id}`
    async fn delete_book(&self, id: BookId) -> AppResult<()>;

    /// `PUT /books/{id}/borrow`
    async fn borrow_book(&self, id: BookId, request: &BorrowRequest) -> AppResult<Option<Book>>;

    /// `PUT /books/{id}/return`
    async fn return_book(&self, id: BookId) -> AppResult<Option<Book>>;
}
