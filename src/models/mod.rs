//! Data models for Library Desk

pub mod book;
pub mod form;

// Re-export commonly used types
pub use book::{Book, BookDraft, BookId, BorrowRequest, LendingAction, LendingState};
pub use form::{BookForm, FormMode};
