//! Book (catalog entry) model and lending state

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Identifier assigned by the catalog service
pub type BookId = i64;

/// Category label shown on a card when a book has none
pub const DISPLAY_DEFAULT_CATEGORY: &str = "General";

/// Category prefilled in the edit form when a book has none
pub const FORM_DEFAULT_CATEGORY: &str = "Fiction";

/// Borrower label shown when a checked-out book carries no name
pub const UNKNOWN_BORROWER: &str = "Unknown";

/// Book as listed by the catalog service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub borrowed_by: Option<String>,
}

impl Book {
    pub fn lending_state(&self) -> LendingState {
        if self.available {
            LendingState::Available
        } else {
            LendingState::Borrowed(
                self.borrowed_by
                    .clone()
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| UNKNOWN_BORROWER.to_string()),
            )
        }
    }

    /// `available == false` exactly when a non-empty borrower is recorded
    pub fn is_consistent(&self) -> bool {
        let has_borrower = self.borrowed_by.as_deref().is_some_and(|b| !b.is_empty());
        self.available != has_borrower
    }

    pub fn display_category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => DISPLAY_DEFAULT_CATEGORY,
        }
    }

    pub fn form_category(&self) -> &str {
        match self.category.as_deref() {
            Some(c) if !c.is_empty() => c,
            _ => FORM_DEFAULT_CATEGORY,
        }
    }
}

/// Lending state of a single copy: a single-holder lock.
///
/// The catalog service owns the authoritative state; the client only uses this
/// to decide which action to offer and to pre-check a borrow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LendingState {
    Available,
    Borrowed(String),
}

/// Lending action offered for a book
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LendingAction {
    Borrow,
    Return,
}

impl LendingState {
    pub fn offered_action(&self) -> LendingAction {
        match self {
            LendingState::Available => LendingAction::Borrow,
            LendingState::Borrowed(_) => LendingAction::Return,
        }
    }

    pub fn borrower(&self) -> Option<&str> {
        match self {
            LendingState::Available => None,
            LendingState::Borrowed(name) => Some(name),
        }
    }
}

/// Create/update payload. `id` is `None` for a book not yet created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BookDraft {
    pub id: Option<BookId>,
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub category: String,
}

impl BookDraft {
    pub fn new(title: impl Into<String>, author: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: author.into(),
            category: category.into(),
        }
    }

    pub fn with_id(mut self, id: BookId) -> Self {
        self.id = Some(id);
        self
    }

    /// Required fields, reported title first
    pub fn check(&self) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::from_validation(e, &["title", "author"]))
    }
}

/// Body of `PUT /books/{id}/borrow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRequest {
    #[validate(length(min = 1, message = "Borrower name is required"))]
    pub borrower_name: String,
}

impl BorrowRequest {
    pub fn new(borrower_name: &str) -> Self {
        Self {
            borrower_name: borrower_name.trim().to_string(),
        }
    }
}
