//! Render-ready view of the filtered catalog

use crate::models::book::{Book, BookId, LendingAction, LendingState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Available,
    CheckedOut { borrower: String },
}

impl CardStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CardStatus::Available => "Available",
            CardStatus::CheckedOut { .. } => "Checked Out",
        }
    }
}

/// One book as displayed. Edit and delete are always offered; the lending
/// action depends on the book's state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub category: String,
    pub status: CardStatus,
    pub action: LendingAction,
}

impl From<&Book> for BookCard {
    fn from(book: &Book) -> Self {
        let state = book.lending_state();
        let action = state.offered_action();
        let status = match state {
            LendingState::Available => CardStatus::Available,
            LendingState::Borrowed(borrower) => CardStatus::CheckedOut { borrower },
        };

        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.display_category().to_string(),
            status,
            action,
        }
    }
}

/// Either the visible cards or the explicit empty-state indicator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogView {
    Empty,
    Cards(Vec<BookCard>),
}

impl CatalogView {
    pub fn from_visible(visible: &[&Book]) -> Self {
        if visible.is_empty() {
            CatalogView::Empty
        } else {
            CatalogView::Cards(visible.iter().map(|b| BookCard::from(*b)).collect())
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CatalogView::Empty)
    }
}
