//! Filter Projection: free-text term and category over a snapshot

use crate::models::book::Book;

/// Transient search state; an empty category means "all categories"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub term: String,
    pub category: String,
}

impl FilterState {
    pub fn project<'a>(&self, snapshot: &'a [Book]) -> Vec<&'a Book> {
        project(snapshot, &self.term, &self.category)
    }

    pub fn is_active(&self) -> bool {
        !self.term.is_empty() || !self.category.is_empty()
    }
}

/// Books whose title or author contains `term` (ignoring case) and whose
/// category equals `category` exactly, in snapshot order.
///
/// A book without a category never matches a concrete category.
pub fn project<'a>(snapshot: &'a [Book], term: &str, category: &str) -> Vec<&'a Book> {
    let term = term.to_lowercase();
    snapshot
        .iter()
        .filter(|book| matches(book, &term, category))
        .collect()
}

/// `term` must already be lowercase
fn matches(book: &Book, term: &str, category: &str) -> bool {
    let matches_term =
        book.title.to_lowercase().contains(term) || book.author.to_lowercase().contains(term);
    let matches_category = category.is_empty() || book.category.as_deref() == Some(category);
    matches_term && matches_category
}
