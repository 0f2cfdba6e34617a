//! Add/edit form state

use super::book::{Book, BookDraft, BookId};

/// Whether the form creates a new book or edits an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Add,
    Edit(BookId),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookForm {
    pub mode: FormMode,
    pub title: String,
    pub author: String,
    pub category: String,
}

impl BookForm {
    pub fn blank() -> Self {
        Self {
            mode: FormMode::Add,
            title: String::new(),
            author: String::new(),
            category: String::new(),
        }
    }

    /// Prefill from a listed book; a missing category becomes "Fiction"
    pub fn for_book(book: &Book) -> Self {
        Self {
            mode: FormMode::Edit(book.id),
            title: book.title.clone(),
            author: book.author.clone(),
            category: book.form_category().to_string(),
        }
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add New Book",
            FormMode::Edit(_) => "Edit Book",
        }
    }

    /// Payload for the service, with surrounding whitespace removed
    pub fn to_draft(&self) -> BookDraft {
        let draft = BookDraft::new(self.title.trim(), self.author.trim(), self.category.trim());
        match self.mode {
            FormMode::Add => draft,
            FormMode::Edit(id) => draft.with_id(id),
        }
    }
}
