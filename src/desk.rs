//! Circulation desk: the single owner of all client state
//!
//! A front end turns user gestures into calls on [`Desk`] and renders
//! [`Desk::view`], the pending prompt and the current toast afterwards.

use std::sync::Arc;

use crate::{
    api::CatalogApi,
    config::NotificationConfig,
    error::{AppError, AppResult},
    models::{
        book::{Book, BookId},
        form::{BookForm, FormMode},
    },
    services::{
        catalog::delete_prompt,
        confirm::{ConfirmationGate, Prompt},
        filter::FilterState,
        loans::return_prompt,
        notify::Toast,
        surface, Services,
    },
    store::CatalogStore,
    view::CatalogView,
};

/// Action held by the confirmation gate until the user answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Return(BookId),
    Delete(BookId),
}

pub struct Desk {
    services: Services,
    store: CatalogStore,
    filter: FilterState,
    gate: ConfirmationGate<PendingAction>,
    form: Option<BookForm>,
    borrow_target: Option<BookId>,
}

impl Desk {
    pub fn new(api: Arc<dyn CatalogApi>, notifications: &NotificationConfig) -> Self {
        Self {
            services: Services::new(api.clone(), notifications),
            store: CatalogStore::new(api),
            filter: FilterState::default(),
            gate: ConfirmationGate::new(),
            form: None,
            borrow_target: None,
        }
    }

    /// Refetch the catalog; a failure is shown and the old snapshot kept
    pub async fn refresh(&mut self) -> AppResult<()> {
        self.store
            .load()
            .await
            .map(|_| ())
            .map_err(|e| surface(&self.services.notifier, e))
    }

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) -> CatalogView {
        self.filter.term = term.into();
        self.view()
    }

    pub fn set_category(&mut self, category: impl Into<String>) -> CatalogView {
        self.filter.category = category.into();
        self.view()
    }

    /// Current snapshot through the current filter
    pub fn view(&self) -> CatalogView {
        CatalogView::from_visible(&self.filter.project(self.store.books()))
    }

    pub fn toast(&self) -> Option<Toast> {
        self.services.notifier.current()
    }

    // Add/edit form

    pub fn open_add_form(&mut self) -> &BookForm {
        self.form.insert(BookForm::blank())
    }

    pub fn open_edit_form(&mut self, id: BookId) -> AppResult<&BookForm> {
        let Some(book) = self.store.find_by_id(id) else {
            return Err(surface(&self.services.notifier, AppError::NotFound(id)));
        };
        let form = BookForm::for_book(book);
        Ok(self.form.insert(form))
    }

    pub fn form(&self) -> Option<&BookForm> {
        self.form.as_ref()
    }

    pub fn close_form(&mut self) {
        self.form = None;
    }

    /// Submit the open form as a create or an update, depending on how it was
    /// opened. The form stays open, holding the input, unless the save succeeds.
    pub async fn submit_form(&mut self, title: &str, author: &str, category: &str) -> AppResult<Option<Book>> {
        let notifier = &self.services.notifier;
        let form = self
            .form
            .as_mut()
            .ok_or_else(|| surface(notifier, AppError::Validation("No book form is open".to_string())))?;

        form.title = title.to_string();
        form.author = author.to_string();
        form.category = category.to_string();
        let mode = form.mode;
        let draft = form.to_draft();

        // Required fields, as a form would check them before sending
        draft.check().map_err(|e| surface(notifier, e))?;

        let saved = match mode {
            FormMode::Add => self.services.catalog.create(&mut self.store, &draft).await?,
            FormMode::Edit(id) => self.services.catalog.update(&mut self.store, id, &draft).await?,
        };
        self.form = None;
        Ok(saved)
    }

    // Borrow form

    pub fn open_borrow(&mut self, id: BookId) {
        self.borrow_target = Some(id);
    }

    pub fn borrow_target(&self) -> Option<BookId> {
        self.borrow_target
    }

    pub fn close_borrow(&mut self) {
        self.borrow_target = None;
    }

    pub async fn submit_borrow(&mut self, borrower_name: &str) -> AppResult<Option<Book>> {
        let Some(id) = self.borrow_target else {
            let error = AppError::Validation("No book selected for borrowing".to_string());
            return Err(surface(&self.services.notifier, error));
        };

        let book = self.services.loans.borrow(&mut self.store, id, borrower_name).await?;
        self.borrow_target = None;
        Ok(book)
    }

    // Confirmation-gated actions

    pub fn request_return(&mut self, id: BookId) -> &Prompt {
        let Prompt { title, message } = return_prompt(&self.store, id);
        self.gate.request(title, message, PendingAction::Return(id))
    }

    pub fn request_delete(&mut self, id: BookId) -> &Prompt {
        let Prompt { title, message } = delete_prompt(&self.store, id);
        self.gate.request(title, message, PendingAction::Delete(id))
    }

    pub fn pending_prompt(&self) -> Option<&Prompt> {
        self.gate.prompt()
    }

    /// Run the pending action, if any. `None` when nothing was pending.
    pub async fn confirm(&mut self) -> Option<AppResult<()>> {
        let action = self.gate.confirm()?;
        let result = match action {
            PendingAction::Return(id) => self
                .services
                .loans
                .return_book(&mut self.store, id)
                .await
                .map(|_| ()),
            PendingAction::Delete(id) => self.services.catalog.remove(&mut self.store, id).await,
        };
        Some(result)
    }

    pub fn dismiss(&mut self) {
        self.gate.dismiss();
    }
}
