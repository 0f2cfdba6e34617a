//! Confirmation Gate: a single-slot yes/no prompt guarding an action

/// Text shown to the user while a confirmation is pending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub message: String,
}

/// Holds at most one pending action.
///
/// `A` is whatever runs on confirmation: a closure, or a value naming the
/// action for the caller to dispatch. A new request replaces any pending one,
/// and resolving takes the action out so it can be released at most once.
#[derive(Debug)]
pub struct ConfirmationGate<A> {
    pending: Option<(Prompt, A)>,
}

impl<A> Default for ConfirmationGate<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmationGate<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, title: impl Into<String>, message: impl Into<String>, on_confirm: A) -> &Prompt {
        let prompt = Prompt {
            title: title.into(),
            message: message.into(),
        };
        if let Some((stale, _)) = self.pending.take() {
            tracing::debug!("Discarding pending confirmation '{}'", stale.title);
        }
        tracing::debug!("Confirmation requested: {}", prompt.message);

        &self.pending.insert((prompt, on_confirm)).0
    }

    pub fn prompt(&self) -> Option<&Prompt> {
        self.pending.as_ref().map(|(prompt, _)| prompt)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Clear the slot; the action is returned only when the user proceeds
    pub fn resolve(&mut self, proceed: bool) -> Option<A> {
        let (_, action) = self.pending.take()?;
        proceed.then_some(action)
    }

    pub fn confirm(&mut self) -> Option<A> {
        self.resolve(true)
    }

    /// Cancel silently; nothing runs
    pub fn dismiss(&mut self) {
        self.resolve(false);
    }
}
