//! Toast notifications with timed dismissal

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

#[derive(Default)]
struct Slot {
    toast: Option<Toast>,
    /// Bumped for every toast so an outdated timer cannot hide a newer one
    generation: u64,
    dismiss: Option<JoinHandle<()>>,
}

/// Shows one toast at a time.
///
/// Showing a new toast replaces the visible one and reschedules its
/// dismissal; the previous timer is aborted. Must be used inside a tokio
/// runtime.
#[derive(Clone)]
pub struct Notifier {
    slot: Arc<Mutex<Slot>>,
    duration: Duration,
}

impl Notifier {
    pub fn new(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            duration,
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(message.into(), ToastKind::Success);
    }

    pub fn error(&self, error: &AppError) {
        self.show(error.to_string(), ToastKind::Error);
    }

    pub fn show(&self, message: String, kind: ToastKind) {
        match kind {
            ToastKind::Success => tracing::info!("Toast: {}", message),
            ToastKind::Error => tracing::warn!("Toast: {}", message),
        }

        let mut slot = self.lock();
        if let Some(previous) = slot.dismiss.take() {
            previous.abort();
        }
        slot.generation += 1;
        slot.toast = Some(Toast { message, kind });

        let generation = slot.generation;
        let shared = Arc::clone(&self.slot);
        let duration = self.duration;
        slot.dismiss = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let mut slot = shared.lock().unwrap_or_else(PoisonError::into_inner);
            if slot.generation == generation {
                slot.toast = None;
                slot.dismiss = None;
            }
        }));
    }

    /// The visible toast, if any
    pub fn current(&self) -> Option<Toast> {
        self.lock().toast.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
