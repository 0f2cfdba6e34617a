//! Client-side services

pub mod catalog;
pub mod confirm;
pub mod filter;
pub mod loans;
pub mod notify;

use std::sync::Arc;

use crate::{api::CatalogApi, config::NotificationConfig, error::AppError, store::CatalogStore};

use notify::Notifier;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
    pub notifier: Notifier,
}

impl Services {
    /// Create all services talking to the given catalog API
    pub fn new(api: Arc<dyn CatalogApi>, notifications: &NotificationConfig) -> Self {
        let notifier = Notifier::new(notifications.toast_duration());
        Self {
            catalog: catalog::CatalogService::new(api.clone(), notifier.clone()),
            loans: loans::LoansService::new(api, notifier.clone()),
            notifier,
        }
    }
}

/// Success path shared by every accepted mutation: announce it, then refetch
/// the whole catalog instead of patching the snapshot.
///
/// A failed refetch replaces the success toast with the fetch error but does
/// not undo the mutation, which the service already accepted.
pub(crate) async fn reload_and_notify(store: &mut CatalogStore, notifier: &Notifier, message: &str) {
    notifier.success(message);
    if let Err(e) = store.load().await {
        tracing::warn!("Reload after mutation failed: {}", e);
        notifier.error(&e);
    }
}

/// Failure path: surface the error and hand it back to the caller unchanged
pub(crate) fn surface(notifier: &Notifier, error: AppError) -> AppError {
    notifier.error(&error);
    error
}
