//! Error types for Library Desk
//!
//! Every variant renders as a single line suitable for a toast notification.

use serde::Deserialize;
use thiserror::Error;

use crate::models::book::BookId;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Transport failure, or the catalog listing answered with a non-2xx status
    #[error("{0}")]
    Fetch(String),

    /// The catalog service rejected a state-changing request
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Validation(String),

    #[error("Book not found with id: {0}")]
    NotFound(BookId),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl AppError {
    /// True when the catalog service (not the client) refused the action
    pub fn is_rejection(&self) -> bool {
        matches!(self, AppError::Conflict(_))
    }
}

impl AppError {
    /// First validation message, taking fields in `field_order` first and any
    /// others after them by name
    pub fn from_validation(errors: validator::ValidationErrors, field_order: &[&str]) -> Self {
        let rank = |field: &str| {
            field_order
                .iter()
                .position(|f| *f == field)
                .unwrap_or(field_order.len())
        };
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| rank(&a.0).cmp(&rank(&b.0)).then_with(|| a.0.cmp(&b.0)));

        let message = fields
            .iter()
            .flat_map(|(_, errs)| errs.iter())
            .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .unwrap_or_else(|| "Invalid input".to_string());

        AppError::Validation(message)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::from_validation(errors, &[])
    }
}

/// Failure body sent by the catalog service on non-2xx responses.
///
/// Anything that is not a JSON object decodes as the empty body.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    pub message: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ErrorBody {
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        serde_json::from_str(raw).unwrap_or_default()
    }

    /// The `message` field as text; a non-string value is shown as JSON
    fn message_text(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(m) if m.is_empty() => None,
            serde_json::Value::String(m) => Some(m.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Message to show the user: the `message` field, else `fallback`
    pub fn message_or(&self, fallback: &str) -> String {
        self.message_text().unwrap_or_else(|| fallback.to_string())
    }

    /// Like [`ErrorBody::message_or`], but a body without `message` that still
    /// carries fields (e.g. a per-field validation map) is shown as JSON text
    pub fn message_or_json(&self, fallback: &str) -> String {
        match self.message_text() {
            Some(m) => m,
            None if !self.extra.is_empty() => serde_json::to_string(&self.extra)
                .unwrap_or_else(|_| fallback.to_string()),
            None => fallback.to_string(),
        }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
