//! Library Desk
//!
//! Client for a library catalog service: lists books, creates, edits and
//! deletes catalog entries, and drives the borrow/return cycle of each copy.
//! Every accepted change is followed by a full refetch of the catalog.

pub mod api;
pub mod cli;
pub mod config;
pub mod desk;
pub mod error;
pub mod models;
pub mod services;
pub mod store;
pub mod view;

pub use config::AppConfig;
pub use desk::Desk;
pub use error::{AppError, AppResult};
