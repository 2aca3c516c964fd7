//! bistro-core - Offline-first sync core for the Bistro restaurant app
//!
//! This crate contains the shared models, the local key-value store, the
//! remote API gateway, the reconciliation engine, and the outbox sync worker
//! used by all Bistro clients.

pub mod app;
pub mod config;
pub mod db;
pub mod error;
pub mod gateway;
pub mod models;
pub mod outbox;
pub mod reconcile;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::{App, MutationStatus, NullScheduler, SyncScheduler};
pub use config::AppConfig;
pub use db::LocalStore;
pub use error::{Error, Result};
pub use gateway::{HttpGateway, RestaurantApi};
pub use models::{OutboxChange, Restaurant, Review, ReviewDraft};
pub use outbox::{SyncReport, SYNC_TAG};
