//! Local persistence layer: keyed stores for restaurant snapshots and the
//! mutation outbox.

mod migrations;
mod store;

pub use store::LocalStore;
