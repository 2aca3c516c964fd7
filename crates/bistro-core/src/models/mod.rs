//! Data models shared across the store, gateway, and sync layers.

mod outbox;
mod restaurant;
mod review;

pub use outbox::{OutboxChange, PendingReview};
pub use restaurant::{LatLng, Restaurant};
pub use review::{Review, ReviewDraft};
