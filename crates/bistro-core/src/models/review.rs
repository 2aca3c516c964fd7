//! Review model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::util::unix_timestamp_millis;

/// A restaurant review.
///
/// `id` is assigned by the server; a review queued locally carries `None`
/// until its replay is confirmed. Timestamps are Unix milliseconds and use
/// the wire's camelCase field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub restaurant_id: u32,
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub comments: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
    #[serde(rename = "updatedAt", default)]
    pub updated_at: i64,
}

/// User-entered review fields, before timestamps are stamped on.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub restaurant_id: u32,
    pub name: String,
    pub rating: u8,
    pub comments: String,
}

impl ReviewDraft {
    /// Validate the draft and stamp creation/update times.
    pub fn into_review(self) -> Result<Review> {
        if !(1..=5).contains(&self.rating) {
            return Err(Error::InvalidInput(format!(
                "rating must be between 1 and 5, got {}",
                self.rating
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::InvalidInput("reviewer name must not be empty".into()));
        }

        let now = unix_timestamp_millis();
        Ok(Review {
            id: None,
            restaurant_id: self.restaurant_id,
            name: self.name,
            rating: self.rating,
            comments: self.comments,
            created_at: now,
            updated_at: now,
        })
    }
}
