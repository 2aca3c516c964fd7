//! Outbox change records for offline mutations.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Review;

/// A review waiting to be replayed against the remote API.
///
/// `client_id` is generated locally before the first replay attempt and is
/// the dedup key for partial-failure retries: once a review has been posted
/// its entry is removed from the change by `client_id`, so a later retry of
/// the same change never resubmits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReview {
    pub client_id: Uuid,
    pub review: Review,
}

impl PendingReview {
    #[must_use]
    pub fn new(review: Review) -> Self {
        Self {
            client_id: Uuid::now_v7(),
            review,
        }
    }
}

/// Pending local divergence from the last known remote state of one
/// restaurant.
///
/// At most one record exists per restaurant; later edits merge into it.
/// Presence of a record means the restaurant's local state has diverged,
/// and the record is deleted only after a confirmed replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboxChange {
    pub restaurant_id: u32,
    /// Favorite flag override, replacing whatever the base state says
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Unsynced reviews in the order they were queued
    #[serde(default)]
    pub reviews: Vec<PendingReview>,
}

impl OutboxChange {
    #[must_use]
    pub const fn new(restaurant_id: u32) -> Self {
        Self {
            restaurant_id,
            favorite: None,
            reviews: Vec::new(),
        }
    }

    /// Record a favorite toggle; the latest toggle wins.
    pub fn set_favorite(&mut self, favorite: bool) {
        self.favorite = Some(favorite);
    }

    /// Queue a review behind any already-pending ones.
    pub fn push_review(&mut self, review: Review) {
        self.reviews.push(PendingReview::new(review));
    }

    /// Drop a pending review once its replay is confirmed.
    pub fn remove_review(&mut self, client_id: Uuid) {
        self.reviews.retain(|pending| pending.client_id != client_id);
    }

    /// True once every queued piece has been replayed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorite.is_none() && self.reviews.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn review(restaurant_id: u32, name: &str) -> Review {
        Review {
            id: None,
            restaurant_id,
            name: name.to_string(),
            rating: 4,
            comments: String::new(),
            created_at: 1,
            updated_at: 1,
        }
    }

    #[test]
    fn later_edits_merge_into_one_record() {
        let mut change = OutboxChange::new(5);
        change.set_favorite(true);
        change.push_review(review(5, "Ana"));
        change.set_favorite(false);
        change.push_review(review(5, "Ben"));

        assert_eq!(change.favorite, Some(false));
        assert_eq!(change.reviews.len(), 2);
        assert_eq!(change.reviews[0].review.name, "Ana");
        assert_eq!(change.reviews[1].review.name, "Ben");
    }

    #[test]
    fn remove_review_keeps_queue_order() {
        let mut change = OutboxChange::new(5);
        change.push_review(review(5, "Ana"));
        change.push_review(review(5, "Ben"));
        change.push_review(review(5, "Cleo"));

        let second = change.reviews[1].client_id;
        change.remove_review(second);

        let names: Vec<&str> = change
            .reviews
            .iter()
            .map(|pending| pending.review.name.as_str())
            .collect();
        assert_eq!(names, vec!["Ana", "Cleo"]);
    }

    #[test]
    fn empty_only_after_all_pieces_clear() {
        let mut change = OutboxChange::new(5);
        assert!(change.is_empty());

        change.set_favorite(true);
        change.push_review(review(5, "Ana"));
        assert!(!change.is_empty());

        let queued = change.reviews[0].client_id;
        change.remove_review(queued);
        assert!(!change.is_empty());

        change.favorite = None;
        assert!(change.is_empty());
    }
}
