//! UI-facing application surface.
//!
//! This is the seam the rendering layer calls into: reconciled reads, queued
//! mutations, and the sync trigger wiring.

use std::sync::Arc;

use crate::db::LocalStore;
use crate::error::{Error, Result};
use crate::gateway::RestaurantApi;
use crate::models::{OutboxChange, Restaurant, Review, ReviewDraft};
use crate::outbox::{self, SyncReport, SYNC_TAG};
use crate::reconcile::Reconciler;

/// Platform capability that invokes an outbox drain, by tag, when
/// connectivity is regained.
pub trait SyncScheduler {
    fn register(&self, tag: &str) -> Result<()>;
}

/// Scheduler for environments without background sync. Registration always
/// fails, so every mutation falls through to the eager immediate attempt.
pub struct NullScheduler;

impl SyncScheduler for NullScheduler {
    fn register(&self, _tag: &str) -> Result<()> {
        Err(Error::SyncUnsupported)
    }
}

/// How a mutation was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationStatus {
    /// Durably queued, not yet confirmed; replays on the next sync trigger
    Queued,
    /// The eager attempt already confirmed it against the remote
    Confirmed,
    /// Storage was unavailable and the immediate attempt failed, so the
    /// change could not be kept anywhere
    Dropped,
}

enum EagerOp {
    Favorite(bool),
    Review(Review),
}

/// Offline-first application core: one store handle, one gateway, one
/// scheduler, shared by every operation.
pub struct App<G, S> {
    store: Arc<LocalStore>,
    gateway: G,
    scheduler: S,
}

impl<G: RestaurantApi, S: SyncScheduler> App<G, S> {
    pub const fn new(store: Arc<LocalStore>, gateway: G, scheduler: S) -> Self {
        Self {
            store,
            gateway,
            scheduler,
        }
    }

    fn reconciler(&self) -> Reconciler<'_, G> {
        Reconciler::new(&self.store, &self.gateway)
    }

    /// Reconciled view of all restaurants.
    pub async fn fetch_restaurants(&self) -> Vec<Restaurant> {
        self.reconciler().restaurants().await
    }

    /// Reconciled view of one restaurant; `None` means nothing known.
    pub async fn fetch_restaurant_by_id(&self, id: u32) -> Option<Restaurant> {
        self.reconciler().restaurant(id).await
    }

    /// Reconciled restaurants filtered by cuisine and neighborhood
    /// (`"all"` is a wildcard).
    pub async fn fetch_restaurant_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Vec<Restaurant> {
        self.reconciler()
            .by_cuisine_and_neighborhood(cuisine, neighborhood)
            .await
    }

    /// Distinct neighborhoods in first-occurrence order.
    pub async fn fetch_neighborhoods(&self) -> Vec<String> {
        self.reconciler().neighborhoods().await
    }

    /// Distinct cuisines in first-occurrence order.
    pub async fn fetch_cuisines(&self) -> Vec<String> {
        self.reconciler().cuisines().await
    }

    /// Queue a favorite toggle and trigger a sync attempt.
    pub async fn toggle_favorite(&self, id: u32, favorite: bool) -> Result<MutationStatus> {
        let mut change = self
            .store
            .get_change(id)?
            .unwrap_or_else(|| OutboxChange::new(id));
        change.set_favorite(favorite);
        self.store.put_change(&change)?;

        Ok(self.schedule_or_attempt(id, EagerOp::Favorite(favorite)).await)
    }

    /// Validate, queue, and trigger a sync attempt for a new review.
    pub async fn submit_review(&self, draft: ReviewDraft) -> Result<MutationStatus> {
        let review = draft.into_review()?;
        let id = review.restaurant_id;

        let mut change = self
            .store
            .get_change(id)?
            .unwrap_or_else(|| OutboxChange::new(id));
        change.push_review(review.clone());
        self.store.put_change(&change)?;

        Ok(self.schedule_or_attempt(id, EagerOp::Review(review)).await)
    }

    /// Drain the whole outbox now (manual retry / background-sync callback).
    pub async fn sync_outbox(&self) -> Result<SyncReport> {
        outbox::drain_outbox(&self.store, &self.gateway).await
    }

    /// Pending outbox changes in drain order.
    pub fn pending_changes(&self) -> Result<Vec<OutboxChange>> {
        self.store.get_all_changes()
    }

    /// Ask the platform to drain later; when that is unsupported, attempt
    /// the change right away.
    async fn schedule_or_attempt(&self, id: u32, op: EagerOp) -> MutationStatus {
        match self.scheduler.register(SYNC_TAG) {
            Ok(()) => MutationStatus::Queued,
            Err(error) => {
                tracing::debug!("Background sync unavailable ({error}); attempting eager replay");
                self.eager_attempt(id, op).await
            }
        }
    }

    /// Best-effort immediate attempt. With a working store this replays the
    /// queued change (so a partial success is trimmed, never resubmitted);
    /// with storage unavailable it degrades to a direct gateway call, since
    /// there is no queue to replay.
    async fn eager_attempt(&self, id: u32, op: EagerOp) -> MutationStatus {
        if !self.store.is_disabled() {
            return match outbox::replay_restaurant(&self.store, &self.gateway, id).await {
                Ok(_) => MutationStatus::Confirmed,
                Err(error) => {
                    tracing::debug!("Eager replay failed, change stays queued: {error}");
                    MutationStatus::Queued
                }
            };
        }

        let result = match op {
            EagerOp::Favorite(flag) => self.gateway.set_favorite(id, flag).await.map(|_| ()),
            EagerOp::Review(review) => self.gateway.post_review(&review).await.map(|_| ()),
        };
        match result {
            Ok(()) => MutationStatus::Confirmed,
            Err(error) => {
                tracing::warn!("Immediate attempt failed with storage unavailable; change lost: {error}");
                MutationStatus::Dropped
            }
        }
    }
}
