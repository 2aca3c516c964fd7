//! Outbox sync worker: drains queued mutations against the remote API and
//! folds confirmed results back into the local store.

use crate::db::LocalStore;
use crate::error::{Error, Result};
use crate::gateway::RestaurantApi;
use crate::models::{OutboxChange, Restaurant};

/// Tag under which the platform background-sync capability is asked to
/// invoke a drain when connectivity returns.
pub const SYNC_TAG: &str = "sync-outbox";

/// Outcome of one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub applied: usize,
    pub failed: usize,
}

/// Drain every pending change, strictly sequentially in queue order.
///
/// A failed change stays queued (minus any pieces that were confirmed before
/// the failure) and the pass moves on to the next one; the run then reports
/// [`Error::SyncIncomplete`] without losing queued data. Delivery is
/// at-least-once per piece, and folding results into the store is idempotent.
pub async fn drain_outbox<G: RestaurantApi>(store: &LocalStore, gateway: &G) -> Result<SyncReport> {
    let changes = store.get_all_changes()?;
    let mut report = SyncReport::default();

    for change in changes {
        let id = change.restaurant_id;
        match replay_change(store, gateway, change).await {
            Ok(()) => {
                tracing::debug!("Outbox change for restaurant {id} fully applied");
                report.applied += 1;
            }
            Err(error) => {
                tracing::warn!("Replay for restaurant {id} failed, change stays queued: {error}");
                report.failed += 1;
            }
        }
    }

    if report.failed > 0 {
        Err(Error::SyncIncomplete {
            applied: report.applied,
            failed: report.failed,
        })
    } else {
        Ok(report)
    }
}

/// Replay just one restaurant's pending change, if there is one.
///
/// Used by the eager-attempt path when background-sync registration is
/// unavailable. Returns `false` when nothing was pending.
pub async fn replay_restaurant<G: RestaurantApi>(
    store: &LocalStore,
    gateway: &G,
    id: u32,
) -> Result<bool> {
    match store.get_change(id)? {
        Some(change) => replay_change(store, gateway, change).await.map(|()| true),
        None => Ok(false),
    }
}

async fn replay_change<G: RestaurantApi>(
    store: &LocalStore,
    gateway: &G,
    mut change: OutboxChange,
) -> Result<()> {
    let id = change.restaurant_id;
    let mut restaurant = store.get(id)?.unwrap_or_else(|| Restaurant::shell(id));

    let pieces_before = pending_pieces(&change);
    let outcome = apply_pieces(store, gateway, &mut change, &mut restaurant).await;

    // Persist whatever was confirmed, whether or not the whole change made
    // it; a replay that applied nothing leaves the cache untouched.
    if pending_pieces(&change) < pieces_before {
        store.put(&restaurant)?;
    }
    match outcome {
        Ok(()) => store.delete_change(id),
        Err(error) => Err(error),
    }
}

fn pending_pieces(change: &OutboxChange) -> usize {
    change.reviews.len() + usize::from(change.favorite.is_some())
}

/// Apply a change piece by piece: queued reviews first, in queue order, then
/// the favorite override.
///
/// Each confirmed piece is removed from the change record and the trimmed
/// record is persisted before the next remote call, so a retry after a
/// partial failure resubmits only the pieces that never made it.
async fn apply_pieces<G: RestaurantApi>(
    store: &LocalStore,
    gateway: &G,
    change: &mut OutboxChange,
    restaurant: &mut Restaurant,
) -> Result<()> {
    while let Some(pending) = change.reviews.first().cloned() {
        let confirmed = gateway.post_review(&pending.review).await?;
        restaurant.reviews.push(confirmed);
        change.remove_review(pending.client_id);
        store.put_change(change)?;
    }

    if let Some(favorite) = change.favorite {
        let updated = gateway.set_favorite(change.restaurant_id, favorite).await?;
        restaurant.is_favorite = updated.is_favorite;
        change.favorite = None;
        store.put_change(change)?;
    }

    Ok(())
}
