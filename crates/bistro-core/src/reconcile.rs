//! Reconciliation engine: merges the local cache, pending outbox changes,
//! and remote fetch results into one best-known view.

use std::collections::HashMap;

use crate::db::LocalStore;
use crate::gateway::RestaurantApi;
use crate::models::{OutboxChange, Restaurant};

/// Wildcard value accepted by the cuisine/neighborhood filter.
pub const ANY: &str = "all";

/// Answers "what is the best-known state of restaurant X right now".
///
/// Local read and remote fetch are issued concurrently, but the decision
/// waits for the remote to settle: a fulfilled remote result is always the
/// base (and refreshes the cache), the local value is used only on remote
/// rejection, and a store failure counts as a cache miss. Pending outbox
/// changes are overlaid on whichever base was selected.
pub struct Reconciler<'a, G> {
    store: &'a LocalStore,
    gateway: &'a G,
}

impl<'a, G: RestaurantApi> Reconciler<'a, G> {
    pub const fn new(store: &'a LocalStore, gateway: &'a G) -> Self {
        Self { store, gateway }
    }

    /// Reconciled view of every known restaurant.
    ///
    /// Unreachable remote plus an empty cache yields an empty list, not an
    /// error.
    pub async fn restaurants(&self) -> Vec<Restaurant> {
        let (local, remote) = tokio::join!(async { self.store.get_all() }, self.gateway.fetch_all());

        let local = local.unwrap_or_else(|error| {
            tracing::warn!("Local read failed, treating as cache miss: {error}");
            Vec::new()
        });

        let base = match remote {
            Ok(fetched) => {
                if let Err(error) = self.store.put_all(&fetched) {
                    tracing::warn!("Cache refresh failed: {error}");
                }
                fetched
            }
            Err(error) => {
                tracing::debug!("Remote fetch failed, serving cached data: {error}");
                local
            }
        };

        self.overlay_all(base)
    }

    /// Reconciled view of one restaurant; `None` means nothing is known.
    pub async fn restaurant(&self, id: u32) -> Option<Restaurant> {
        let (local, remote) =
            tokio::join!(async { self.store.get(id) }, self.gateway.fetch_one(id));

        let local = local.unwrap_or_else(|error| {
            tracing::warn!("Local read failed, treating as cache miss: {error}");
            None
        });

        let base = match remote {
            Ok(fetched) => {
                if let Err(error) = self.store.put(&fetched) {
                    tracing::warn!("Cache refresh failed: {error}");
                }
                Some(fetched)
            }
            Err(error) => {
                tracing::debug!("Remote fetch failed, serving cached data: {error}");
                local
            }
        };

        let mut restaurant = base?;
        if let Some(change) = self.change_for(id) {
            overlay(&mut restaurant, &change);
        }
        Some(restaurant)
    }

    /// Reconciled restaurants filtered by cuisine and neighborhood; `"all"`
    /// matches everything.
    pub async fn by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Vec<Restaurant> {
        self.restaurants()
            .await
            .into_iter()
            .filter(|restaurant| cuisine == ANY || restaurant.cuisine_type == cuisine)
            .filter(|restaurant| neighborhood == ANY || restaurant.neighborhood == neighborhood)
            .collect()
    }

    /// Distinct neighborhoods in order of first occurrence, unsorted.
    pub async fn neighborhoods(&self) -> Vec<String> {
        distinct(self.restaurants().await, |restaurant| {
            restaurant.neighborhood.clone()
        })
    }

    /// Distinct cuisines in order of first occurrence, unsorted.
    pub async fn cuisines(&self) -> Vec<String> {
        distinct(self.restaurants().await, |restaurant| {
            restaurant.cuisine_type.clone()
        })
    }

    fn overlay_all(&self, mut base: Vec<Restaurant>) -> Vec<Restaurant> {
        let changes = self.store.get_all_changes().unwrap_or_else(|error| {
            tracing::warn!("Outbox read failed, serving base state: {error}");
            Vec::new()
        });
        let mut by_id: HashMap<u32, OutboxChange> = changes
            .into_iter()
            .map(|change| (change.restaurant_id, change))
            .collect();

        for restaurant in &mut base {
            if let Some(change) = by_id.remove(&restaurant.id) {
                overlay(restaurant, &change);
            }
        }
        base
    }

    fn change_for(&self, id: u32) -> Option<OutboxChange> {
        self.store.get_change(id).unwrap_or_else(|error| {
            tracing::warn!("Outbox read failed, serving base state: {error}");
            None
        })
    }
}

/// Apply a pending change on top of the selected base: the favorite override
/// replaces the flag, pending reviews append after server-confirmed ones in
/// queue order.
fn overlay(restaurant: &mut Restaurant, change: &OutboxChange) {
    if let Some(favorite) = change.favorite {
        restaurant.is_favorite = favorite;
    }
    restaurant
        .reviews
        .extend(change.reviews.iter().map(|pending| pending.review.clone()));
}

fn distinct(restaurants: Vec<Restaurant>, field: impl Fn(&Restaurant) -> String) -> Vec<String> {
    let mut values = Vec::new();
    for restaurant in &restaurants {
        let value = field(restaurant);
        if !values.contains(&value) {
            values.push(value);
        }
    }
    values
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::{restaurant, review, FakeApi};

    fn cached_store(restaurants: &[Restaurant]) -> LocalStore {
        let store = LocalStore::open_in_memory().unwrap();
        store.put_all(restaurants).unwrap();
        store
    }

    #[tokio::test]
    async fn remote_wins_and_refreshes_cache() {
        let store = cached_store(&[restaurant(1, "Old Name", "Mexican", "Mission")]);
        let api = FakeApi::new(vec![restaurant(1, "New Name", "Mexican", "Mission")]);

        let reconciled = Reconciler::new(&store, &api).restaurants().await;
        assert_eq!(reconciled[0].name, "New Name");

        // The fresh result was written back into the cache.
        assert_eq!(store.get(1).unwrap().unwrap().name, "New Name");
    }

    #[tokio::test]
    async fn falls_back_to_cache_when_remote_fails() {
        let cached = vec![
            restaurant(1, "Mission Cafe", "Mexican", "Mission"),
            restaurant(2, "Noodle Bar", "Asian", "Queens"),
            restaurant(3, "Harbor Grill", "Seafood", "Brooklyn"),
        ];
        let store = cached_store(&cached);
        let api = FakeApi::new(Vec::new());
        api.go_offline();

        let reconciled = Reconciler::new(&store, &api).restaurants().await;
        assert_eq!(reconciled, cached);
    }

    #[tokio::test]
    async fn nothing_known_yields_empty_not_error() {
        let store = LocalStore::open_in_memory().unwrap();
        let api = FakeApi::new(Vec::new());
        api.go_offline();

        let reconciler = Reconciler::new(&store, &api);
        assert_eq!(reconciler.restaurants().await, Vec::new());
        assert_eq!(reconciler.restaurant(7).await, None);
    }

    #[tokio::test]
    async fn disabled_store_reads_like_a_miss() {
        let store = LocalStore::disabled();
        let api = FakeApi::new(vec![restaurant(1, "Mission Cafe", "Mexican", "Mission")]);

        let reconciled = Reconciler::new(&store, &api).restaurant(1).await;
        assert_eq!(reconciled.unwrap().name, "Mission Cafe");
    }

    #[tokio::test]
    async fn favorite_override_beats_remote_value() {
        let store = cached_store(&[restaurant(5, "Mission Cafe", "Mexican", "Mission")]);
        let api = FakeApi::new(vec![restaurant(5, "Mission Cafe", "Mexican", "Mission")]);

        let mut change = crate::models::OutboxChange::new(5);
        change.set_favorite(true);
        store.put_change(&change).unwrap();

        let reconciler = Reconciler::new(&store, &api);
        assert!(reconciler.restaurant(5).await.unwrap().is_favorite);
        assert!(reconciler.restaurants().await[0].is_favorite);

        // The cached snapshot itself stays untouched by the overlay.
        assert!(!store.get(5).unwrap().unwrap().is_favorite);
    }

    #[tokio::test]
    async fn pending_reviews_append_after_server_reviews() {
        let mut remote = restaurant(7, "Noodle Bar", "Asian", "Queens");
        remote.reviews.push(review(7, Some(1), "Server"));
        let store = LocalStore::open_in_memory().unwrap();
        let api = FakeApi::new(vec![remote]);

        let mut change = crate::models::OutboxChange::new(7);
        change.push_review(review(7, None, "Queued first"));
        change.push_review(review(7, None, "Queued second"));
        store.put_change(&change).unwrap();

        let reconciled = Reconciler::new(&store, &api).restaurant(7).await.unwrap();
        let names: Vec<&str> = reconciled
            .reviews
            .iter()
            .map(|review| review.name.as_str())
            .collect();
        assert_eq!(names, vec!["Server", "Queued first", "Queued second"]);
    }

    #[tokio::test]
    async fn filter_honors_all_wildcard() {
        let api = FakeApi::new(vec![
            restaurant(1, "Mission Cafe", "Mexican", "Mission"),
            restaurant(2, "Noodle Bar", "Asian", "Queens"),
            restaurant(3, "Taqueria Norte", "Mexican", "Queens"),
        ]);
        let store = LocalStore::open_in_memory().unwrap();
        let reconciler = Reconciler::new(&store, &api);

        assert_eq!(reconciler.by_cuisine_and_neighborhood(ANY, ANY).await.len(), 3);
        assert_eq!(
            reconciler
                .by_cuisine_and_neighborhood("Mexican", ANY)
                .await
                .len(),
            2
        );
        assert_eq!(
            reconciler
                .by_cuisine_and_neighborhood("Mexican", "Queens")
                .await[0]
                .name,
            "Taqueria Norte"
        );
    }

    #[tokio::test]
    async fn derived_queries_dedup_by_first_occurrence() {
        let api = FakeApi::new(vec![
            restaurant(1, "Noodle Bar", "Asian", "Queens"),
            restaurant(2, "Mission Cafe", "Mexican", "Mission"),
            restaurant(3, "Pho Corner", "Asian", "Queens"),
        ]);
        let store = LocalStore::open_in_memory().unwrap();
        let reconciler = Reconciler::new(&store, &api);

        // First-occurrence order, no sorting.
        assert_eq!(reconciler.neighborhoods().await, vec!["Queens", "Mission"]);
        assert_eq!(reconciler.cuisines().await, vec!["Asian", "Mexican"]);
    }
}
