//! Shared fixtures for unit tests: an in-memory fake of the remote API and
//! small model builders.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

use crate::app::SyncScheduler;
use crate::error::{Error, Result};
use crate::gateway::RestaurantApi;
use crate::models::{Restaurant, Review};

pub(crate) fn restaurant(id: u32, name: &str, cuisine: &str, neighborhood: &str) -> Restaurant {
    let mut restaurant = Restaurant::shell(id);
    restaurant.name = name.to_string();
    restaurant.cuisine_type = cuisine.to_string();
    restaurant.neighborhood = neighborhood.to_string();
    restaurant
}

pub(crate) fn review(restaurant_id: u32, id: Option<u64>, name: &str) -> Review {
    Review {
        id,
        restaurant_id,
        name: name.to_string(),
        rating: 4,
        comments: format!("{name} was here"),
        created_at: 1_000,
        updated_at: 1_000,
    }
}

fn unreachable_error(what: &str) -> Error {
    Error::Api {
        status: 503,
        message: format!("simulated outage during {what}"),
    }
}

/// In-memory stand-in for the remote API.
///
/// Holds server-side state behind a mutex and flips between reachable and
/// failing per operation so tests can simulate outages mid-replay.
pub(crate) struct FakeApi {
    pub restaurants: Mutex<Vec<Restaurant>>,
    /// Reviews accepted by `post_review`, in arrival order
    pub posted: Mutex<Vec<Review>>,
    pub offline: AtomicBool,
    pub fail_favorites: AtomicBool,
    /// How many more `post_review` calls succeed before failing
    review_budget: AtomicU64,
    next_review_id: AtomicU64,
}

impl FakeApi {
    pub fn new(restaurants: Vec<Restaurant>) -> Self {
        Self {
            restaurants: Mutex::new(restaurants),
            posted: Mutex::new(Vec::new()),
            offline: AtomicBool::new(false),
            fail_favorites: AtomicBool::new(false),
            review_budget: AtomicU64::new(u64::from(u32::MAX)),
            next_review_id: AtomicU64::new(100),
        }
    }

    /// Let the next `count` review posts succeed, then fail.
    pub fn limit_reviews(&self, count: u32) {
        self.review_budget.store(u64::from(count), Ordering::SeqCst);
    }

    pub fn go_offline(&self) {
        self.offline.store(true, Ordering::SeqCst);
    }

    pub fn go_online(&self) {
        self.offline.store(false, Ordering::SeqCst);
    }

    pub fn posted_names(&self) -> Vec<String> {
        self.posted
            .lock()
            .unwrap()
            .iter()
            .map(|review| review.name.clone())
            .collect()
    }
}

impl RestaurantApi for FakeApi {
    async fn fetch_all(&self) -> Result<Vec<Restaurant>> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unreachable_error("fetch_all"));
        }
        Ok(self.restaurants.lock().unwrap().clone())
    }

    async fn fetch_one(&self, id: u32) -> Result<Restaurant> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(unreachable_error("fetch_one"));
        }
        self.restaurants
            .lock()
            .unwrap()
            .iter()
            .find(|restaurant| restaurant.id == id)
            .cloned()
            .ok_or(Error::Api {
                status: 404,
                message: format!("no restaurant {id}"),
            })
    }

    async fn set_favorite(&self, id: u32, favorite: bool) -> Result<Restaurant> {
        if self.offline.load(Ordering::SeqCst) || self.fail_favorites.load(Ordering::SeqCst) {
            return Err(unreachable_error("set_favorite"));
        }
        let mut restaurants = self.restaurants.lock().unwrap();
        let restaurant = restaurants
            .iter_mut()
            .find(|restaurant| restaurant.id == id)
            .ok_or(Error::Api {
                status: 404,
                message: format!("no restaurant {id}"),
            })?;
        restaurant.is_favorite = favorite;
        Ok(restaurant.clone())
    }

    async fn post_review(&self, review: &Review) -> Result<Review> {
        if self.offline.load(Ordering::SeqCst) || self.review_budget.load(Ordering::SeqCst) == 0 {
            return Err(unreachable_error("post_review"));
        }
        self.review_budget.fetch_sub(1, Ordering::SeqCst);

        let mut confirmed = review.clone();
        confirmed.id = Some(self.next_review_id.fetch_add(1, Ordering::SeqCst));

        let mut restaurants = self.restaurants.lock().unwrap();
        if let Some(restaurant) = restaurants
            .iter_mut()
            .find(|restaurant| restaurant.id == review.restaurant_id)
        {
            restaurant.reviews.push(confirmed.clone());
        }
        self.posted.lock().unwrap().push(confirmed.clone());

        Ok(confirmed)
    }
}

/// Scheduler fake: records registered tags, or refuses registration so the
/// eager-fallback path runs.
pub(crate) struct RecordingScheduler {
    pub supported: bool,
    pub tags: Mutex<Vec<String>>,
}

impl RecordingScheduler {
    pub fn supported() -> Self {
        Self {
            supported: true,
            tags: Mutex::new(Vec::new()),
        }
    }

    pub fn unsupported() -> Self {
        Self {
            supported: false,
            tags: Mutex::new(Vec::new()),
        }
    }
}

impl SyncScheduler for RecordingScheduler {
    fn register(&self, tag: &str) -> Result<()> {
        if self.supported {
            self.tags.lock().unwrap().push(tag.to_string());
            Ok(())
        } else {
            Err(Error::SyncUnsupported)
        }
    }
}
