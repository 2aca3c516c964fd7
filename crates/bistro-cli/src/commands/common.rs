use std::path::Path;
use std::sync::Arc;

use bistro_core::{App, HttpGateway, LocalStore, MutationStatus, NullScheduler, Restaurant};
use serde::Serialize;

use crate::error::CliError;

pub type CliApp = App<HttpGateway, NullScheduler>;

/// Build the application core: a (possibly degraded) local store, the HTTP
/// gateway, and the no-background-sync scheduler, so mutations attempt an
/// eager replay right away.
pub fn open_app(db_path: &Path, api_url: &str) -> Result<CliApp, CliError> {
    let store = LocalStore::open_or_disabled(db_path);
    let gateway = HttpGateway::new(api_url)?;
    Ok(App::new(Arc::new(store), gateway, NullScheduler))
}

#[derive(Debug, Serialize)]
pub struct RestaurantListItem {
    pub id: u32,
    pub name: String,
    pub cuisine_type: String,
    pub neighborhood: String,
    pub is_favorite: bool,
    pub review_count: usize,
}

pub fn restaurant_to_list_item(restaurant: &Restaurant) -> RestaurantListItem {
    RestaurantListItem {
        id: restaurant.id,
        name: restaurant.name.clone(),
        cuisine_type: restaurant.cuisine_type.clone(),
        neighborhood: restaurant.neighborhood.clone(),
        is_favorite: restaurant.is_favorite,
        review_count: restaurant.reviews.len(),
    }
}

pub fn format_restaurant_line(restaurant: &Restaurant) -> String {
    let marker = if restaurant.is_favorite { "*" } else { " " };
    format!(
        "{marker} [{}] {} - {} ({}) - {} review(s)",
        restaurant.id,
        restaurant.name,
        restaurant.cuisine_type,
        restaurant.neighborhood,
        restaurant.reviews.len()
    )
}

pub fn describe_status(status: MutationStatus) -> &'static str {
    match status {
        MutationStatus::Queued => "queued, will sync when the API is reachable",
        MutationStatus::Confirmed => "confirmed by the API",
        MutationStatus::Dropped => "could not be saved (no local store, API unreachable)",
    }
}

pub fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map_or_else(|| millis.to_string(), |dt| dt.format("%Y-%m-%d %H:%M").to_string())
}
