//! Thin HTTP gateway to the restaurant API.
//!
//! Translates responses into typed results and nothing more: no caching and
//! no retry. Retry on failure is the outbox worker's job, and read-path
//! fallback is the reconciler's.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::models::{Restaurant, Review};
use crate::util::{compact_text, is_http_url, normalize_text_option};

/// Operations the sync core needs from the remote API.
///
/// A trait seam so the reconciler and outbox worker can be exercised against
/// an in-memory fake.
#[allow(async_fn_in_trait)]
pub trait RestaurantApi {
    /// Fetch all restaurants with their reviews joined on.
    async fn fetch_all(&self) -> Result<Vec<Restaurant>>;

    /// Fetch one restaurant with its reviews joined on.
    async fn fetch_one(&self, id: u32) -> Result<Restaurant>;

    /// Set the favorite flag; returns the updated restaurant.
    async fn set_favorite(&self, id: u32, favorite: bool) -> Result<Restaurant>;

    /// Post a review; the server assigns the id and final timestamps.
    async fn post_review(&self, review: &Review) -> Result<Review>;
}

/// `reqwest`-backed [`RestaurantApi`] implementation.
#[derive(Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        Ok(Self {
            base_url,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: parse_api_error(status, &body),
            });
        }

        Ok(response.json::<T>().await?)
    }
}

impl RestaurantApi for HttpGateway {
    async fn fetch_all(&self) -> Result<Vec<Restaurant>> {
        let mut restaurants: Vec<Restaurant> = self.get_json("/restaurants").await?;
        let reviews: Vec<Review> = self.get_json("/reviews").await?;

        for restaurant in &mut restaurants {
            restaurant.reviews = reviews
                .iter()
                .filter(|review| review.restaurant_id == restaurant.id)
                .cloned()
                .collect();
        }

        Ok(restaurants)
    }

    async fn fetch_one(&self, id: u32) -> Result<Restaurant> {
        let mut restaurant: Restaurant = self.get_json(&format!("/restaurants/{id}")).await?;
        restaurant.reviews = self
            .get_json(&format!("/reviews?restaurant_id={id}"))
            .await?;
        Ok(restaurant)
    }

    async fn set_favorite(&self, id: u32, favorite: bool) -> Result<Restaurant> {
        let response = self
            .client
            .put(self.url(&format!("/restaurants/{id}")))
            .query(&[("is_favorite", favorite)])
            .send()
            .await?;
        Self::decode(response).await
    }

    async fn post_review(&self, review: &Review) -> Result<Review> {
        let response = self
            .client
            .post(self.url("/reviews"))
            .json(review)
            .send()
            .await?;
        Self::decode(response).await
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return compact_text(&message);
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        compact_text(trimmed)
    }
}

fn normalize_base_url(raw: String) -> Result<String> {
    let base_url = normalize_text_option(Some(raw))
        .ok_or_else(|| Error::InvalidInput("API base URL must not be empty".to_string()))?;
    if is_http_url(&base_url) {
        Ok(base_url.trim_end_matches('/').to_string())
    } else {
        Err(Error::InvalidInput(
            "API base URL must include http:// or https://".to_string(),
        ))
    }
}
