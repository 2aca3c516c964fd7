//! Restaurant model

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use super::Review;

/// Geographic coordinates of a restaurant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A restaurant as served by the remote API and cached locally.
///
/// The remote list endpoint does not embed reviews; they are joined on by the
/// gateway and default to empty when absent from a payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    /// Unique identifier assigned by the server
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub neighborhood: String,
    #[serde(default)]
    pub cuisine_type: String,
    #[serde(default)]
    pub latlng: LatLng,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photograph: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<BTreeMap<String, String>>,
    /// Normalized from the wire's bool / `"true"` / `"false"` / absent forms
    #[serde(default, deserialize_with = "deserialize_favorite")]
    pub is_favorite: bool,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Restaurant {
    /// Empty shell used when replaying an outbox change for a restaurant
    /// that has no cached snapshot yet.
    #[must_use]
    pub fn shell(id: u32) -> Self {
        Self {
            id,
            name: String::new(),
            address: String::new(),
            neighborhood: String::new(),
            cuisine_type: String::new(),
            latlng: LatLng::default(),
            photograph: None,
            operating_hours: None,
            is_favorite: false,
            reviews: Vec::new(),
        }
    }
}

/// Historical payloads carry the favorite flag as a bool, as the strings
/// `"true"`/`"false"`, or not at all. Everything collapses to a bool here;
/// only `true`/`"true"` count as favorited.
fn deserialize_favorite<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Flag(bool),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Flag(flag)) => flag,
        Some(Raw::Text(text)) => text.trim().eq_ignore_ascii_case("true"),
        None => false,
    })
}
