//! Nearby place search
//!
//! Derives the forward-geocoding URL from the resolved address and the user's
//! query, and gives shape to whatever the search endpoint answers.

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Inputs of a forward-geocoding search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams<'a> {
    pub city: &'a str,
    pub street: &'a str,
    pub country: &'a str,
    pub language: &'a str,
}

impl<'a> SearchParams<'a> {
    /// Query parameters in the order they are sent
    pub fn pairs(&self) -> [(&'static str, &'a str); 5] {
        [
            ("city", self.city),
            ("street", self.street),
            ("country", self.country),
            ("accept-language", self.language),
            ("format", "jsonv2"),
        ]
    }

    /// Full search URL against `base_url`
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}?{}", base_url, query_string(&self.pairs()))
    }
}

/// Render `key=value` pairs joined with `&`
///
/// Only a pair that renders as a bare `=` is dropped, so a parameter with an
/// empty value is still sent as `key=`.
pub fn query_string(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .filter(|pair| pair != "=")
        .collect::<Vec<_>>()
        .join("&")
}

/// A place returned by the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u64,
    pub name: String,
    pub display_name: String,
    pub coords: Coordinates,
}

/// Search results as received
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlaceResults {
    /// The endpoint answered with a list of places
    Places(Vec<Place>),
    /// The endpoint answered with something other than a list
    Unexpected(serde_json::Value),
}

impl Default for PlaceResults {
    fn default() -> Self {
        Self::Places(Vec::new())
    }
}

impl PlaceResults {
    /// Places to list, or `None` when the "no places" row should be shown instead
    pub fn listable(&self) -> Option<&[Place]> {
        match self {
            Self::Places(places) if !places.is_empty() => Some(places),
            _ => None,
        }
    }
}

/// One entry of a `jsonv2` search response
#[derive(Debug, Deserialize)]
struct SearchItem {
    place_id: u64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    lat: String,
    lon: String,
}

impl SearchItem {
    fn into_place(self) -> Result<Place> {
        let lat: f64 = self.lat.parse().map_err(|_| {
            Error::Geocoding(format!("Invalid latitude: {}", self.lat))
        })?;
        let lng: f64 = self.lon.parse().map_err(|_| {
            Error::Geocoding(format!("Invalid longitude: {}", self.lon))
        })?;
        Ok(Place {
            id: self.place_id,
            name: self.name.unwrap_or_default(),
            display_name: self.display_name.unwrap_or_default(),
            coords: Coordinates::new(lat, lng),
        })
    }
}

fn parse_item(item: serde_json::Value) -> Result<Place> {
    serde_json::from_value::<SearchItem>(item)?.into_place()
}

/// Interpret a search response body
///
/// Any JSON array becomes a list of places; entries that cannot be read as a
/// place are skipped. Any other JSON value is kept as
/// [`PlaceResults::Unexpected`].
pub fn parse_places(body: serde_json::Value) -> PlaceResults {
    let serde_json::Value::Array(items) = body else {
        return PlaceResults::Unexpected(body);
    };

    let places = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match parse_item(item) {
            Ok(place) => Some(place),
            Err(e) => {
                warn!("Skipping search result {}: {}", index, e);
                None
            }
        })
        .collect();

    PlaceResults::Places(places)
}
