//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Uses the free Nominatim API for reverse geocoding and place search.
//! Rate limit: 1 request per second (enforced by User-Agent requirement)

use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::geo::search::{parse_places, PlaceResults};
use crate::geo::{Address, GeoBackend};
use serde::Deserialize;
use tracing::debug;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    reverse_url: String,
    language: String,
}

/// Nominatim reverse response
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    address: ReverseAddress,
}

#[derive(Debug, Deserialize)]
struct ReverseAddress {
    country: Option<String>,
    city: Option<String>,
    town: Option<String>,
    postcode: Option<String>,
}

impl From<ReverseAddress> for Address {
    fn from(raw: ReverseAddress) -> Self {
        Address::from_parts(raw.country, raw.city, raw.town, raw.postcode)
    }
}

impl NominatimBackend {
    /// Create a backend against `reverse_url`, asking for `language` results
    pub fn new(client: reqwest::Client, reverse_url: &str, language: &str) -> Self {
        Self {
            client,
            reverse_url: reverse_url.to_string(),
            language: language.to_string(),
        }
    }

    /// Reverse geocoding URL for `coords`
    pub fn reverse_url(&self, coords: Coordinates) -> String {
        format!(
            "{}?format=json&lat={}&lon={}&accept-language={}",
            self.reverse_url,
            coords.lat,
            coords.lng,
            urlencoding::encode(&self.language)
        )
    }

    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geocoding(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geocoding(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| Error::Geocoding(format!("Failed to parse Nominatim response: {}", e)))
    }

    fn parse_reverse(body: serde_json::Value) -> Result<Address> {
        let parsed: ReverseResponse = serde_json::from_value(body)
            .map_err(|e| Error::Geocoding(format!("Unexpected reverse geocoding response: {}", e)))?;
        Ok(parsed.address.into())
    }
}

impl GeoBackend for NominatimBackend {
    async fn reverse_geocode(&self, coords: Coordinates) -> Result<Address> {
        let body = self.get_json(&self.reverse_url(coords)).await?;
        Self::parse_reverse(body)
    }

    async fn search(&self, url: &str) -> Result<PlaceResults> {
        let body = self.get_json(url).await?;
        Ok(parse_places(body))
    }
}
