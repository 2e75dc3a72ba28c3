//! Geolocation and geocoding
//!
//! Provides the position source, reverse geocoding (coordinates to address)
//! and forward search for nearby places.

pub mod ip_location;
pub mod nominatim;
pub mod position;
pub mod search;

#[cfg(test)]
pub(crate) mod testing;

use crate::config::{Config, LocationProvider};
use crate::constants::address::NOT_AVAILABLE;
use crate::constants::api::USER_AGENT;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::future::Future;

pub use position::{FixedPosition, Locator, PositionError, PositionProvider, PositionState};
pub use search::{Place, PlaceResults, SearchParams};

/// A resolved postal address
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Country name, empty when the service did not report one
    pub country: String,
    /// City, falling back to town, then "N/A"
    pub city: String,
    /// Postcode or "N/A"
    pub postcode: String,
}

impl Address {
    /// Build an address from the raw fields of a geocoding response
    ///
    /// `country` has no fallback; city and postcode fall back to "N/A".
    pub fn from_parts(
        country: Option<String>,
        city: Option<String>,
        town: Option<String>,
        postcode: Option<String>,
    ) -> Self {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());

        let city = if present(&city) {
            city
        } else if present(&town) {
            town
        } else {
            None
        };

        Self {
            country: country.unwrap_or_default(),
            city: city.unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            postcode: postcode
                .filter(|p| !p.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// Trait for geocoding backends
pub trait GeoBackend: Send + Sync {
    /// Reverse geocode a coordinate to an address
    fn reverse_geocode(&self, coords: Coordinates) -> impl Future<Output = Result<Address>> + Send;

    /// Fetch a search URL produced by [`SearchParams::to_url`]
    fn search(&self, url: &str) -> impl Future<Output = Result<PlaceResults>> + Send;
}

/// Build the HTTP client shared by all outbound requests
pub fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(Error::from)
}

/// Get the geocoding backend configured in `config`
pub fn get_geocoder(config: &Config) -> Result<nominatim::NominatimBackend> {
    Ok(nominatim::NominatimBackend::new(
        http_client()?,
        &config.geocoding.reverse_url,
        &config.geocoding.language,
    ))
}

/// Get the position provider configured in `config`
pub fn get_locator(config: &Config) -> Result<Locator> {
    let locator = match config.location.provider {
        LocationProvider::Ip => Locator::Ip(ip_location::IpLocator::new(
            http_client()?,
            &config.geocoding.ip_location_url,
        )),
        LocationProvider::Fixed => {
            let coords = Coordinates::new(config.location.lat, config.location.lng);
            coords.validate()?;
            Locator::Fixed(FixedPosition(coords))
        }
        LocationProvider::Disabled => Locator::Disabled,
    };
    Ok(locator)
}
