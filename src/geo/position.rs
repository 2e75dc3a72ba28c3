//! Position source
//!
//! Tracks a single in-flight request for the user's current coordinate and
//! defines the providers that answer it.

use crate::coord::Coordinates;
use crate::geo::ip_location::IpLocator;
use serde::Serialize;
use std::future::Future;
use thiserror::Error;

/// Failures reported by a position provider
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    /// The user (or configuration) refused to share a location
    #[error("User denied Geolocation")]
    PermissionDenied,

    /// The provider could not determine a position
    #[error("Position unavailable: {0}")]
    Unavailable(String),

    /// The provider did not answer in time
    #[error("Timeout expired")]
    Timeout,
}

/// Something that can report the current position on demand
pub trait PositionProvider: Send + Sync {
    /// Provider name as used in the config file
    fn name(&self) -> &'static str;

    /// Ask for the current position
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, PositionError>> + Send;
}

/// A provider that always answers with the same coordinate
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl PositionProvider for FixedPosition {
    fn name(&self) -> &'static str {
        "fixed"
    }

    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        Ok(self.0)
    }
}

/// Position provider selected from configuration
#[derive(Debug)]
pub enum Locator {
    /// IP geolocation
    Ip(IpLocator),
    /// Fixed coordinate
    Fixed(FixedPosition),
    /// Location sharing turned off; every request is denied
    Disabled,
}

impl PositionProvider for Locator {
    fn name(&self) -> &'static str {
        match self {
            Self::Ip(locator) => locator.name(),
            Self::Fixed(fixed) => fixed.name(),
            Self::Disabled => "disabled",
        }
    }

    async fn current_position(&self) -> Result<Coordinates, PositionError> {
        match self {
            Self::Ip(locator) => locator.current_position().await,
            Self::Fixed(fixed) => fixed.current_position().await,
            Self::Disabled => Err(PositionError::PermissionDenied),
        }
    }
}

/// Observable state of the position source
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionState {
    /// A request is in flight
    pub is_loading: bool,
    /// Last successfully resolved coordinate
    pub coordinates: Option<Coordinates>,
    /// Message of the last failure, cleared on success
    pub error: Option<String>,
    #[serde(skip)]
    generation: u64,
}

impl PositionState {
    /// Start a request
    ///
    /// Returns the request generation, or `None` if a request is already in
    /// flight (the pending one is kept).
    pub fn request(&mut self) -> Option<u64> {
        if self.is_loading {
            return None;
        }
        self.is_loading = true;
        self.generation += 1;
        Some(self.generation)
    }

    /// Apply the outcome of request `generation`
    ///
    /// Returns true when the stored coordinate changed value.
    pub fn resolve(
        &mut self,
        generation: u64,
        result: Result<Coordinates, PositionError>,
    ) -> bool {
        if !self.is_loading || generation != self.generation {
            return false;
        }
        self.is_loading = false;

        match result {
            Ok(coords) => {
                self.error = None;
                let changed = self.coordinates != Some(coords);
                self.coordinates = Some(coords);
                changed
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }
}
