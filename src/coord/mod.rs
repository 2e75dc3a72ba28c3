//! Geographic coordinates
//!
//! This module handles:
//! - The user's position as a latitude/longitude pair
//! - Bounding boxes used to frame an embedded map around a position

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }

    /// Bounding box extending `delta` degrees in every direction
    pub fn bounding_box(&self, delta: f64) -> BoundingBox {
        BoundingBox {
            min_lng: self.lng - delta,
            min_lat: self.lat - delta,
            max_lng: self.lng + delta,
            max_lat: self.lat + delta,
        }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.lat, self.lng)
    }
}

/// A rectangular region in min/max longitude and latitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Render as `min_lng,min_lat,max_lng,max_lat` (the order map viewers expect)
    pub fn to_param(&self) -> String {
        format!(
            "{},{},{},{}",
            self.min_lng, self.min_lat, self.max_lng, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(55.6761, 12.5683).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -180.5).validate().is_err());
    }

    #[test]
    fn test_bounding_box() {
        let bbox = Coordinates::new(55.6761, 12.5683).bounding_box(0.01);

        assert_relative_eq!(bbox.min_lng, 12.5583, epsilon = 1e-9);
        assert_relative_eq!(bbox.min_lat, 55.6661, epsilon = 1e-9);
        assert_relative_eq!(bbox.max_lng, 12.5783, epsilon = 1e-9);
        assert_relative_eq!(bbox.max_lat, 55.6861, epsilon = 1e-9);
    }

    #[test]
    fn test_bounding_box_param_order() {
        let bbox = Coordinates::new(10.0, 20.0).bounding_box(1.0);
        assert_eq!(bbox.to_param(), "19,9,21,11");
    }

    #[test]
    fn test_display() {
        assert_eq!(Coordinates::new(55.6761, 12.5683).to_string(), "55.6761, 12.5683");
    }
}
