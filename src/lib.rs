//! nearby: where am I, and what is around me?
//!
//! A library and CLI tool that finds the user's position, resolves it to a
//! postal address, frames it on a map and searches for nearby places through
//! OpenStreetMap's Nominatim service.
//!
//! ## Features
//!
//! - Position providers (IP geolocation, fixed coordinate, disabled)
//! - Reverse geocoding with "N/A" fallbacks for city and postcode
//! - Forward place search scoped to the resolved city and country
//! - A single immutable page state driven by one update function
//! - HTTP page + JSON API + CLI interface
//!
//! ## Quick Start
//!
//! ```rust
//! use nearby::view::{update, Event, ViewSettings, ViewState};
//!
//! let settings = ViewSettings::default();
//! let state = ViewState::new(&settings);
//!
//! // Typing into the search box derives a new search URL to fetch
//! let transition = update(&state, Event::QueryChanged("IKEA".to_string()), &settings);
//! assert!(transition.state.search_url.contains("street=IKEA"));
//! assert_eq!(transition.effects.len(), 1);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod server;
pub mod view;

// Re-export commonly used types
pub use config::Config;
pub use coord::Coordinates;
pub use error::{Error, Result};
pub use geo::{Address, Place, PlaceResults};
pub use view::{Event, ViewState};
