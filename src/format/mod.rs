//! Output formatters
//!
//! Provides trait-based rendering of the page state.

pub mod html;
pub mod json;
pub mod map;
pub mod text;

use crate::config::Config;
use crate::error::Result;
use crate::view::ViewState;
use serde::{Deserialize, Serialize};

/// Row shown when a search has nothing listable
pub const NO_PLACES: &str = "No nearby places found.";

/// Information about an output format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatInfo {
    /// Format name
    pub name: String,
    /// Format description
    pub description: String,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Get the format name
    fn name(&self) -> &str;

    /// Get the format description
    fn description(&self) -> &str;

    /// Render a snapshot of the page
    ///
    /// # Arguments
    /// * `state` - The snapshot to render
    /// * `config` - Application config (map endpoints, link providers)
    fn format(&self, state: &ViewState, config: &Config) -> Result<String>;
}

/// Get a formatter by name
pub fn get_formatter(name: &str) -> Option<Box<dyn OutputFormatter>> {
    match name.to_lowercase().as_str() {
        "json" => Some(Box::new(json::JsonFormatter)),
        "text" => Some(Box::new(text::TextFormatter)),
        "html" => Some(Box::new(html::HtmlFormatter::default())),
        _ => None,
    }
}

/// List all available formatters
pub fn available_formats() -> Vec<FormatInfo> {
    vec![
        FormatInfo {
            name: "text".to_string(),
            description: "Human-readable text".to_string(),
        },
        FormatInfo {
            name: "json".to_string(),
            description: "Page state as JSON".to_string(),
        },
        FormatInfo {
            name: "html".to_string(),
            description: "Full HTML page".to_string(),
        },
    ]
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::coord::Coordinates;
    use crate::geo::{Address, Place, PlaceResults};
    use crate::view::{update, Event, ViewSettings, ViewState};

    /// Located in Copenhagen with `query` typed and `places` received
    pub fn copenhagen(query: &str, places: PlaceResults) -> ViewState {
        let settings = ViewSettings::default();
        let events = [
            Event::LocateRequested,
            Event::PositionResolved {
                generation: 1,
                result: Ok(Coordinates::new(55.6761, 12.5683)),
            },
            Event::AddressResolved {
                generation: 1,
                result: Ok(Address {
                    country: "Denmark".to_string(),
                    city: "Copenhagen".to_string(),
                    postcode: "1050".to_string(),
                }),
            },
            Event::QueryChanged(query.to_string()),
            Event::PlacesResolved {
                generation: 2,
                result: Ok(places),
            },
        ];

        events
            .into_iter()
            .fold(ViewState::new(&settings), |state, event| {
                update(&state, event, &settings).state
            })
    }

    pub fn ikea() -> PlaceResults {
        PlaceResults::Places(vec![Place {
            id: 42,
            name: "IKEA Gentofte".to_string(),
            display_name: "IKEA Gentofte, Gentofte, Denmark".to_string(),
            coords: Coordinates::new(55.758, 12.521),
        }])
    }
}
