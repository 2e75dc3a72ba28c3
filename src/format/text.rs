//! Human-readable text output formatter

use crate::config::Config;
use crate::error::Result;
use crate::format::{map, OutputFormatter, NO_PLACES};
use crate::view::ViewState;

/// Text formatter - outputs human-readable summary
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, state: &ViewState, config: &Config) -> Result<String> {
        let mut output = String::new();

        if let Some(error) = &state.position.error {
            output.push_str(&format!("Error: {}\n", error));
        }

        if let Some(coords) = state.coordinates().filter(|_| state.shows_location()) {
            output.push_str("Your Location Details\n");
            output.push_str(&format!("  Country:  {}\n", state.address.country));
            output.push_str(&format!("  City:     {}\n", state.address.city));
            output.push_str(&format!("  Postcode: {}\n", state.address.postcode));
            output.push_str(&format!("  Position: {}\n", coords));
            output.push_str(&format!("  Map:      {}\n", map::link(coords, config)?));
        }

        if state.shows_places() {
            output.push_str(&format!("\nNearby Places ({})\n", state.query));
            match state.places.listable() {
                Some(places) => {
                    for place in places {
                        output.push_str(&format!("  {}\n", place.name));
                        output.push_str(&format!("    {}\n", place.display_name));
                        output.push_str(&format!("    {}\n", map::link(place.coords, config)?));
                    }
                }
                None => output.push_str(&format!("  {}\n", NO_PLACES)),
            }
        }

        Ok(output)
    }
}
