//! HTML page formatter
//!
//! Renders the full page served at `/` with `maud`. Forms post back to the
//! server routes, so the page works without client-side scripting.

use crate::config::Config;
use crate::constants::map::{EMBED_HEIGHT, EMBED_WIDTH};
use crate::coord::Coordinates;
use crate::error::Result;
use crate::format::{map, OutputFormatter, NO_PLACES};
use crate::geo::Place;
use crate::view::ViewState;
use maud::{html, Markup, DOCTYPE};

/// Search box hint
const SEARCH_PLACEHOLDER: &str = "Enter a place / streets (e.g. KFC, IKEA, Nordborggade)";

/// HTML formatter - outputs the whole page
pub struct HtmlFormatter {
    /// Reload interval while a request is in flight
    pub refresh_secs: Option<u32>,
}

impl Default for HtmlFormatter {
    fn default() -> Self {
        Self {
            refresh_secs: Some(1),
        }
    }
}

fn locate_control(state: &ViewState) -> Markup {
    let loading = state.position.is_loading;
    html! {
        form method="post" action="/locate" {
            button type="submit" disabled[loading] {
                @if loading { "Getting your position..." } @else { "Get my position" }
            }
        }
        @if let Some(error) = &state.position.error {
            p class="error" { "Error: " (error) }
        }
    }
}

fn location(state: &ViewState, coords: Coordinates, config: &Config) -> Result<Markup> {
    let gps_link = map::link(coords, config)?;
    let embed = map::embed_url(coords, config);

    Ok(html! {
        div { h2 { "Your Location Details" } }
        div {
            p { "Country: " (state.address.country) }
            p { "City: " (state.address.city) }
            p { "Postcode: " (state.address.postcode) }
        }
        p class="gps" {
            "Your GPS position: "
            a target="_blank" rel="noreferrer" href=(gps_link) { (coords.to_string()) }
        }
        p {
            iframe width=(EMBED_WIDTH) height=(EMBED_HEIGHT) frameborder="0" scrolling="no"
                marginheight="0" marginwidth="0" src=(embed) title="Map" {}
        }
        form method="post" action="/search" {
            p {
                "Search for nearby places: "
                input type="text" name="q" value=(state.query) placeholder=(SEARCH_PLACEHOLDER);
            }
        }
    })
}

fn places(state: &ViewState, config: &Config) -> Result<Markup> {
    let listed = match state.places.listable() {
        Some(places) => places
            .iter()
            .map(|place| Ok((place, map::link(place.coords, config)?)))
            .collect::<Result<Vec<(&Place, String)>>>()?,
        None => Vec::new(),
    };

    Ok(html! {
        h2 { "Nearby Places" }
        ul {
            @for (place, link) in &listed {
                li {
                    strong { (place.name) }
                    br;
                    (place.display_name)
                    br;
                    a href=(link) target="_blank" rel="noopener noreferrer" { "View on Map" }
                }
            }
            @if listed.is_empty() {
                li { (NO_PLACES) }
            }
        }
    })
}

impl HtmlFormatter {
    /// Build the page markup for `state`
    pub fn render(&self, state: &ViewState, config: &Config) -> Result<Markup> {
        let refresh = self.refresh_secs.filter(|_| !state.is_idle());
        let location_block = match state.coordinates().filter(|_| state.shows_location()) {
            Some(coords) => Some(location(state, coords, config)?),
            None => None,
        };
        let places_block = if state.shows_places() {
            Some(places(state, config)?)
        } else {
            None
        };

        Ok(html! {
            (DOCTYPE)
            html lang="en" {
                head {
                    meta charset="utf-8";
                    @if let Some(secs) = refresh {
                        meta http-equiv="refresh" content=(secs);
                    }
                    title { "Geolocation App" }
                    link rel="stylesheet" href="/static/app.css";
                }
                body {
                    h1 { "Geolocation App" }
                    (locate_control(state))
                    @if let Some(block) = location_block { (block) }
                    @if let Some(block) = places_block { (block) }
                }
            }
        })
    }
}

impl OutputFormatter for HtmlFormatter {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "Full HTML page"
    }

    fn format(&self, state: &ViewState, config: &Config) -> Result<String> {
        Ok(self.render(state, config)?.into_string())
    }
}
