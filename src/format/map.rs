//! Map URLs
//!
//! Embedded map frame around the user's position and external links to a
//! coordinate.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::Result;

/// Source URL of the embedded map frame centred on `coords`
///
/// The frame shows a box `map.bbox_delta` degrees around the coordinate with a
/// marker on it.
pub fn embed_url(coords: Coordinates, config: &Config) -> String {
    let bbox = coords.bounding_box(config.map.bbox_delta);
    format!(
        "{}?bbox={}&layer={}&marker={},{}",
        config.map.embed_url,
        bbox.to_param(),
        config.map.layer,
        coords.lat,
        coords.lng
    )
}

/// Link to `coords` on the default external map provider
pub fn link(coords: Coordinates, config: &Config) -> Result<String> {
    config.format_url(None, coords.lat, coords.lng)
}
