//! Centralized constants for the nearby crate
//!
//! Endpoints and map parameters shared by the config defaults, the
//! geocoding backends and the renderers.

/// External API endpoints
pub mod api {
    /// Nominatim reverse geocoding endpoint
    pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

    /// Nominatim forward search endpoint
    pub const NOMINATIM_SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search.php";

    /// IP geolocation API (free, no key required)
    pub const IP_API_URL: &str = "http://ip-api.com/json";

    /// User agent sent with every request (Nominatim rejects anonymous clients)
    pub const USER_AGENT: &str = concat!("nearby/", env!("CARGO_PKG_VERSION"));
}

/// Map rendering
pub mod map {
    /// OpenStreetMap embeddable map view
    pub const EMBED_URL: &str = "https://maps.openstreetmap.org/export/embed.html";

    /// Half-width of the embedded map's bounding box, in degrees
    pub const BBOX_DELTA_DEGREES: f64 = 0.01;

    /// Tile layer of the embedded map
    pub const EMBED_LAYER: &str = "mapnik";

    /// Embedded map frame size in pixels
    pub const EMBED_WIDTH: u32 = 400;
    pub const EMBED_HEIGHT: u32 = 250;
}

/// Values shown when the upstream service leaves a field out
pub mod address {
    /// Sentinel for a missing city/town or postcode
    pub const NOT_AVAILABLE: &str = "N/A";
}
