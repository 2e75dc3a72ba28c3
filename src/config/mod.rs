//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/nearby/config.toml

pub mod defaults;

use crate::constants::api::{IP_API_URL, NOMINATIM_REVERSE_URL, NOMINATIM_SEARCH_URL};
use crate::constants::map::{BBOX_DELTA_DEGREES, EMBED_LAYER, EMBED_URL};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Geocoding endpoints
    #[serde(default)]
    pub geocoding: GeocodingConfig,

    /// Position source settings
    #[serde(default)]
    pub location: LocationConfig,

    /// Search pipeline settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Embedded map settings
    #[serde(default)]
    pub map: MapConfig,

    /// External map link settings
    #[serde(default)]
    pub url: UrlConfig,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Geocoding endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    /// Reverse geocoding endpoint
    #[serde(default = "default_reverse_url")]
    pub reverse_url: String,

    /// Forward search endpoint
    #[serde(default = "default_search_url")]
    pub search_url: String,

    /// IP geolocation endpoint
    #[serde(default = "default_ip_location_url")]
    pub ip_location_url: String,

    /// Preferred result language
    #[serde(default = "default_language")]
    pub language: String,
}

/// Where the current position comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationProvider {
    /// IP geolocation
    Ip,
    /// `location.lat` / `location.lng`
    Fixed,
    /// Location sharing refused
    Disabled,
}

impl std::fmt::Display for LocationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ip => write!(f, "ip"),
            Self::Fixed => write!(f, "fixed"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

impl std::str::FromStr for LocationProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ip" => Ok(Self::Ip),
            "fixed" => Ok(Self::Fixed),
            "disabled" | "off" => Ok(Self::Disabled),
            _ => Err(format!("Unknown location provider: {}", s)),
        }
    }
}

/// Position source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Position provider
    #[serde(default = "default_location_provider")]
    pub provider: LocationProvider,

    /// Latitude used by the fixed provider
    #[serde(default)]
    pub lat: f64,

    /// Longitude used by the fixed provider
    #[serde(default)]
    pub lng: f64,
}

/// Search pipeline settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Ignore responses that arrive for a superseded request
    ///
    /// When false, whichever response arrives last wins.
    #[serde(default = "default_discard_stale")]
    pub discard_stale: bool,
}

/// Embedded map settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Embeddable map endpoint
    #[serde(default = "default_embed_url")]
    pub embed_url: String,

    /// Half-width of the bounding box in degrees
    #[serde(default = "default_bbox_delta")]
    pub bbox_delta: f64,

    /// Tile layer
    #[serde(default = "default_layer")]
    pub layer: String,
}

/// External map link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UrlConfig {
    /// Default URL provider
    #[serde(default = "default_url_provider")]
    pub default: String,

    /// URL provider templates
    #[serde(default = "default_url_providers")]
    pub providers: HashMap<String, String>,
}

// Default value functions for serde
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_reverse_url() -> String {
    NOMINATIM_REVERSE_URL.to_string()
}
fn default_search_url() -> String {
    NOMINATIM_SEARCH_URL.to_string()
}
fn default_ip_location_url() -> String {
    IP_API_URL.to_string()
}
fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}
fn default_location_provider() -> LocationProvider {
    DEFAULT_LOCATION_PROVIDER
        .parse()
        .unwrap_or(LocationProvider::Ip)
}
fn default_discard_stale() -> bool {
    DEFAULT_DISCARD_STALE
}
fn default_embed_url() -> String {
    EMBED_URL.to_string()
}
fn default_bbox_delta() -> f64 {
    BBOX_DELTA_DEGREES
}
fn default_layer() -> String {
    EMBED_LAYER.to_string()
}
fn default_url_provider() -> String {
    DEFAULT_URL_PROVIDER.to_string()
}
fn default_url_providers() -> HashMap<String, String> {
    let mut providers = HashMap::new();
    providers.insert(
        "openstreetmap".to_string(),
        "https://www.openstreetmap.org/#map=16/{lat}/{lng}".to_string(),
    );
    providers.insert(
        "google".to_string(),
        "https://www.google.com/maps/@{lat},{lng},16z".to_string(),
    );
    providers.insert(
        "apple".to_string(),
        "https://maps.apple.com/?ll={lat},{lng}".to_string(),
    );
    providers
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            reverse_url: default_reverse_url(),
            search_url: default_search_url(),
            ip_location_url: default_ip_location_url(),
            language: default_language(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: default_location_provider(),
            lat: 0.0,
            lng: 0.0,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            discard_stale: default_discard_stale(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            embed_url: default_embed_url(),
            bbox_delta: default_bbox_delta(),
            layer: default_layer(),
        }
    }
}

impl Default for UrlConfig {
    fn default() -> Self {
        Self {
            default: default_url_provider(),
            providers: default_url_providers(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(&path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),

            ["geocoding", "reverse_url"] => Some(self.geocoding.reverse_url.clone()),
            ["geocoding", "search_url"] => Some(self.geocoding.search_url.clone()),
            ["geocoding", "ip_location_url"] => Some(self.geocoding.ip_location_url.clone()),
            ["geocoding", "language"] => Some(self.geocoding.language.clone()),

            ["location", "provider"] => Some(self.location.provider.to_string()),
            ["location", "lat"] => Some(self.location.lat.to_string()),
            ["location", "lng"] => Some(self.location.lng.to_string()),

            ["search", "discard_stale"] => Some(self.search.discard_stale.to_string()),

            ["map", "embed_url"] => Some(self.map.embed_url.clone()),
            ["map", "bbox_delta"] => Some(self.map.bbox_delta.to_string()),
            ["map", "layer"] => Some(self.map.layer.clone()),

            ["url", "default"] => Some(self.url.default.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid port value: {}", value))
                })?;
            }

            ["geocoding", "reverse_url"] => {
                self.geocoding.reverse_url = value.to_string();
            }
            ["geocoding", "search_url"] => {
                self.geocoding.search_url = value.to_string();
            }
            ["geocoding", "ip_location_url"] => {
                self.geocoding.ip_location_url = value.to_string();
            }
            ["geocoding", "language"] => {
                self.geocoding.language = value.to_string();
            }

            ["location", "provider"] => {
                self.location.provider = value.parse().map_err(Error::Config)?;
            }
            ["location", "lat"] => {
                self.location.lat = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid latitude value: {}", value))
                })?;
            }
            ["location", "lng"] => {
                self.location.lng = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid longitude value: {}", value))
                })?;
            }

            ["search", "discard_stale"] => {
                self.search.discard_stale = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid boolean value: {}", value))
                })?;
            }

            ["map", "embed_url"] => {
                self.map.embed_url = value.to_string();
            }
            ["map", "bbox_delta"] => {
                self.map.bbox_delta = value.parse().map_err(|_| {
                    Error::Config(format!("Invalid bounding box delta: {}", value))
                })?;
            }
            ["map", "layer"] => {
                self.map.layer = value.to_string();
            }

            ["url", "default"] => {
                if !self.url.providers.contains_key(value) {
                    return Err(Error::Config(format!("Unknown URL provider: {}", value)));
                }
                self.url.default = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "server.host",
            "server.port",
            "geocoding.reverse_url",
            "geocoding.search_url",
            "geocoding.ip_location_url",
            "geocoding.language",
            "location.provider",
            "location.lat",
            "location.lng",
            "search.discard_stale",
            "map.embed_url",
            "map.bbox_delta",
            "map.layer",
            "url.default",
        ]
    }

    /// Format a URL using the specified provider
    ///
    /// Replaces {lat} and {lng} placeholders with actual values
    pub fn format_url(&self, provider: Option<&str>, lat: f64, lng: f64) -> Result<String> {
        let provider_name = provider.unwrap_or(&self.url.default);

        let template = self.url.providers.get(provider_name).ok_or_else(|| {
            Error::Config(format!("Unknown URL provider: {}", provider_name))
        })?;

        Ok(template
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string()))
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
