//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Language requested from the geocoding service
pub const DEFAULT_LANGUAGE: &str = "en";

/// Default position provider
pub const DEFAULT_LOCATION_PROVIDER: &str = "ip";

/// Drop responses that belong to a superseded request
pub const DEFAULT_DISCARD_STALE: bool = true;

/// Default URL provider for external map links
pub const DEFAULT_URL_PROVIDER: &str = "openstreetmap";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "nearby";
