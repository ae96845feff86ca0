//! Default configuration values
//!
//! Named constants for all tunable parameters

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 8000;

/// Default URL prefix under which media files are served
pub const DEFAULT_MEDIA_PREFIX: &str = "/media/";

/// Whether nearest-first search requires an authenticated caller by default
pub const DEFAULT_NEARBY_REQUIRE_AUTH: bool = false;

/// Whether top-rated search requires an authenticated caller by default
pub const DEFAULT_TOP_RATED_REQUIRE_AUTH: bool = true;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "travel-guide";
