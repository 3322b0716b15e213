//! Default configuration values
//!
//! Named constants for all tunable parameters

pub use crate::constants::api::{APP_EMAIL as DEFAULT_APP_EMAIL, APP_NAME as DEFAULT_APP_NAME};
pub use crate::constants::api::BASE_URL as DEFAULT_BASE_URL;
pub use crate::constants::cache::DEFAULT_MAX_AGE_SECS;

/// Default working directory (holds the cache and record store)
pub const DEFAULT_WORKING_DIR: &str = ".";

/// Default output format
pub const DEFAULT_FORMAT: &str = "text";

/// Default distance unit
pub const DEFAULT_UNIT: &str = "km";

/// Default search radius in the default unit
pub const DEFAULT_RADIUS: f64 = 50.0;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "repeaterbook";
