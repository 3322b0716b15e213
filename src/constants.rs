//! Centralized constants for the repeaterbook crate
//!
//! This module consolidates constants that are used across multiple modules
//! to avoid duplication and ensure consistency.

/// Geographic constants
pub mod geo {
    /// Mean Earth radius in kilometers (IUGG mean radius)
    pub const EARTH_RADIUS_KM: f64 = 6_371.0088;

    /// Kilometers per degree of latitude on the mean-radius sphere
    ///
    /// Derived from the same radius as the haversine distance so the
    /// bounding-box pre-filter never rejects a point the exact check keeps.
    pub const KM_PER_DEGREE_LAT: f64 = EARTH_RADIUS_KM * std::f64::consts::PI / 180.0;

    /// Kilometers per statute mile
    pub const KM_PER_MILE: f64 = 1.609_344;
}

/// RepeaterBook API
pub mod api {
    /// Public RepeaterBook site
    pub const BASE_URL: &str = "https://repeaterbook.com";

    /// Export endpoint for the United States, Canada and Mexico
    pub const EXPORT_NORTH_AMERICA_PATH: &str = "api/export.php";

    /// Export endpoint for every other country
    pub const EXPORT_REST_OF_WORLD_PATH: &str = "api/exportROW.php";

    /// Countries served by the North America endpoint
    pub const NORTH_AMERICA_COUNTRIES: [&str; 3] = ["United States", "Canada", "Mexico"];

    /// Largest result set the export API returns in one response
    pub const MAX_COUNT: u64 = 3500;

    /// Default application name sent in the User-Agent
    pub const APP_NAME: &str = "repeaterbook-rs";

    /// Default contact address sent in the User-Agent
    pub const APP_EMAIL: &str = "repeaterbook-rs@users.noreply.github.com";
}

/// Cache settings
pub mod cache {
    /// Cache directory created beneath the working directory
    pub const CACHE_DIR_NAME: &str = ".repeaterbook_cache";

    /// Marker file that keeps the cache out of version control
    pub const GITIGNORE_FILE: &str = ".gitignore";

    /// Prefix of every cached response file
    pub const FILE_PREFIX: &str = "api_cache_";

    /// Default cache duration in seconds (1 hour)
    pub const DEFAULT_MAX_AGE_SECS: u64 = 3600;
}

/// Record store settings
pub mod store {
    /// Store file name beneath the working directory
    pub const STORE_FILE_NAME: &str = "repeaterbook.json";
}
