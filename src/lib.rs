//! repeaterbook: RepeaterBook client and repeater filters
//!
//! A library and CLI tool for downloading amateur radio repeater listings
//! from RepeaterBook's export API and narrowing them down locally.
//!
//! ## Features
//!
//! - Declarative [`Query`] routed to the North America and rest-of-world
//!   export endpoints
//! - Cache-first fetching with atomic on-disk updates
//! - Tolerant normalization of both endpoints' record shapes into [`Record`]
//! - Great-circle radius search and frequency-band filters
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use repeaterbook::{ApiSettings, Bands, Coordinates, Query, Radius, RepeaterBookApi};
//! use repeaterbook::band::filter_band;
//! use repeaterbook::geo::filter_radius;
//!
//! # async fn example() -> repeaterbook::Result<()> {
//! let api = RepeaterBookApi::new(ApiSettings::default())?;
//!
//! // California repeaters
//! let records = api.download(&Query::new().with_state_ids(["06"])).await?;
//!
//! // 2 m repeaters within 25 km of downtown LA, nearest first
//! let two_meters = filter_band(records, &[Bands::M2.band()]);
//! let origin = Coordinates::new(34.0522, -118.2437);
//! for record in filter_radius(two_meters, &Radius::new(origin, 25.0)) {
//!     println!("{:?} {:.4}", record.callsign, record.frequency);
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod band;
pub mod cache;
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod fetch;
pub mod format;
pub mod geo;
pub mod query;
pub mod record;
pub mod store;

// Re-export commonly used types
pub use api::{ApiSettings, ExportResponse, RepeaterBookApi};
pub use band::{Band, Bands};
pub use cache::CacheStore;
pub use config::Config;
pub use error::{Error, Result};
pub use fetch::{CachingFetcher, ProgressReporter};
pub use geo::{BoundingBox, Coordinates, DistanceUnit, Radius};
pub use query::{Emergency, Endpoint, Frequency, Mode, Query, ServiceType};
pub use record::{Record, Status, Use};
pub use store::{JsonFileStore, RecordStore};
