//! Search command handler
//!
//! Downloads repeaters matching the given filters, optionally narrows them
//! by band and radius, and prints them in the chosen format.

use crate::api::RepeaterBookApi;
use crate::band::{filter_band, Band, Bands};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::format::{available_formats, get_formatter, Listing};
use crate::geo::{nearest, Coordinates, DistanceUnit, Radius};
use crate::query::{Emergency, Frequency, Mode, Query, ServiceType};
use crate::store::{JsonFileStore, RecordStore};
use clap::Args;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Search command arguments
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Callsign (repeatable)
    #[arg(long = "callsign")]
    pub callsigns: Vec<String>,

    /// Nearest city (repeatable)
    #[arg(long = "city")]
    pub cities: Vec<String>,

    /// Landmark (repeatable)
    #[arg(long = "landmark")]
    pub landmarks: Vec<String>,

    /// Country name, e.g. "United States" (repeatable)
    #[arg(long = "country")]
    pub countries: Vec<String>,

    /// Output frequency in MHz (repeatable)
    #[arg(long = "frequency")]
    pub frequencies: Vec<Frequency>,

    /// Mode: analog, dmr, nxdn, p25, tetra (repeatable)
    #[arg(long = "mode")]
    pub modes: Vec<Mode>,

    /// Region outside North America, e.g. "South America" (repeatable)
    #[arg(long = "region")]
    pub regions: Vec<String>,

    /// North American state id, e.g. 06 (repeatable)
    #[arg(long = "state-id")]
    pub state_ids: Vec<String>,

    /// County (repeatable)
    #[arg(long = "county")]
    pub counties: Vec<String>,

    /// Emergency service: ares, races, skywarn, canwarn (repeatable)
    #[arg(long = "emergency")]
    pub emergency: Vec<Emergency>,

    /// Service type: gmrs (repeatable)
    #[arg(long = "service-type")]
    pub service_types: Vec<ServiceType>,

    /// Keep only repeaters on these bands, e.g. 2m, 70cm (repeatable)
    #[arg(long = "band", short = 'b')]
    pub bands: Vec<Bands>,

    /// Latitude of the search origin
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    pub lat: Option<f64>,

    /// Longitude of the search origin
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    pub lng: Option<f64>,

    /// Search radius (defaults to config)
    #[arg(long, short = 'r', requires = "lat")]
    pub radius: Option<f64>,

    /// Radius unit: km or mi (defaults to config)
    #[arg(long, short = 'u')]
    pub unit: Option<DistanceUnit>,

    /// Output format
    #[arg(long, short = 'f')]
    pub format: Option<String>,

    /// Write output to file
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Seconds a cached response stays fresh (defaults to config)
    #[arg(long)]
    pub max_age: Option<u64>,

    /// Save downloaded records to the local store
    #[arg(long)]
    pub save: bool,

    /// List available bands
    #[arg(long = "list-bands")]
    pub list_bands: bool,

    /// List available formats
    #[arg(short = 'F', long = "list-formats")]
    pub list_formats: bool,
}

impl SearchArgs {
    /// Export query described by the filter flags
    pub fn query(&self) -> Query {
        Query::new()
            .with_callsigns(self.callsigns.iter().cloned())
            .with_cities(self.cities.iter().cloned())
            .with_landmarks(self.landmarks.iter().cloned())
            .with_countries(self.countries.iter().cloned())
            .with_frequencies(self.frequencies.iter().copied())
            .with_modes(self.modes.iter().copied())
            .with_regions(self.regions.iter().cloned())
            .with_state_ids(self.state_ids.iter().cloned())
            .with_counties(self.counties.iter().cloned())
            .with_emergency(self.emergency.iter().copied())
            .with_service_types(self.service_types.iter().copied())
    }

    /// Search radius, if an origin was given
    pub fn search_radius(&self, config: &Config) -> Result<Option<Radius>> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Ok(None);
        };
        let radius = Radius::with_unit(
            Coordinates::new(lat, lng),
            self.radius.unwrap_or(config.defaults.radius),
            self.unit.unwrap_or_else(|| config.default_unit()),
        );
        radius.validate()?;
        Ok(Some(radius))
    }
}

/// Run the search command
pub async fn run(args: SearchArgs) -> Result<()> {
    // Handle list flags first
    if args.list_bands {
        list_bands();
        return Ok(());
    }

    if args.list_formats {
        list_formats();
        return Ok(());
    }

    let config = Config::load()?;

    let format = args.format.clone().unwrap_or(config.defaults.format.clone());
    let formatter = get_formatter(&format)
        .ok_or_else(|| Error::Config(format!("Unknown format: {}", format)))?;
    let radius = args.search_radius(&config)?;

    let mut settings = config.api_settings();
    if let Some(secs) = args.max_age {
        settings.max_cache_age = Duration::from_secs(secs);
    }
    let api = RepeaterBookApi::new(settings)?;

    let mut records = api.download(&args.query()).await?;

    if args.save {
        let mut store = JsonFileStore::open(&config.cache.working_dir)?;
        let saved = store.populate(records.clone())?;
        info!(saved, total = store.len(), path = %store.path().display(), "Saved records");
    }

    if !args.bands.is_empty() {
        let bands: Vec<Band> = args.bands.iter().map(|b| b.band()).collect();
        records = filter_band(records, &bands);
    }

    let listing = match radius {
        Some(radius) => Listing::with_distances(nearest(records, &radius), radius),
        None => Listing::new(records),
    };

    let output = formatter.format(&listing)?;

    // Write output
    if let Some(path) = args.output {
        std::fs::write(&path, &output)?;
        eprintln!("Output written to {}", path.display());
    } else {
        println!("{}", output);
    }

    Ok(())
}

/// Print available bands
fn list_bands() {
    println!("Available bands:");
    for band in Bands::ALL.map(Bands::band) {
        println!("  {:5} - {} to {} MHz", band.name, band.low, band.high);
    }
}

/// Print available output formats
fn list_formats() {
    println!("Available output formats:");
    for format in available_formats() {
        println!("  {:6} - {}", format.name, format.description);
    }
}
