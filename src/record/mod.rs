//! Canonical repeater records
//!
//! Every endpoint's raw JSON is normalized into [`Record`] by
//! [`normalize::json_to_record`]; field names here are stable regardless of
//! which endpoint a record came from.

pub mod normalize;

pub use normalize::{json_to_record, parse_date, RawRecord};

use crate::geo::Coordinates;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Access policy of a repeater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Use {
    #[default]
    Open,
    Private,
    Closed,
}

impl std::fmt::Display for Use {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Private => write!(f, "private"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// Operational status of a repeater
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    OffAir,
    OnAir,
    #[default]
    Unknown,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OffAir => write!(f, "off-air"),
            Self::OnAir => write!(f, "on-air"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Identity of a record: (state identifier, repeater identifier)
pub type RecordKey = (String, u64);

/// A normalized repeater entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub state_id: String,
    pub repeater_id: u64,

    /// Output (downlink) frequency in MHz
    pub frequency: f64,
    /// Input (uplink) frequency in MHz
    pub input_frequency: f64,
    pub pl_ctcss_uplink: Option<String>,
    pub pl_ctcss_tsq_downlink: Option<String>,

    pub location_nearest_city: String,
    pub landmark: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
    pub county: Option<String>,
    pub state: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Whether the coordinates are exact rather than a city centroid
    pub precise: bool,

    pub callsign: Option<String>,
    pub use_membership: Use,
    pub operational_status: Status,

    pub ares: Option<String>,
    pub races: Option<String>,
    pub skywarn: Option<String>,
    pub canwarn: Option<String>,

    pub allstar_node: Option<String>,
    pub echolink_node: Option<String>,
    pub irlp_node: Option<String>,
    pub wires_node: Option<String>,

    pub analog_capable: bool,
    /// FM channel bandwidth in kHz
    pub fm_bandwidth: Option<f64>,
    pub dmr_capable: bool,
    pub dmr_color_code: Option<String>,
    pub dmr_id: Option<String>,
    pub d_star_capable: bool,
    pub nxdn_capable: bool,
    pub apco_p_25_capable: bool,
    pub p_25_nac: Option<String>,
    pub m17_capable: bool,
    pub m17_can: Option<String>,
    pub tetra_capable: bool,
    pub tetra_mcc: Option<String>,
    pub tetra_mnc: Option<String>,
    pub yaesu_system_fusion_capable: bool,
    pub ysf_digital_id_uplink: Option<String>,
    pub ysf_digital_id_downlink: Option<String>,
    pub ysf_dsc: Option<String>,

    pub notes: Option<String>,
    pub last_update: NaiveDate,
}

impl Record {
    /// Identity shared by every copy of the same repeater
    pub fn key(&self) -> RecordKey {
        (self.state_id.clone(), self.repeater_id)
    }

    /// Whether two records describe the same repeater
    pub fn same_entity(&self, other: &Record) -> bool {
        self.repeater_id == other.repeater_id && self.state_id == other.state_id
    }

    /// Location as coordinates
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Input minus output frequency in MHz
    pub fn offset(&self) -> f64 {
        self.input_frequency - self.frequency
    }

    /// Names of the digital and analog modes this repeater carries
    pub fn modes(&self) -> Vec<&'static str> {
        [
            (self.analog_capable, "FM"),
            (self.dmr_capable, "DMR"),
            (self.d_star_capable, "D-Star"),
            (self.yaesu_system_fusion_capable, "YSF"),
            (self.nxdn_capable, "NXDN"),
            (self.apco_p_25_capable, "P25"),
            (self.m17_capable, "M17"),
            (self.tetra_capable, "TETRA"),
        ]
        .into_iter()
        .filter_map(|(capable, name)| capable.then_some(name))
        .collect()
    }
}
