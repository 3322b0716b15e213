//! Raw export JSON to canonical records
//!
//! Both export endpoints describe repeaters with human-readable keys
//! ("Rptr ID", "Input Freq", ...) but disagree on which keys are present and
//! on value types (`"Yes"` vs `1`, numbers vs strings). Normalization is total:
//! any JSON object yields a [`Record`], with missing or malformed fields
//! replaced by the defaults below. Unknown keys are ignored.

use crate::record::{Record, Status, Use};
use chrono::NaiveDate;
use serde_json::{Map, Value};

/// One repeater as received from an export endpoint
pub type RawRecord = Map<String, Value>;

/// Raw field names
mod field {
    pub const STATE_ID: &str = "State ID";
    pub const REPEATER_ID: &str = "Rptr ID";
    pub const FREQUENCY: &str = "Frequency";
    pub const INPUT_FREQUENCY: &str = "Input Freq";
    pub const PL: &str = "PL";
    pub const TSQ: &str = "TSQ";
    pub const NEAREST_CITY: &str = "Nearest City";
    pub const LANDMARK: &str = "Landmark";
    pub const REGION: &str = "Region";
    pub const COUNTRY: &str = "Country";
    pub const COUNTY: &str = "County";
    pub const STATE: &str = "State";
    pub const LAT: &str = "Lat";
    pub const LONG: &str = "Long";
    pub const PRECISE: &str = "Precise";
    pub const CALLSIGN: &str = "Callsign";
    pub const USE: &str = "Use";
    pub const OPERATIONAL_STATUS: &str = "Operational Status";
    pub const ARES: &str = "ARES";
    pub const RACES: &str = "RACES";
    pub const SKYWARN: &str = "SKYWARN";
    pub const CANWARN: &str = "CANWARN";
    pub const ALLSTAR_NODE: &str = "AllStar Node";
    pub const ECHOLINK_NODE: &str = "EchoLink Node";
    pub const IRLP_NODE: &str = "IRLP Node";
    pub const WIRES_NODE: &str = "Wires Node";
    pub const FM_ANALOG: &str = "FM Analog";
    pub const FM_BANDWIDTH: &str = "FM Bandwidth";
    pub const DMR: &str = "DMR";
    pub const DMR_COLOR_CODE: &str = "DMR Color Code";
    pub const DMR_ID: &str = "DMR ID";
    pub const D_STAR: &str = "D-Star";
    pub const NXDN: &str = "NXDN";
    pub const APCO_P_25: &str = "APCO P-25";
    pub const P_25_NAC: &str = "P-25 NAC";
    pub const M17: &str = "M17";
    pub const M17_CAN: &str = "M17 CAN";
    pub const TETRA: &str = "Tetra";
    pub const TETRA_MCC: &str = "Tetra MCC";
    pub const TETRA_MNC: &str = "Tetra MNC";
    pub const SYSTEM_FUSION: &str = "System Fusion";
    pub const YSF_DG_ID_UPLINK: &str = "YSF DG ID Uplink";
    pub const YSF_DG_ID_DOWNLINK: &str = "YSF DG IS Downlink";
    pub const YSF_DSC: &str = "YSF DSC";
    pub const NOTES: &str = "Notes";
    pub const LAST_UPDATE: &str = "Last Update";
}

/// String spellings of boolean flags
pub const YES_NO: [(&str, bool); 2] = [("Yes", true), ("No", false)];

/// Integer spellings of boolean flags
pub const ONE_ZERO: [(i64, bool); 2] = [(1, true), (0, false)];

/// Access policy spellings; anything else is [`Use::Open`]
pub const USE_TABLE: [(&str, Use); 3] = [
    ("OPEN", Use::Open),
    ("PRIVATE", Use::Private),
    ("CLOSED", Use::Closed),
];

/// Operational status spellings; anything else is [`Status::Unknown`]
pub const STATUS_TABLE: [(&str, Status); 3] = [
    ("Off-air", Status::OffAir),
    ("On-air", Status::OnAir),
    ("Unknown", Status::Unknown),
];

/// Suffix stripped from bandwidth values before parsing
const BANDWIDTH_UNIT: &str = "kHz";

/// Look up a boolean flag, `None` if the value is missing or not in the tables
pub fn lookup_bool(value: Option<&Value>) -> Option<bool> {
    match value? {
        Value::String(s) => YES_NO
            .iter()
            .find(|(token, _)| *token == s.as_str())
            .map(|(_, flag)| *flag),
        Value::Number(n) => {
            let n = n.as_i64()?;
            ONE_ZERO
                .iter()
                .find(|(token, _)| *token == n)
                .map(|(_, flag)| *flag)
        }
        _ => None,
    }
}

/// Map an access policy string, defaulting to [`Use::Open`]
pub fn lookup_use(s: &str) -> Use {
    USE_TABLE
        .iter()
        .find(|(token, _)| *token == s)
        .map(|(_, value)| *value)
        .unwrap_or(Use::Open)
}

/// Map an operational status string, defaulting to [`Status::Unknown`]
pub fn lookup_status(s: &str) -> Status {
    STATUS_TABLE
        .iter()
        .find(|(token, _)| *token == s)
        .map(|(_, value)| *value)
        .unwrap_or(Status::Unknown)
}

/// Parse a bandwidth such as `"12.5 kHz"`; empty or unparsable is `None`
pub fn parse_bandwidth(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    let number = trimmed.strip_suffix(BANDWIDTH_UNIT).unwrap_or(trimmed).trim();
    if number.is_empty() {
        return None;
    }
    number.parse().ok()
}

/// Parse a strict `YYYY-MM-DD` date, falling back to [`NaiveDate::MIN`]
pub fn parse_date(s: &str) -> NaiveDate {
    let s = s.trim();
    if s.len() != 10 {
        return NaiveDate::MIN;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or(NaiveDate::MIN)
}

/// Field accessors over one raw record
struct Fields<'a>(&'a RawRecord);

impl Fields<'_> {
    /// Text value; missing/null is empty, scalars are stringified
    fn text(&self, key: &str) -> String {
        match self.0.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    /// Optional text value; empty becomes `None`
    fn opt_text(&self, key: &str) -> Option<String> {
        Some(self.text(key)).filter(|s| !s.is_empty())
    }

    fn flag(&self, key: &str, default: bool) -> bool {
        lookup_bool(self.0.get(key)).unwrap_or(default)
    }

    /// Floating-point value from a number or numeric string, else 0
    fn decimal(&self, key: &str) -> f64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// Unsigned integer from a number or numeric string, else 0
    fn integer(&self, key: &str) -> u64 {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Convert one raw export record into a canonical [`Record`]
pub fn json_to_record(raw: &RawRecord) -> Record {
    let f = Fields(raw);

    Record {
        state_id: f.text(field::STATE_ID),
        repeater_id: f.integer(field::REPEATER_ID),
        frequency: f.decimal(field::FREQUENCY),
        input_frequency: f.decimal(field::INPUT_FREQUENCY),
        pl_ctcss_uplink: f.opt_text(field::PL),
        pl_ctcss_tsq_downlink: f.opt_text(field::TSQ),
        location_nearest_city: f.text(field::NEAREST_CITY),
        landmark: f.opt_text(field::LANDMARK),
        region: f.opt_text(field::REGION),
        country: f.opt_text(field::COUNTRY),
        county: f.opt_text(field::COUNTY),
        state: f.opt_text(field::STATE),
        latitude: f.decimal(field::LAT),
        longitude: f.decimal(field::LONG),
        precise: f.flag(field::PRECISE, false),
        callsign: f.opt_text(field::CALLSIGN),
        use_membership: lookup_use(&f.text(field::USE)),
        operational_status: lookup_status(&f.text(field::OPERATIONAL_STATUS)),
        ares: f.opt_text(field::ARES),
        races: f.opt_text(field::RACES),
        skywarn: f.opt_text(field::SKYWARN),
        canwarn: f.opt_text(field::CANWARN),
        allstar_node: f.opt_text(field::ALLSTAR_NODE),
        echolink_node: f.opt_text(field::ECHOLINK_NODE),
        irlp_node: f.opt_text(field::IRLP_NODE),
        wires_node: f.opt_text(field::WIRES_NODE),
        analog_capable: f.flag(field::FM_ANALOG, false),
        fm_bandwidth: parse_bandwidth(&f.text(field::FM_BANDWIDTH)),
        dmr_capable: f.flag(field::DMR, false),
        dmr_color_code: f.opt_text(field::DMR_COLOR_CODE),
        dmr_id: f.opt_text(field::DMR_ID),
        d_star_capable: f.flag(field::D_STAR, false),
        nxdn_capable: f.flag(field::NXDN, false),
        apco_p_25_capable: f.flag(field::APCO_P_25, false),
        p_25_nac: f.opt_text(field::P_25_NAC),
        m17_capable: f.flag(field::M17, false),
        m17_can: f.opt_text(field::M17_CAN),
        tetra_capable: f.flag(field::TETRA, false),
        tetra_mcc: f.opt_text(field::TETRA_MCC),
        tetra_mnc: f.opt_text(field::TETRA_MNC),
        yaesu_system_fusion_capable: f.flag(field::SYSTEM_FUSION, false),
        ysf_digital_id_uplink: f.opt_text(field::YSF_DG_ID_UPLINK),
        ysf_digital_id_downlink: f.opt_text(field::YSF_DG_ID_DOWNLINK),
        ysf_dsc: f.opt_text(field::YSF_DSC),
        notes: f.opt_text(field::NOTES),
        last_update: parse_date(&f.text(field::LAST_UPDATE)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    /// Rest-of-world shaped payload
    fn minimal_payload() -> RawRecord {
        raw(json!({
            "State ID": "CA",
            "Rptr ID": 123,
            "Frequency": "146.940000",
            "Input Freq": "146.340000",
            "PL": "",
            "TSQ": "",
            "Nearest City": "Los Angeles",
            "Landmark": "",
            "Country": "United States",
            "Lat": "34.0522",
            "Long": "-118.2437",
            "Precise": 1,
            "Callsign": "W6ABC",
            "Use": "OPEN",
            "Operational Status": "On-air",
            "AllStar Node": "",
            "EchoLink Node": "",
            "IRLP Node": "",
            "Wires Node": "",
            "FM Analog": "Yes",
            "FM Bandwidth": "",
            "DMR": "No",
            "DMR Color Code": "",
            "DMR ID": "",
            "D-Star": "No",
            "NXDN": "No",
            "APCO P-25": "No",
            "P-25 NAC": "",
            "M17": "No",
            "M17 CAN": "",
            "Tetra": "No",
            "Tetra MCC": "",
            "Tetra MNC": "",
            "System Fusion": "No",
            "Notes": "",
            "Last Update": "2024-01-15"
        }))
    }

    #[test]
    fn test_lookup_tables() {
        assert_eq!(lookup_bool(Some(&json!("Yes"))), Some(true));
        assert_eq!(lookup_bool(Some(&json!("No"))), Some(false));
        assert_eq!(lookup_bool(Some(&json!(1))), Some(true));
        assert_eq!(lookup_bool(Some(&json!(0))), Some(false));
        assert_eq!(lookup_bool(Some(&json!("yes"))), None);
        assert_eq!(lookup_bool(Some(&json!(2))), None);
        assert_eq!(lookup_bool(Some(&Value::Null)), None);
        assert_eq!(lookup_bool(None), None);

        assert_eq!(lookup_use("OPEN"), Use::Open);
        assert_eq!(lookup_use("PRIVATE"), Use::Private);
        assert_eq!(lookup_use("CLOSED"), Use::Closed);
        assert_eq!(lookup_use(""), Use::Open);
        assert_eq!(lookup_use("members"), Use::Open);

        assert_eq!(lookup_status("Off-air"), Status::OffAir);
        assert_eq!(lookup_status("On-air"), Status::OnAir);
        assert_eq!(lookup_status("Unknown"), Status::Unknown);
        assert_eq!(lookup_status(""), Status::Unknown);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15"), NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(parse_date("not-a-date"), NaiveDate::MIN);
        assert_eq!(parse_date(""), NaiveDate::MIN);
        assert_eq!(parse_date("2024-02-30"), NaiveDate::MIN);
        assert_eq!(parse_date("2024-3-5"), NaiveDate::MIN);
    }

    #[test]
    fn test_parse_bandwidth() {
        assert_eq!(parse_bandwidth("25 kHz"), Some(25.0));
        assert_eq!(parse_bandwidth("12.5kHz"), Some(12.5));
        assert_eq!(parse_bandwidth("12.5"), Some(12.5));
        assert_eq!(parse_bandwidth(""), None);
        assert_eq!(parse_bandwidth(" kHz"), None);
        assert_eq!(parse_bandwidth("wide"), None);
    }

    #[test]
    fn test_basic_fields() {
        let rec = json_to_record(&minimal_payload());
        assert_eq!(rec.state_id, "CA");
        assert_eq!(rec.repeater_id, 123);
        assert!((rec.frequency - 146.94).abs() < 1e-9);
        assert!((rec.input_frequency - 146.34).abs() < 1e-9);
        assert_eq!(rec.callsign.as_deref(), Some("W6ABC"));
        assert!((rec.latitude - 34.0522).abs() < 1e-9);
        assert!((rec.longitude + 118.2437).abs() < 1e-9);
        assert_eq!(rec.last_update, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn test_boolean_fields() {
        let mut payload = minimal_payload();
        let rec = json_to_record(&payload);
        assert!(rec.analog_capable);
        assert!(!rec.dmr_capable);
        assert!(rec.precise);

        payload.insert("Precise".to_string(), json!(0));
        assert!(!json_to_record(&payload).precise);
    }

    #[test]
    fn test_empty_strings_become_none() {
        let rec = json_to_record(&minimal_payload());
        assert_eq!(rec.landmark, None);
        assert_eq!(rec.pl_ctcss_uplink, None);
        assert_eq!(rec.notes, None);
        assert_eq!(rec.fm_bandwidth, None);
    }

    #[test]
    fn test_enum_defaults() {
        let mut payload = minimal_payload();
        payload.insert("Use".to_string(), json!(""));
        payload.insert("Operational Status".to_string(), json!(""));
        let rec = json_to_record(&payload);
        assert_eq!(rec.use_membership, Use::Open);
        assert_eq!(rec.operational_status, Status::Unknown);
    }

    #[test]
    fn test_missing_and_null_region() {
        let mut payload = minimal_payload();
        assert_eq!(json_to_record(&payload).region, None);

        payload.insert("Region".to_string(), Value::Null);
        assert_eq!(json_to_record(&payload).region, None);

        payload.insert("Region".to_string(), json!("South America"));
        assert_eq!(json_to_record(&payload).region.as_deref(), Some("South America"));
    }

    #[test]
    fn test_fm_bandwidth_strips_khz() {
        let mut payload = minimal_payload();
        payload.insert("FM Bandwidth".to_string(), json!("25 kHz"));
        assert_eq!(json_to_record(&payload).fm_bandwidth, Some(25.0));
    }

    #[test]
    fn test_numeric_node_stringified() {
        let mut payload = minimal_payload();
        payload.insert("EchoLink Node".to_string(), json!(12345));
        payload.insert("DMR ID".to_string(), json!(3106001));
        let rec = json_to_record(&payload);
        assert_eq!(rec.echolink_node.as_deref(), Some("12345"));
        assert_eq!(rec.dmr_id.as_deref(), Some("3106001"));
    }

    #[test]
    fn test_extra_keys_ignored() {
        let mut payload = minimal_payload();
        payload.insert("sponsor".to_string(), json!("Someone"));
        payload.insert("unknown_field".to_string(), json!({"nested": [1, 2]}));
        assert_eq!(json_to_record(&payload).state_id, "CA");
    }

    #[test]
    fn test_north_america_fields() {
        let mut payload = minimal_payload();
        payload.insert("County".to_string(), json!("Los Angeles"));
        payload.insert("ARES".to_string(), json!("Yes"));
        payload.insert("SKYWARN".to_string(), json!("No"));
        payload.insert("YSF DG ID Uplink".to_string(), json!("10"));
        payload.insert("YSF DG IS Downlink".to_string(), json!("20"));
        let rec = json_to_record(&payload);
        assert_eq!(rec.county.as_deref(), Some("Los Angeles"));
        assert_eq!(rec.ares.as_deref(), Some("Yes"));
        assert_eq!(rec.skywarn.as_deref(), Some("No"));
        assert_eq!(rec.races, None);
        assert_eq!(rec.ysf_digital_id_uplink.as_deref(), Some("10"));
        assert_eq!(rec.ysf_digital_id_downlink.as_deref(), Some("20"));
    }

    #[test]
    fn test_empty_object_is_total() {
        let rec = json_to_record(&RawRecord::new());
        assert_eq!(rec.state_id, "");
        assert_eq!(rec.repeater_id, 0);
        assert_eq!(rec.frequency, 0.0);
        assert_eq!(rec.latitude, 0.0);
        assert!(!rec.precise);
        assert!(!rec.analog_capable);
        assert_eq!(rec.use_membership, Use::Open);
        assert_eq!(rec.operational_status, Status::Unknown);
        assert_eq!(rec.last_update, NaiveDate::MIN);
    }

    #[test]
    fn test_null_and_mistyped_numbers_default_to_zero() {
        let mut payload = minimal_payload();
        payload.insert("Rptr ID".to_string(), Value::Null);
        payload.insert("Frequency".to_string(), json!("n/a"));
        payload.insert("Lat".to_string(), json!(34.5));
        let rec = json_to_record(&payload);
        assert_eq!(rec.repeater_id, 0);
        assert_eq!(rec.frequency, 0.0);
        assert_eq!(rec.latitude, 34.5);

        payload.insert("Rptr ID".to_string(), json!("456"));
        assert_eq!(json_to_record(&payload).repeater_id, 456);
    }
}
