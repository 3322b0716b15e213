//! Endpoint routing
//!
//! RepeaterBook splits its export API in two: one endpoint for the United
//! States, Canada and Mexico, and one for the rest of the world. The two
//! accept different filters, so a query is routed to whichever endpoints can
//! answer it and each endpoint gets its own parameter list.

use super::Query;
use crate::constants::api::{
    EXPORT_NORTH_AMERICA_PATH, EXPORT_REST_OF_WORLD_PATH, NORTH_AMERICA_COUNTRIES,
};
use crate::error::{Error, Result};
use reqwest::Url;
use std::collections::BTreeSet;
use tracing::debug;

/// A RepeaterBook export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Endpoint {
    NorthAmerica,
    RestOfWorld,
}

impl Endpoint {
    /// Path relative to the site root
    pub fn path(self) -> &'static str {
        match self {
            Self::NorthAmerica => EXPORT_NORTH_AMERICA_PATH,
            Self::RestOfWorld => EXPORT_REST_OF_WORLD_PATH,
        }
    }

    /// Whether this endpoint holds listings for the named country
    pub fn serves_country(self, country: &str) -> bool {
        is_north_america(country) == (self == Self::NorthAmerica)
    }

    /// Absolute export URL beneath `base`
    pub fn url(self, base: &Url) -> Result<Url> {
        site_url(base, self.path())
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NorthAmerica => write!(f, "north-america"),
            Self::RestOfWorld => write!(f, "rest-of-world"),
        }
    }
}

/// `path` resolved beneath `base`, keeping any path `base` already has
pub fn site_url(base: &Url, path: &str) -> Result<Url> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path)
        .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", base, e)))
}

/// Whether the country is served by the North America endpoint
pub fn is_north_america(country: &str) -> bool {
    NORTH_AMERICA_COUNTRIES
        .iter()
        .any(|na| na.eq_ignore_ascii_case(country.trim()))
}

/// Which routing rule decided the endpoint set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    NorthAmericaFields,
    RegionField,
    Countries,
    Unconstrained,
}

fn rule(query: &Query) -> Rule {
    let na_fields = query.uses_north_america_fields();
    let row_fields = query.uses_rest_of_world_fields();

    if na_fields && !row_fields {
        Rule::NorthAmericaFields
    } else if row_fields && !na_fields {
        Rule::RegionField
    } else if !query.countries().is_empty() {
        Rule::Countries
    } else {
        Rule::Unconstrained
    }
}

/// Endpoints that must be queried to answer `query`
pub fn route(query: &Query) -> BTreeSet<Endpoint> {
    let endpoints = match rule(query) {
        Rule::NorthAmericaFields => BTreeSet::from([Endpoint::NorthAmerica]),
        Rule::RegionField => BTreeSet::from([Endpoint::RestOfWorld]),
        Rule::Countries => query
            .countries()
            .iter()
            .map(|country| {
                if is_north_america(country) {
                    Endpoint::NorthAmerica
                } else {
                    Endpoint::RestOfWorld
                }
            })
            .collect(),
        Rule::Unconstrained => BTreeSet::from([Endpoint::NorthAmerica, Endpoint::RestOfWorld]),
    };
    debug!(rule = ?rule(query), ?endpoints, "Routed query");
    endpoints
}

/// A query-string parameter and its values, repeated once per value
pub type Param = (&'static str, Vec<String>);

fn param<T, F>(name: &'static str, values: &BTreeSet<T>, render: F) -> Param
where
    F: Fn(&T) -> String,
{
    (name, values.iter().map(render).collect())
}

/// Parameters `endpoint` receives for `query`, empty ones left out
pub fn params(query: &Query, endpoint: Endpoint) -> Vec<Param> {
    let countries: BTreeSet<String> = if rule(query) == Rule::Countries {
        query
            .countries()
            .iter()
            .filter(|c| endpoint.serves_country(c))
            .cloned()
            .collect()
    } else {
        query.countries().clone()
    };

    let mut params = vec![
        param("callsign", query.callsigns(), String::clone),
        param("city", query.cities(), String::clone),
        param("landmark", query.landmarks(), String::clone),
        param("country", &countries, String::clone),
        param("frequency", query.frequencies(), |f| f.to_string()),
        param("mode", query.modes(), |m| m.as_param().to_string()),
    ];

    match endpoint {
        Endpoint::NorthAmerica => params.extend([
            param("state_id", query.state_ids(), String::clone),
            param("county", query.counties(), String::clone),
            param("emcomm", query.emergency(), |e| e.as_param().to_string()),
            param("stype", query.service_types(), |s| s.as_param().to_string()),
        ]),
        Endpoint::RestOfWorld => params.push(param("region", query.regions(), String::clone)),
    }

    params.retain(|(_, values)| !values.is_empty());
    params
}

/// Fully formed export URLs answering `query`
pub fn export_urls(base: &Url, query: &Query) -> Result<BTreeSet<Url>> {
    let mut urls = BTreeSet::new();
    for endpoint in route(query) {
        let mut url = endpoint.url(base)?;
        let params = params(query, endpoint);
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, values) in &params {
                for value in values {
                    pairs.append_pair(name, value);
                }
            }
        }
        urls.insert(url);
    }
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{Emergency, Frequency, Mode};

    fn base() -> Url {
        Url::parse("https://repeaterbook.com").unwrap()
    }

    fn urls(query: &Query) -> Vec<Url> {
        export_urls(&base(), query).unwrap().into_iter().collect()
    }

    fn pairs(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn test_state_ids_route_to_north_america() {
        let query = Query::new().with_state_ids(["06"]);
        let urls = urls(&query);

        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].path(), "/api/export.php");
        assert_eq!(pairs(&urls[0]), vec![("state_id".to_string(), "06".to_string())]);
    }

    #[test]
    fn test_regions_route_to_rest_of_world() {
        let query = Query::new().with_regions(["South America"]);
        let urls = urls(&query);

        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].path(), "/api/exportROW.php");
        assert_eq!(
            pairs(&urls[0]),
            vec![("region".to_string(), "South America".to_string())]
        );
    }

    #[test]
    fn test_country_routing() {
        let germany = Query::new().with_countries(["Germany"]);
        assert_eq!(route(&germany), BTreeSet::from([Endpoint::RestOfWorld]));

        let us = Query::new().with_countries(["United States"]);
        assert_eq!(route(&us), BTreeSet::from([Endpoint::NorthAmerica]));

        let both = Query::new().with_countries(["United States", "Germany"]);
        assert_eq!(
            route(&both),
            BTreeSet::from([Endpoint::NorthAmerica, Endpoint::RestOfWorld])
        );
    }

    #[test]
    fn test_countries_are_partitioned() {
        let query = Query::new().with_countries(["Canada", "Germany", "Japan"]);
        for url in urls(&query) {
            let countries: Vec<String> = pairs(&url).into_iter().map(|(_, v)| v).collect();
            if url.path().ends_with("exportROW.php") {
                assert_eq!(countries, vec!["Germany", "Japan"]);
            } else {
                assert_eq!(countries, vec!["Canada"]);
            }
        }
    }

    #[test]
    fn test_empty_query_routes_to_both_without_parameters() {
        let urls = urls(&Query::new());
        assert_eq!(urls.len(), 2);
        for url in &urls {
            assert!(url.query().is_none(), "unexpected query on {}", url);
        }
    }

    #[test]
    fn test_shared_parameters_copied_to_both() {
        let query = Query::new()
            .with_modes([Mode::Dmr])
            .with_frequencies([Frequency::from_hz(146_940_000)]);
        let urls = urls(&query);

        assert_eq!(urls.len(), 2);
        for url in &urls {
            let pairs = pairs(url);
            assert!(pairs.contains(&("mode".to_string(), "DMR".to_string())));
            assert!(pairs.contains(&("frequency".to_string(), "146.94".to_string())));
        }
    }

    #[test]
    fn test_array_values_repeat_the_parameter() {
        let query = Query::new()
            .with_state_ids(["06", "48"])
            .with_emergency([Emergency::Ares, Emergency::Skywarn]);
        let urls = urls(&query);

        assert_eq!(urls.len(), 1);
        let pairs = pairs(&urls[0]);
        let states: Vec<&str> = pairs
            .iter()
            .filter(|(k, _)| k == "state_id")
            .map(|(_, v)| v.as_str())
            .collect();
        assert_eq!(states, vec!["06", "48"]);
        assert_eq!(pairs.iter().filter(|(k, _)| k == "emcomm").count(), 2);
    }

    #[test]
    fn test_conflicting_hints_fall_back() {
        let query = Query::new().with_state_ids(["06"]).with_regions(["Europe"]);
        assert_eq!(route(&query).len(), 2);

        // region is never sent to North America, state_id never to the rest of the world
        for url in urls(&query) {
            let names: Vec<String> = pairs(&url).into_iter().map(|(k, _)| k).collect();
            if url.path().ends_with("exportROW.php") {
                assert_eq!(names, vec!["region"]);
            } else {
                assert_eq!(names, vec!["state_id"]);
            }
        }

        let with_country = query.with_countries(["Germany"]);
        assert_eq!(route(&with_country), BTreeSet::from([Endpoint::RestOfWorld]));
    }

    #[test]
    fn test_north_america_fields_keep_all_countries() {
        let query = Query::new()
            .with_counties(["Los Angeles"])
            .with_countries(["United States", "Germany"]);
        let urls = urls(&query);

        assert_eq!(urls.len(), 1);
        let countries: Vec<String> = pairs(&urls[0])
            .into_iter()
            .filter(|(k, _)| k == "country")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(countries, vec!["Germany", "United States"]);
    }

    #[test]
    fn test_values_are_url_encoded() {
        let query = Query::new().with_countries(["United States"]);
        let urls = urls(&query);
        assert_eq!(urls[0].query(), Some("country=United+States"));
    }

    #[test]
    fn test_endpoint_url_with_base_path() {
        let base = Url::parse("http://127.0.0.1:8080/mirror").unwrap();
        let url = Endpoint::RestOfWorld.url(&base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/mirror/api/exportROW.php");
        assert!(Endpoint::NorthAmerica.serves_country("canada"));
        assert!(!Endpoint::NorthAmerica.serves_country("Germany"));
    }
}
