//! RepeaterBook export API client
//!
//! [`RepeaterBookApi::download`] routes a [`Query`] to the export endpoints,
//! fetches every URL concurrently through the response cache, validates each
//! envelope and normalizes the merged results into [`Record`]s. Any failing
//! endpoint fails the whole download.

pub mod response;

pub use response::{parse_export, validate_export, ExportResponse};

use crate::cache::CacheStore;
use crate::constants::api::{APP_EMAIL, APP_NAME, BASE_URL};
use crate::constants::cache::DEFAULT_MAX_AGE_SECS;
use crate::error::{Error, Result};
use crate::fetch::{CachingFetcher, ProgressReporter};
use crate::query::{export_urls, site_url, Endpoint, Query};
use crate::record::{json_to_record, Record};
use futures::future::try_join_all;
use reqwest::Url;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Connection and cache settings for [`RepeaterBookApi`]
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub app_name: String,
    pub app_email: String,
    /// Directory holding the response cache
    pub working_dir: PathBuf,
    pub max_cache_age: Duration,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            app_name: APP_NAME.to_string(),
            app_email: APP_EMAIL.to_string(),
            working_dir: PathBuf::from("."),
            max_cache_age: Duration::from_secs(DEFAULT_MAX_AGE_SECS),
        }
    }
}

impl ApiSettings {
    /// `User-Agent` header value: `"<app name> <<app email>>"`
    pub fn user_agent(&self) -> String {
        format!("{} <{}>", self.app_name, self.app_email)
    }
}

/// Client for the RepeaterBook export endpoints
#[derive(Debug, Clone)]
pub struct RepeaterBookApi {
    base_url: Url,
    settings: ApiSettings,
    fetcher: CachingFetcher,
}

impl RepeaterBookApi {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let base_url = Url::parse(&settings.base_url)
            .map_err(|e| Error::Config(format!("Invalid base URL {}: {}", settings.base_url, e)))?;
        let fetcher = CachingFetcher::new(
            &settings.user_agent(),
            CacheStore::new(&settings.working_dir),
        )?;
        Ok(Self {
            base_url,
            settings,
            fetcher,
        })
    }

    /// Replace the download progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.fetcher = self.fetcher.with_progress(progress);
        self
    }

    pub fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    pub fn cache(&self) -> &CacheStore {
        self.fetcher.cache()
    }

    /// `<base>/api`
    pub fn url_api(&self) -> Result<Url> {
        site_url(&self.base_url, "api")
    }

    /// `<base>/api/export.php`
    pub fn url_export_north_america(&self) -> Result<Url> {
        Endpoint::NorthAmerica.url(&self.base_url)
    }

    /// `<base>/api/exportROW.php`
    pub fn url_export_rest_of_world(&self) -> Result<Url> {
        Endpoint::RestOfWorld.url(&self.base_url)
    }

    /// Export URLs that together answer `query`
    pub fn urls_export(&self, query: &Query) -> Result<BTreeSet<Url>> {
        export_urls(&self.base_url, query)
    }

    /// Fetch (or read from cache) and validate one export URL
    pub async fn export_json(&self, url: &Url) -> Result<ExportResponse> {
        let body = self.fetcher.fetch(url, self.settings.max_cache_age).await?;
        parse_export(&body)
    }

    /// Download every URL concurrently and normalize the merged results
    ///
    /// The first failure is returned and the remaining requests are dropped.
    /// Record order across URLs is unspecified.
    pub async fn download_all<'a, I>(&self, urls: I) -> Result<Vec<Record>>
    where
        I: IntoIterator<Item = &'a Url>,
    {
        let responses = try_join_all(urls.into_iter().map(|url| self.export_json(url))).await?;

        let records: Vec<Record> = responses
            .iter()
            .flat_map(|response| response.results.iter())
            .map(json_to_record)
            .collect();
        info!(
            responses = responses.len(),
            records = records.len(),
            "Downloaded records"
        );
        Ok(records)
    }

    /// Records matching `query`
    pub async fn download(&self, query: &Query) -> Result<Vec<Record>> {
        let urls = self.urls_export(query)?;
        self.download_all(&urls).await
    }
}
