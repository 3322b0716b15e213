//! Cache-first HTTP GET
//!
//! [`CachingFetcher::fetch`] answers from the [`CacheStore`] when the cached
//! body is younger than `max_age`; otherwise it downloads the body, streaming
//! it into a temporary artifact that is renamed into place once complete.

use crate::cache::CacheStore;
use crate::error::{Error, Result};
use reqwest::{Client, Url};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Receives download progress
///
/// `total` is the response's declared content length, when it has one.
pub trait ProgressReporter: Send + Sync {
    fn start(&self, url: &Url, total: Option<u64>);

    fn advance(&self, url: &Url, downloaded: u64, total: Option<u64>);

    fn finish(&self, url: &Url, downloaded: u64);
}

/// Reports progress as `tracing` debug events
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingProgress;

impl ProgressReporter for TracingProgress {
    fn start(&self, url: &Url, total: Option<u64>) {
        debug!(%url, ?total, "Download started");
    }

    fn advance(&self, url: &Url, downloaded: u64, total: Option<u64>) {
        match total {
            Some(total) if total > 0 => {
                let percent = downloaded.saturating_mul(100) / total;
                debug!(%url, downloaded, total, percent, "Downloading");
            }
            _ => debug!(%url, downloaded, "Downloading"),
        }
    }

    fn finish(&self, url: &Url, downloaded: u64) {
        debug!(%url, downloaded, "Download finished");
    }
}

/// HTTP client that consults the response cache first
#[derive(Clone)]
pub struct CachingFetcher {
    client: Client,
    cache: CacheStore,
    progress: Arc<dyn ProgressReporter>,
}

impl std::fmt::Debug for CachingFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachingFetcher")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl CachingFetcher {
    /// Fetcher sending `user_agent` on every request
    pub fn new(user_agent: &str, cache: CacheStore) -> Result<Self> {
        let client = Client::builder().user_agent(user_agent).build()?;
        Ok(Self {
            client,
            cache,
            progress: Arc::new(TracingProgress),
        })
    }

    /// Replace the progress reporter
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    /// Body of `url`, from cache if younger than `max_age`
    pub async fn fetch(&self, url: &Url, max_age: Duration) -> Result<Vec<u8>> {
        if let Some(bytes) = self.cache.read_fresh(url, max_age).await? {
            info!(%url, "Using cached response");
            return Ok(bytes);
        }

        info!(%url, "Fetching");
        let mut response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| Error::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Network(format!(
                "{} returned status: {}",
                url, status
            )));
        }

        let total = response.content_length();
        self.progress.start(url, total);

        let mut pending = self.cache.begin_write(url).await?;
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::Network(format!("Reading body of {} failed: {}", url, e)))?
        {
            pending.write_chunk(&chunk).await?;
            self.progress.advance(url, pending.written(), total);
        }
        self.progress.finish(url, pending.written());

        pending.commit().await
    }
}
