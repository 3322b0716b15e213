//! On-disk cache of raw API responses
//!
//! One file per request URL, named from the SHA-256 of the URL, beneath
//! `<working_dir>/.repeaterbook_cache/`. Freshness is judged from the file's
//! modification time. New content is written to a temporary file in the same
//! directory and renamed over the old artifact, so readers see either the
//! previous body or the complete new one.

use crate::constants::cache::{CACHE_DIR_NAME, FILE_PREFIX, GITIGNORE_FILE};
use crate::error::{Error, Result};
use reqwest::Url;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

fn cache_error(action: &str, path: &Path, e: impl std::fmt::Display) -> Error {
    Error::Cache(format!("Failed to {} {}: {}", action, path.display(), e))
}

/// Stable cache key for a URL: lowercase hex SHA-256 of its string form
pub fn cache_key(url: &Url) -> String {
    hex::encode(Sha256::digest(url.as_str().as_bytes()))
}

/// Response cache rooted in a working directory
#[derive(Debug, Clone)]
pub struct CacheStore {
    dir: PathBuf,
}

impl CacheStore {
    /// Cache beneath `working_dir`; nothing is created until first write
    pub fn new(working_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: working_dir.as_ref().join(CACHE_DIR_NAME),
        }
    }

    /// The cache directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact path for a URL
    pub fn path_for(&self, url: &Url) -> PathBuf {
        self.dir
            .join(format!("{}{}.json", FILE_PREFIX, cache_key(url)))
    }

    /// Create the cache directory and its `.gitignore` marker if missing
    pub async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| cache_error("create", &self.dir, e))?;

        let marker = self.dir.join(GITIGNORE_FILE);
        if fs::metadata(&marker).await.is_err() {
            fs::write(&marker, "*\n")
                .await
                .map_err(|e| cache_error("write", &marker, e))?;
        }
        Ok(())
    }

    /// Age of the artifact for `url`, or `None` if there is none
    pub async fn age(&self, url: &Url) -> Result<Option<Duration>> {
        let path = self.path_for(url);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(cache_error("stat", &path, e)),
        };
        let modified = metadata
            .modified()
            .map_err(|e| cache_error("stat", &path, e))?;

        // an mtime in the future counts as brand new
        let age = SystemTime::now()
            .duration_since(modified)
            .unwrap_or(Duration::ZERO);
        Ok(Some(age))
    }

    /// Cached body for `url` if it is younger than `max_age`
    pub async fn read_fresh(&self, url: &Url, max_age: Duration) -> Result<Option<Vec<u8>>> {
        match self.age(url).await? {
            Some(age) if age < max_age => {
                let path = self.path_for(url);
                debug!(path = %path.display(), ?age, "Cache hit");
                let bytes = fs::read(&path)
                    .await
                    .map_err(|e| cache_error("read", &path, e))?;
                Ok(Some(bytes))
            }
            Some(age) => {
                debug!(%url, ?age, "Cache entry is stale");
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Start replacing the artifact for `url`
    ///
    /// Bytes go to a temporary file; nothing is visible at the artifact path
    /// until [`PendingWrite::commit`].
    pub async fn begin_write(&self, url: &Url) -> Result<PendingWrite> {
        self.ensure_dir().await?;

        let target = self.path_for(url);
        let temp = target.with_extension(format!(
            "json.{}.{}.tmp",
            std::process::id(),
            TEMP_COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        let file = fs::File::create(&temp)
            .await
            .map_err(|e| cache_error("create", &temp, e))?;

        Ok(PendingWrite {
            file: Some(file),
            temp,
            target,
            written: 0,
        })
    }

    /// Write a complete body for `url` and return what is now cached
    pub async fn write(&self, url: &Url, bytes: &[u8]) -> Result<Vec<u8>> {
        let mut pending = self.begin_write(url).await?;
        pending.write_chunk(bytes).await?;
        pending.commit().await
    }

    /// Paths of every cached response
    pub async fn artifacts(&self) -> Result<Vec<PathBuf>> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(cache_error("list", &self.dir, e)),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| cache_error("list", &self.dir, e))?
        {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with(FILE_PREFIX) && name.ends_with(".json") {
                paths.push(entry.path());
            }
        }
        paths.sort();
        Ok(paths)
    }

    /// Remove every cached response, keeping the directory and marker
    ///
    /// Returns the number of artifacts removed.
    pub async fn clear(&self) -> Result<usize> {
        let paths = self.artifacts().await?;
        for path in &paths {
            fs::remove_file(path)
                .await
                .map_err(|e| cache_error("remove", path, e))?;
        }
        debug!(removed = paths.len(), dir = %self.dir.display(), "Cleared cache");
        Ok(paths.len())
    }
}

/// A cache artifact being written
///
/// Dropping it without committing removes the temporary file.
#[derive(Debug)]
pub struct PendingWrite {
    file: Option<fs::File>,
    temp: PathBuf,
    target: PathBuf,
    written: u64,
}

impl PendingWrite {
    /// Append bytes to the temporary file
    pub async fn write_chunk(&mut self, chunk: &[u8]) -> Result<()> {
        let file = self
            .file
            .as_mut()
            .ok_or_else(|| cache_error("write", &self.temp, "file already closed"))?;
        file.write_all(chunk)
            .await
            .map_err(|e| cache_error("write", &self.temp, e))?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    /// Bytes written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Atomically move the temporary file into place and read it back
    pub async fn commit(mut self) -> Result<Vec<u8>> {
        if let Some(mut file) = self.file.take() {
            file.flush()
                .await
                .map_err(|e| cache_error("flush", &self.temp, e))?;
            file.sync_all()
                .await
                .map_err(|e| cache_error("sync", &self.temp, e))?;
        }

        if let Err(e) = fs::rename(&self.temp, &self.target).await {
            let _ = fs::remove_file(&self.temp).await;
            return Err(cache_error("rename", &self.temp, e));
        }
        debug!(path = %self.target.display(), bytes = self.written, "Cached response");

        fs::read(&self.target)
            .await
            .map_err(|e| cache_error("read", &self.target, e))
    }
}

impl Drop for PendingWrite {
    fn drop(&mut self) {
        // still open means commit never ran
        if self.file.take().is_some() {
            let _ = std::fs::remove_file(&self.temp);
        }
    }
}
