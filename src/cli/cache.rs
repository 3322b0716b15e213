//! Cache command handler
//!
//! Inspect and clear cached API responses.

use crate::cache::CacheStore;
use crate::config::Config;
use crate::error::Result;
use clap::Args;

/// Cache command arguments
#[derive(Args, Debug)]
pub struct CacheArgs {
    /// Show cache directory path
    #[arg(long)]
    pub path: bool,

    /// Remove all cached responses
    #[arg(long)]
    pub clear: bool,
}

/// Run the cache command
pub async fn run(args: CacheArgs) -> Result<()> {
    let config = Config::load()?;
    let cache = CacheStore::new(&config.cache.working_dir);

    if args.path {
        println!("{}", cache.dir().display());
        return Ok(());
    }

    if args.clear {
        let removed = cache.clear().await?;
        println!("Removed {} cached responses", removed);
        return Ok(());
    }

    let artifacts = cache.artifacts().await?;
    println!("Cache: {}", cache.dir().display());
    println!("Max age: {}s", config.cache.max_age_secs);
    println!("Responses: {}", artifacts.len());
    for path in &artifacts {
        let size = tokio::fs::metadata(path)
            .await
            .map(|m| m.len())
            .unwrap_or(0);
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!("  {} ({} bytes)", name, size);
    }

    Ok(())
}
