//! repeaterbook CLI entry point
//!
//! Search, cache and filter RepeaterBook repeater listings

use repeaterbook::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
