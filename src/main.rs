//! geo-addresses CLI entry point
//!
//! Address book with haversine proximity queries - CLI + web app

use geo_addresses::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
