//! Report Binary - Routing report generator for an LND node
//!
//! Fetches the full forwarding history, resolves peer aliases for every
//! outbound channel and renders six aggregate charts to a static HTML page.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release --bin report
//! ```
//!
//! ## Environment Variables
//!
//! - LND_REST_URL - https://host:8080 REST endpoint of the LND node
//! - LND_TLS_CERT_PATH - path to the node's TLS certificate
//! - LND_MACAROON_PATH - path to a readonly macaroon
//! - REPORT_OUTPUT_PATH - output HTML path (default: report.html)
//! - HISTORY_START_TIME - unix start of the history window (default: 1514764800)
//! - SORT_DAY_SERIES - sort day-keyed series chronologically (default: false)
//! - RUST_LOG - Logging level (optional, default: info)

use lnflow::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    // NOTE: Workaround for rustls issue
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Can't set crypto provider to aws_lc_rs");

    let config = Config::from_env()?;

    log::info!("🚀 Starting lnflow report");
    log::info!("   Node: {}", config.rest_url);
    log::info!("   Output: {}", config.output_path.display());
    log::info!("   History start: {}", config.start_time);
    if config.sort_day_series {
        log::info!("   Day series: sorted chronologically");
    }

    lnflow::run(config).await
}
