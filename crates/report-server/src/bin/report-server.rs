//! Stock report HTTP server
//!
//! # Usage
//!
//! ```bash
//! # Set up environment variables (or put them in a .env file)
//! export POLYGON_API_KEY="..."
//! export OPENAI_API_KEY="..."   # optional, omit for a raw data preview
//! export MOCK=true              # optional, synthetic reports without any API call
//!
//! cargo run --bin report-server -p report-server
//! ```

use report_server::{ReportService, ServerConfig, router};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env may carry RUST_LOG, so it is read before tracing starts
    let dotenv = report_utils::load_dotenv();
    report_utils::init_tracing_with("info,tower_http=warn");

    match dotenv {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => warn!("Failed to read .env file: {}", e),
    }

    let config = ServerConfig::from_env()?;
    let service = Arc::new(ReportService::from_config(&config)?);

    if service.is_mock() {
        warn!("MOCK=true: serving synthetic reports, no market data is fetched");
    } else {
        if !config.summarization_enabled() {
            warn!("OPENAI_API_KEY not set: reports will contain a raw data preview");
        }
        if config.polygon_api_key.is_none() {
            warn!("POLYGON_API_KEY not set: market data requests will be rejected");
        }
    }

    let app = router(service);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Server running on port {}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
