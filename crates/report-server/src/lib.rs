//! Stock report backend
//!
//! Accepts a list of ticker symbols, fetches each ticker's recent daily bars
//! from Polygon concurrently, joins the per-ticker outcomes into one text blob
//! and, when an OpenAI key is configured, asks a chat model to turn that blob
//! into a short buy/sell/hold report.
//!
//! # Example
//!
//! ```rust,no_run
//! use report_server::{ReportService, ServerConfig};
//!
//! # async fn run() -> report_server::Result<()> {
//! let config = ServerConfig::builder().mock(true).build();
//! let service = ReportService::from_config(&config)?;
//!
//! let report = service.generate(&["AAPL".to_string()]).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod prompts;
pub mod report;
pub mod request;
pub mod routes;

pub use config::ServerConfig;
pub use error::{ReportError, Result};
pub use report::ReportService;
pub use request::{ReportRequest, ReportResponse};
pub use routes::router;
