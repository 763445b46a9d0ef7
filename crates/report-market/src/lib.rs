//! Market-data access for stock-report
//!
//! Fetches a short trailing window of daily aggregate bars per ticker. Each
//! ticker yields an independent [`TickerResult`]: either the provider's raw
//! JSON or the HTTP status it failed with. Transport failures are returned
//! as errors instead, so callers can treat them differently.

pub mod error;
pub mod polygon;
pub mod source;
pub mod window;

pub use error::{MarketError, Result};
pub use polygon::{PolygonClient, PolygonConfig};
pub use source::{MarketDataSource, TickerResult};
pub use window::DateWindow;
