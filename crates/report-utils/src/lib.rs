//! Shared utilities for stock-report
//!
//! This crate provides common functionality used across the stock-report workspace:
//! tracing setup and helpers for reading configuration from the process environment.

pub mod env;
pub mod logging;

pub use env::{env_flag, env_var, load_dotenv};
pub use logging::init_tracing_with;
