//! Utility modules for common functionality.
//!
//! This module provides various utility functions and types that are used across
//! the application. Currently includes:
//!
//! - http: Retrying HTTP client shared by the RPC and Telegram clients
//! - logging: Logging utilities
//! - units: Value and hash formatting helpers
//! - tests: Builders for test instances of models

mod units;

pub mod http;
pub mod logging;
pub mod tests;

pub use units::*;
