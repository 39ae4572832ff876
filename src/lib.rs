//! Wallet tracker library.
//!
//! Watches a set of addresses on one or more EVM chains and reports every
//! new transaction sent from or to them to a Telegram chat.
//!
//! - `bootstrap`: Wiring configuration into a running tracker
//! - `models`: Chain payloads, configuration and domain types
//! - `services`: Scanning, filtering and notification services
//! - `utils`: Logging, HTTP and formatting helpers

pub mod bootstrap;
pub mod models;
pub mod services;
pub mod utils;
