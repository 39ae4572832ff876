//! Core domain models for the wallet tracker.
//!
//! - Chains: monitored networks and how to present them
//! - Alerts: rendered notifications on their way to the transport

mod alert;
mod chain;

pub use alert::Alert;
pub use chain::{Chain, DEFAULT_NATIVE_DECIMALS};
