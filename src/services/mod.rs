//! Core services of the tracker.
//!
//! - `blockchain`: JSON-RPC clients for the tracked chains
//! - `blockwatcher`: Block scanning and the polling loop
//! - `filter`: Tracked addresses and transaction validation
//! - `notification`: Alert rendering, dispatch and Telegram delivery

pub mod blockchain;
pub mod blockwatcher;
pub mod filter;
pub mod notification;
