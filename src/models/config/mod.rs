//! Configuration loading and validation.
//!
//! The tracker is configured entirely through environment variables (a `.env`
//! file is loaded by the binaries before this module runs).

mod error;
mod tracker_config;

pub use error::ConfigError;
pub use tracker_config::{
	env_prefix, ChainConfig, TelegramConfig, TrackerConfig, DEFAULT_MAX_INFLIGHT_NOTIFICATIONS,
	DEFAULT_NOTIFICATION_QUEUE_SIZE, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SCAN_TIMEOUT_SECS,
	DEFAULT_TRACKED_CHAINS,
};
