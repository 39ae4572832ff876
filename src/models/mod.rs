//! Domain models and data structures for wallet tracking.
//!
//! This module contains all the core data structures used throughout the application:
//!
//! - `blockchain`: EVM block, transaction and receipt payloads
//! - `config`: Configuration loading and validation
//! - `core`: Core domain models (Chain, Alert)

mod blockchain;
mod config;
mod core;

// Re-export blockchain types
pub use blockchain::evm::{EVMBlock, EVMTransaction, EVMTransactionReceipt};

// Re-export core types
pub use core::{Alert, Chain, DEFAULT_NATIVE_DECIMALS};

// Re-export config types
pub use config::{
	env_prefix, ChainConfig, ConfigError, TelegramConfig, TrackerConfig,
	DEFAULT_MAX_INFLIGHT_NOTIFICATIONS, DEFAULT_NOTIFICATION_QUEUE_SIZE,
	DEFAULT_POLL_INTERVAL_SECS, DEFAULT_SCAN_TIMEOUT_SECS, DEFAULT_TRACKED_CHAINS,
};
