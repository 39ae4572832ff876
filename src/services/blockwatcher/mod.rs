//! Block watching functionality.
//!
//! Scans configured chains for new blocks and drives the polling loop:
//! - Per-chain scanners owning the block cursor
//! - The tracker loop with its shutdown handling
//! - Error types for scan failures

mod error;
mod scanner;
mod service;

pub use error::BlockWatcherError;
pub use scanner::{BlockScanner, ScanSummary};
pub use service::{
	ChainScanOutcome, LoopSettings, TrackerLoop, TrackerState, TRACKING_STARTED_MESSAGE,
	TRACKING_STOPPED_MESSAGE,
};
