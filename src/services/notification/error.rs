//! Notification error types and handling.
//!
//! Provides error types for notification-related operations,
//! including delivery failures and configuration problems.

use thiserror::Error;

/// Represents possible errors during notification operations
#[derive(Debug, Error)]
pub enum NotificationError {
	/// The transport did not accept the message
	#[error("Delivery error: {0}")]
	DeliveryError(String),
	/// Configuration-related errors
	#[error("Config error: {0}")]
	ConfigError(String),
	/// Internal errors (e.g. the dispatch queue is closed)
	#[error("Internal error: {0}")]
	InternalError(String),
}

impl NotificationError {
	/// Creates a new delivery error
	pub fn delivery_error(msg: impl Into<String>) -> Self {
		Self::DeliveryError(msg.into())
	}

	/// Creates a new configuration error
	pub fn config_error(msg: impl Into<String>) -> Self {
		Self::ConfigError(msg.into())
	}

	/// Creates a new internal error
	pub fn internal_error(msg: impl Into<String>) -> Self {
		Self::InternalError(msg.into())
	}
}
