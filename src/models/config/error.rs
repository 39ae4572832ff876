//! Configuration error types.
//!
//! This module defines the error types that can occur while reading the
//! tracker configuration from the environment.

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
	/// A credential the tracker cannot run without is absent
	#[error("Missing credential: {0} must be set")]
	MissingCredential(String),

	/// A required, non-secret setting is absent
	#[error("Missing value: {0} must be set")]
	MissingValue(String),

	/// A setting is present but cannot be used
	#[error("Invalid value for {key}: {message}")]
	InvalidValue { key: String, message: String },
}

impl ConfigError {
	/// Create a new missing credential error
	pub fn missing_credential(key: impl Into<String>) -> Self {
		Self::MissingCredential(key.into())
	}

	/// Create a new missing value error
	pub fn missing_value(key: impl Into<String>) -> Self {
		Self::MissingValue(key.into())
	}

	/// Create a new invalid value error
	pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidValue {
			key: key.into(),
			message: message.into(),
		}
	}
}
