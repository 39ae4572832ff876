//! Address book error types.

use thiserror::Error;

/// Errors raised while building the address book
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressBookError {
	/// The entry is not a 20 byte hex address
	#[error("Invalid address '{address}': {reason}")]
	InvalidAddress { address: String, reason: String },
}

impl AddressBookError {
	/// Creates a new invalid address error
	pub fn invalid_address(address: impl Into<String>, reason: impl Into<String>) -> Self {
		Self::InvalidAddress {
			address: address.into(),
			reason: reason.into(),
		}
	}
}
