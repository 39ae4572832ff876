//! Tracked addresses, indexed per chain.
//!
//! Addresses are configured as comma separated lists with an optional list of
//! labels paired by position. Entries are normalized to their EIP-55 checksum
//! form and indexed by their 20 byte value, so lookups are case-insensitive.

use std::{collections::HashMap, fmt};

use alloy::primitives::Address;
use tracing::warn;

use crate::services::filter::error::AddressBookError;

/// An address validated and rendered in checksum casing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedAddress(Address);

impl NormalizedAddress {
	/// The decoded 20 byte address
	pub fn address(&self) -> Address {
		self.0
	}

	/// EIP-55 checksum representation
	pub fn checksum(&self) -> String {
		self.0.to_checksum(None)
	}
}

impl fmt::Display for NormalizedAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.checksum())
	}
}

impl From<Address> for NormalizedAddress {
	fn from(address: Address) -> Self {
		Self(address)
	}
}

/// Validates a raw address and returns its normalized form
///
/// Surrounding whitespace and an optional `0x`/`0X` prefix are accepted. The
/// remainder must be exactly 40 hex characters; checksum casing is applied on
/// output, never required on input.
pub fn normalize(raw: &str) -> Result<NormalizedAddress, AddressBookError> {
	let trimmed = raw.trim();
	let hex_part = trimmed
		.strip_prefix("0x")
		.or_else(|| trimmed.strip_prefix("0X"))
		.unwrap_or(trimmed);

	if hex_part.len() != 40 {
		return Err(AddressBookError::invalid_address(
			raw,
			format!("expected 40 hex characters, found {}", hex_part.len()),
		));
	}
	if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
		return Err(AddressBookError::invalid_address(
			raw,
			"contains non-hex characters",
		));
	}

	let bytes =
		hex::decode(hex_part).map_err(|e| AddressBookError::invalid_address(raw, e.to_string()))?;
	Ok(NormalizedAddress(Address::from_slice(&bytes)))
}

/// A tracked address and the label shown in alerts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAddress {
	pub address: NormalizedAddress,
	/// Configured label, or the address exactly as configured
	pub label: String,
}

/// Tracked addresses of every configured chain
///
/// Immutable once built; shared between chains behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct AddressBook {
	chains: HashMap<String, HashMap<Address, TrackedAddress>>,
}

impl AddressBook {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers the addresses of one chain
	///
	/// `wallets` and `labels` are comma separated and paired by position.
	/// Blank entries are skipped, malformed ones are logged and returned, and
	/// duplicates keep the label of their first occurrence. A missing or blank
	/// label falls back to the raw address string.
	///
	/// # Returns
	/// The entries that were dropped because they are not valid addresses
	pub fn add_chain(
		&mut self,
		chain: &str,
		wallets: &str,
		labels: Option<&str>,
	) -> Vec<AddressBookError> {
		let labels: Vec<&str> = labels
			.map(|labels| labels.split(',').map(str::trim).collect())
			.unwrap_or_default();
		let entries = self.chains.entry(chain.to_string()).or_default();
		let mut rejected = Vec::new();

		for (position, raw) in wallets.split(',').enumerate() {
			let raw = raw.trim();
			if raw.is_empty() {
				continue;
			}

			let address = match normalize(raw) {
				Ok(address) => address,
				Err(e) => {
					warn!(chain = %chain, "Dropping tracked address: {}", e);
					rejected.push(e);
					continue;
				}
			};

			let label = labels
				.get(position)
				.filter(|label| !label.is_empty())
				.map_or_else(|| raw.to_string(), |label| label.to_string());

			entries
				.entry(address.address())
				.or_insert(TrackedAddress { address, label });
		}

		rejected
	}

	/// Builder style variant of [`AddressBook::add_chain`] that discards rejected entries
	pub fn with_chain(mut self, chain: &str, wallets: &str, labels: Option<&str>) -> Self {
		self.add_chain(chain, wallets, labels);
		self
	}

	/// Returns true if `address` is tracked on `chain`
	pub fn contains(&self, chain: &str, address: &Address) -> bool {
		self.get(chain, address).is_some()
	}

	/// Label of a tracked address, `None` if the address is not tracked on `chain`
	pub fn label_for(&self, chain: &str, address: &Address) -> Option<&str> {
		self.get(chain, address).map(|tracked| tracked.label.as_str())
	}

	pub fn get(&self, chain: &str, address: &Address) -> Option<&TrackedAddress> {
		self.chains.get(chain)?.get(address)
	}

	/// Slugs of every chain registered, including chains with no address
	pub fn chains(&self) -> impl Iterator<Item = &str> {
		self.chains.keys().map(String::as_str)
	}

	/// Number of distinct addresses tracked on `chain`
	pub fn tracked_count(&self, chain: &str) -> usize {
		self.chains.get(chain).map_or(0, HashMap::len)
	}

	/// Returns true if at least one address is tracked on `chain`
	pub fn is_tracking(&self, chain: &str) -> bool {
		self.tracked_count(chain) > 0
	}
}
