//! Helpers for presenting on-chain values.

use alloy::primitives::{B256, U256};

/// Converts an amount in the smallest unit into the display unit
///
/// The result is exact: the fractional part keeps every significant digit
/// and trailing zeros are trimmed, so `10^18` wei with 18 decimals renders
/// as `1` and `1.5 * 10^18` as `1.5`.
///
/// # Arguments
/// * `value` - Amount in the smallest unit (e.g. wei)
/// * `decimals` - Exponent between the smallest and the display unit
pub fn format_units(value: U256, decimals: u8) -> String {
	let divisor = U256::from(10u64).pow(U256::from(decimals));
	let whole = value / divisor;
	let fraction = value % divisor;

	if fraction.is_zero() {
		return whole.to_string();
	}

	let padded = format!(
		"{:0>width$}",
		fraction.to_string(),
		width = decimals as usize
	);
	format!("{}.{}", whole, padded.trim_end_matches('0'))
}

/// Converts a B256 hash to its hexadecimal string representation.
///
/// # Returns
/// A string in the format "0x..." representing the hash
pub fn b256_to_string(hash: &B256) -> String {
	format!("0x{}", hex::encode(hash.as_slice()))
}

/// Decodes a 32 byte hash, with or without the "0x" prefix
///
/// Returns `None` if the string is not hex or does not decode to exactly 32 bytes.
pub fn string_to_b256(hash: &str) -> Option<B256> {
	let hex_part = hash
		.strip_prefix("0x")
		.or_else(|| hash.strip_prefix("0X"))
		.unwrap_or(hash);
	let bytes = hex::decode(hex_part).ok()?;
	(bytes.len() == B256::len_bytes()).then(|| B256::from_slice(&bytes))
}
