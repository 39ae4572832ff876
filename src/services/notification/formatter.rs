//! Alert rendering.

use alloy::primitives::{Address, B256};

use crate::{
	models::{Chain, EVMTransaction},
	services::{filter::normalize, notification::MessageFormat},
	utils::{b256_to_string, format_units},
};

const CONTRACT_CREATION: &str = "Contract Creation";

/// Renders accepted transactions into alert bodies
///
/// Rendering is a pure function of its inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFormatter {
	format: MessageFormat,
}

impl NotificationFormatter {
	pub fn new(format: MessageFormat) -> Self {
		Self { format }
	}

	/// Markup dialect of the rendered messages
	pub fn format(&self) -> MessageFormat {
		self.format
	}

	/// Renders one alert
	///
	/// # Arguments
	/// * `chain` - Chain the transaction was found on
	/// * `block_number` - Block containing the transaction
	/// * `tx` - The transaction
	/// * `hash` - Decoded transaction hash
	/// * `from_label` - Label of the sender if it is tracked
	/// * `to_label` - Label of the recipient if it is tracked
	pub fn render(
		&self,
		chain: &Chain,
		block_number: u64,
		tx: &EVMTransaction,
		hash: &B256,
		from_label: Option<&str>,
		to_label: Option<&str>,
	) -> String {
		let hash_hex = b256_to_string(hash);
		let from = self.party(&tx.from, from_label);
		let to = match tx.to() {
			Some(to) => self.party(to, to_label),
			None => CONTRACT_CREATION.to_string(),
		};
		let value = format_units(tx.value, chain.decimals);

		format!(
			"🚨 {title} 🚨\n\
			 📊 Block: {block_number}\n\
			 💸 From: {from}\n\
			 💰 To: {to}\n\
			 💵 Value: {value} {symbol}\n\
			 🔗 Tx Hash: {hash}\n\
			 🌐 Explorer: {link}",
			title = self.bold(&format!("{} Wallet Transaction Detected", chain.name)),
			symbol = self.escape(&chain.native_symbol),
			hash = self.code(&hash_hex),
			link = chain.explorer_link(&hash_hex),
		)
	}

	/// Label followed by the address, or the address alone when the label
	/// is absent or is just another spelling of the address
	fn party(&self, address: &Address, label: Option<&str>) -> String {
		let checksum = self.code(&address.to_checksum(None));
		match label {
			Some(label) if !is_same_address(label, address) => {
				format!("{} ({})", self.escape(label), checksum)
			}
			_ => checksum,
		}
	}

	fn bold(&self, text: &str) -> String {
		match self.format {
			MessageFormat::Html => format!("<b>{}</b>", escape_html(text)),
			MessageFormat::Plain => text.to_string(),
		}
	}

	fn code(&self, text: &str) -> String {
		match self.format {
			MessageFormat::Html => format!("<code>{}</code>", escape_html(text)),
			MessageFormat::Plain => text.to_string(),
		}
	}

	fn escape(&self, text: &str) -> String {
		match self.format {
			MessageFormat::Html => escape_html(text),
			MessageFormat::Plain => text.to_string(),
		}
	}
}

fn is_same_address(label: &str, address: &Address) -> bool {
	normalize(label).is_ok_and(|normalized| normalized.address() == *address)
}

/// Escapes the characters Telegram's HTML parse mode treats as markup
pub fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

/// Turns text rendered for the HTML parse mode back into plain text
///
/// Tags are dropped and the entities produced by [`escape_html`] decoded.
pub fn strip_html(text: &str) -> String {
	let mut plain = String::with_capacity(text.len());
	let mut in_tag = false;
	for c in text.chars() {
		match c {
			'<' => in_tag = true,
			'>' if in_tag => in_tag = false,
			_ if !in_tag => plain.push(c),
			_ => {}
		}
	}
	plain
		.replace("&lt;", "<")
		.replace("&gt;", ">")
		.replace("&amp;", "&")
}
