//! Tracker configuration read from environment variables.
//!
//! Every chain listed in `TRACKED_CHAINS` is configured through variables
//! prefixed with its upper-cased slug, e.g. `ETHEREUM_RPC_URL` and
//! `ETHEREUM_WALLETS`. `ethereum` and `base` ship with presets so that only
//! the wallet list (and for Ethereum the RPC URL) has to be provided.

use std::{fmt, str::FromStr, time::Duration};

use crate::models::{
	config::error::ConfigError,
	core::{Chain, DEFAULT_NATIVE_DECIMALS},
};

/// Chains tracked when `TRACKED_CHAINS` is not set
pub const DEFAULT_TRACKED_CHAINS: &str = "ethereum,base";
/// Seconds between two polling ticks
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
/// Upper bound for one chain's scan within a tick
pub const DEFAULT_SCAN_TIMEOUT_SECS: u64 = 120;
/// Concurrent deliveries allowed by the dispatcher
pub const DEFAULT_MAX_INFLIGHT_NOTIFICATIONS: usize = 8;
/// Alerts that may wait in the dispatch queue
pub const DEFAULT_NOTIFICATION_QUEUE_SIZE: usize = 256;

const MAX_DECIMALS: u8 = 36;

/// Built-in defaults for well known chains
struct ChainPreset {
	name: &'static str,
	explorer_url: &'static str,
	rpc_url: Option<&'static str>,
	native_symbol: &'static str,
}

fn chain_preset(slug: &str) -> Option<ChainPreset> {
	match slug {
		"ethereum" => Some(ChainPreset {
			name: "Ethereum",
			explorer_url: "https://etherscan.io/tx/",
			rpc_url: None,
			native_symbol: "ETH",
		}),
		"base" => Some(ChainPreset {
			name: "Base",
			explorer_url: "https://basescan.org/tx/",
			rpc_url: Some("https://mainnet.base.org"),
			native_symbol: "ETH",
		}),
		_ => None,
	}
}

/// Telegram bot credentials and delivery options
#[derive(Clone, PartialEq, Eq)]
pub struct TelegramConfig {
	/// Bot token issued by BotFather
	pub token: String,
	/// Chat receiving every alert
	pub chat_id: String,
	/// Override for the Bot API base URL
	pub api_url: Option<String>,
	/// Disable link previews in alerts
	pub disable_web_preview: bool,
}

impl fmt::Debug for TelegramConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("TelegramConfig")
			.field("token", &"<redacted>")
			.field("chat_id", &self.chat_id)
			.field("api_url", &self.api_url)
			.field("disable_web_preview", &self.disable_web_preview)
			.finish()
	}
}

/// Raw configuration of one chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainConfig {
	pub slug: String,
	pub name: String,
	pub rpc_url: Option<String>,
	pub explorer_url: String,
	pub native_symbol: String,
	pub decimals: u8,
	/// Comma separated address list, exactly as configured
	pub wallets: String,
	/// Comma separated labels paired positionally with `wallets`
	pub labels: Option<String>,
}

impl ChainConfig {
	/// Prefix of the environment variables belonging to this chain
	pub fn env_prefix(&self) -> String {
		env_prefix(&self.slug)
	}

	/// Returns true if at least one non-blank wallet entry is configured
	pub fn has_wallets(&self) -> bool {
		self.wallets.split(',').any(|entry| !entry.trim().is_empty())
	}

	/// Builds the immutable chain description
	///
	/// # Errors
	/// Returns `ConfigError::MissingValue` when no RPC URL is known for the chain
	pub fn to_chain(&self) -> Result<Chain, ConfigError> {
		let rpc_url = self
			.rpc_url
			.clone()
			.ok_or_else(|| ConfigError::missing_value(format!("{}_RPC_URL", self.env_prefix())))?;

		Ok(Chain {
			slug: self.slug.clone(),
			name: self.name.clone(),
			rpc_url,
			explorer_url: self.explorer_url.clone(),
			native_symbol: self.native_symbol.clone(),
			decimals: self.decimals,
		})
	}
}

/// Complete tracker configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
	pub telegram: TelegramConfig,
	pub chains: Vec<ChainConfig>,
	pub poll_interval: Duration,
	pub scan_timeout: Duration,
	pub max_in_flight_notifications: usize,
	pub notification_queue_size: usize,
}

impl TrackerConfig {
	/// Loads the configuration from the process environment
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_source(|key| std::env::var(key).ok())
	}

	/// Loads the configuration from an arbitrary key/value source
	///
	/// Blank values are treated as unset.
	///
	/// # Errors
	/// * `MissingCredential` if the Telegram token or chat id is absent
	/// * `MissingValue` if an unknown chain has no explorer URL
	/// * `InvalidValue` if a numeric setting cannot be parsed or is out of range
	pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let get = |key: &str| {
			lookup(key)
				.map(|value| value.trim().to_string())
				.filter(|value| !value.is_empty())
		};

		let telegram = TelegramConfig {
			token: get("TELEGRAM_BOT_TOKEN")
				.ok_or_else(|| ConfigError::missing_credential("TELEGRAM_BOT_TOKEN"))?,
			chat_id: get("TELEGRAM_CHAT_ID")
				.ok_or_else(|| ConfigError::missing_credential("TELEGRAM_CHAT_ID"))?,
			api_url: get("TELEGRAM_API_URL"),
			disable_web_preview: parse_or("TELEGRAM_DISABLE_WEB_PREVIEW", &get, true)?,
		};

		let tracked = get("TRACKED_CHAINS").unwrap_or_else(|| DEFAULT_TRACKED_CHAINS.to_string());
		let mut slugs: Vec<String> = Vec::new();
		for slug in tracked.split(',') {
			let slug = slug.trim().to_lowercase();
			if !slug.is_empty() && !slugs.contains(&slug) {
				slugs.push(slug);
			}
		}
		if slugs.is_empty() {
			return Err(ConfigError::invalid_value(
				"TRACKED_CHAINS",
				"at least one chain must be listed",
			));
		}

		let chains = slugs
			.iter()
			.map(|slug| chain_config(slug, &get))
			.collect::<Result<Vec<_>, _>>()?;

		let poll_interval = parse_or("POLL_INTERVAL_SECS", &get, DEFAULT_POLL_INTERVAL_SECS)?;
		let scan_timeout = parse_or("SCAN_TIMEOUT_SECS", &get, DEFAULT_SCAN_TIMEOUT_SECS)?;
		let max_in_flight_notifications = parse_or(
			"MAX_INFLIGHT_NOTIFICATIONS",
			&get,
			DEFAULT_MAX_INFLIGHT_NOTIFICATIONS,
		)?;
		let notification_queue_size = parse_or(
			"NOTIFICATION_QUEUE_SIZE",
			&get,
			DEFAULT_NOTIFICATION_QUEUE_SIZE,
		)?;

		for (key, value) in [
			("POLL_INTERVAL_SECS", poll_interval as usize),
			("SCAN_TIMEOUT_SECS", scan_timeout as usize),
			("MAX_INFLIGHT_NOTIFICATIONS", max_in_flight_notifications),
			("NOTIFICATION_QUEUE_SIZE", notification_queue_size),
		] {
			if value == 0 {
				return Err(ConfigError::invalid_value(key, "must be greater than zero"));
			}
		}

		Ok(Self {
			telegram,
			chains,
			poll_interval: Duration::from_secs(poll_interval),
			scan_timeout: Duration::from_secs(scan_timeout),
			max_in_flight_notifications,
			notification_queue_size,
		})
	}

	/// Chains with at least one configured wallet
	pub fn tracked_chains(&self) -> impl Iterator<Item = &ChainConfig> {
		self.chains.iter().filter(|chain| chain.has_wallets())
	}
}

/// Environment variable prefix for a chain slug
pub fn env_prefix(slug: &str) -> String {
	slug.to_uppercase().replace('-', "_")
}

fn chain_config<G>(slug: &str, get: &G) -> Result<ChainConfig, ConfigError>
where
	G: Fn(&str) -> Option<String>,
{
	let prefix = env_prefix(slug);
	let key = |suffix: &str| format!("{}_{}", prefix, suffix);
	let preset = chain_preset(slug);

	let name = get(&key("CHAIN_NAME"))
		.or_else(|| preset.as_ref().map(|p| p.name.to_string()))
		.unwrap_or_else(|| slug.to_string());

	let explorer_url = get(&key("EXPLORER_URL"))
		.or_else(|| preset.as_ref().map(|p| p.explorer_url.to_string()))
		.ok_or_else(|| ConfigError::missing_value(key("EXPLORER_URL")))?;

	let rpc_url = get(&key("RPC_URL"))
		.or_else(|| preset.as_ref().and_then(|p| p.rpc_url.map(str::to_string)));

	let native_symbol = get(&key("NATIVE_SYMBOL"))
		.or_else(|| preset.as_ref().map(|p| p.native_symbol.to_string()))
		.unwrap_or_else(|| "ETH".to_string());

	let decimals = parse_or(&key("DECIMALS"), get, DEFAULT_NATIVE_DECIMALS)?;
	if decimals > MAX_DECIMALS {
		return Err(ConfigError::invalid_value(
			key("DECIMALS"),
			format!("must be at most {}", MAX_DECIMALS),
		));
	}

	Ok(ChainConfig {
		slug: slug.to_string(),
		name,
		rpc_url,
		explorer_url,
		native_symbol,
		decimals,
		wallets: get(&key("WALLETS")).unwrap_or_default(),
		labels: get(&key("WALLET_LABELS")),
	})
}

fn parse_or<T, G>(key: &str, get: &G, default: T) -> Result<T, ConfigError>
where
	T: FromStr,
	T::Err: fmt::Display,
	G: Fn(&str) -> Option<String>,
{
	match get(key) {
		Some(raw) => raw
			.parse::<T>()
			.map_err(|e| ConfigError::invalid_value(key, format!("'{}': {}", raw, e))),
		None => Ok(default),
	}
}
