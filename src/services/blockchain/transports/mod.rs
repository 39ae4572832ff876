//! Network transport implementations for blockchain clients.
//!
//! Provides the JSON-RPC over HTTP transport used by the EVM client.

mod http;

pub use http::HttpTransportClient;

use crate::services::blockchain::BlockChainError;
use serde_json::{json, Value};

/// Base trait for all blockchain transport clients
#[async_trait::async_trait]
pub trait BlockchainTransport: Send + Sync {
	/// Get the URL used by the transport
	fn get_current_url(&self) -> &str;

	/// Send a raw JSON-RPC request and return the whole response object
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, BlockChainError>;

	/// Customizes the request for specific blockchain requirements
	fn customize_request(&self, method: &str, params: Option<Value>) -> Value {
		// Default implementation for JSON-RPC
		json!({
			"jsonrpc": "2.0",
			"id": 1,
			"method": method,
			"params": params.unwrap_or_else(|| json!([]))
		})
	}
}
