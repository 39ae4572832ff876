//! HTTP transport implementation for blockchain interactions.
//!
//! This module provides an HTTP client for talking JSON-RPC to a single node:
//! - Connection pooling and reuse
//! - Retries with exponential backoff on transient failures
//! - JSON-RPC error objects surfaced as request errors

use async_trait::async_trait;
use reqwest_middleware::ClientWithMiddleware;
use serde_json::Value;
use url::Url;

use crate::{
	services::blockchain::{transports::BlockchainTransport, BlockChainError},
	utils::http::{create_retryable_http_client, redact_request_error, HttpRetryConfig},
};

/// Basic HTTP transport client for blockchain interactions
///
/// The client is cheap to clone and can be shared across multiple tasks.
#[derive(Clone, Debug)]
pub struct HttpTransportClient {
	/// HTTP client with retry middleware
	client: ClientWithMiddleware,
	/// RPC endpoint
	url: Url,
}

impl HttpTransportClient {
	/// Creates a new HTTP transport client for one RPC endpoint
	///
	/// No request is sent here; an unreachable node shows up on the first call.
	///
	/// # Arguments
	/// * `rpc_url` - JSON-RPC endpoint of the node
	/// * `retry_config` - Timeouts and retry policy for every request
	///
	/// # Returns
	/// * `Result<Self, BlockChainError>` - New client instance or configuration error
	pub fn new(rpc_url: &str, retry_config: &HttpRetryConfig) -> Result<Self, BlockChainError> {
		let url = Url::parse(rpc_url).map_err(|e| {
			BlockChainError::internal_error(format!("Invalid RPC URL '{}': {}", rpc_url, e))
		})?;

		let client = create_retryable_http_client(retry_config).map_err(|e| {
			BlockChainError::internal_error(format!("Failed to create HTTP client: {}", e))
		})?;

		Ok(Self { client, url })
	}
}

#[async_trait]
impl BlockchainTransport for HttpTransportClient {
	fn get_current_url(&self) -> &str {
		self.url.as_str()
	}

	/// Sends a JSON-RPC request to the blockchain node
	///
	/// # Errors
	/// - `ConnectionError` when the node cannot be reached or answers with a non-success status
	/// - `RequestError` when the body is not JSON or carries a JSON-RPC `error` object
	async fn send_raw_request(
		&self,
		method: &str,
		params: Option<Value>,
	) -> Result<Value, BlockChainError> {
		let request_body = self.customize_request(method, params);

		let response = self
			.client
			.post(self.url.clone())
			.header("Content-Type", "application/json")
			.json(&request_body)
			.send()
			.await
			.map_err(|e| {
				BlockChainError::connection_error(format!(
					"{} failed: {}",
					method,
					redact_request_error(e)
				))
			})?;

		let status = response.status();
		if !status.is_success() {
			return Err(BlockChainError::connection_error(format!(
				"{} failed with HTTP status {}",
				method, status
			)));
		}

		let json: Value = response.json().await.map_err(|e| {
			BlockChainError::request_error(format!(
				"{} returned an invalid body: {}",
				method,
				e.without_url()
			))
		})?;

		if let Some(error) = json.get("error") {
			return Err(BlockChainError::request_error(format!(
				"{} returned an error: {}",
				method, error
			)));
		}

		Ok(json)
	}
}
