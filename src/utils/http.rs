use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, Jitter, RetryTransientMiddleware};
use std::time::Duration;

/// Configuration for HTTP retry policies
#[derive(Debug, Clone)]
pub struct HttpRetryConfig {
	/// Maximum number of retries for transient errors
	pub max_retries: u32,
	/// Base duration for exponential backoff calculations
	pub base_for_backoff: u32,
	/// Initial backoff duration before the first retry
	pub initial_backoff: Duration,
	/// Maximum backoff duration for retries
	pub max_backoff: Duration,
	/// Jitter to apply to the backoff duration
	pub jitter: Jitter,
	/// Timeout of a single request attempt
	pub request_timeout: Duration,
	/// Timeout for establishing a connection
	pub connect_timeout: Duration,
}

impl Default for HttpRetryConfig {
	/// Creates a default configuration with reasonable retry settings
	fn default() -> Self {
		Self {
			max_retries: 3,
			base_for_backoff: 2,
			initial_backoff: Duration::from_millis(250),
			max_backoff: Duration::from_secs(10),
			jitter: Jitter::Full,
			request_timeout: Duration::from_secs(30),
			connect_timeout: Duration::from_secs(20),
		}
	}
}

impl HttpRetryConfig {
	/// Same timeouts as the default configuration, without any retry
	pub fn without_retries() -> Self {
		Self {
			max_retries: 0,
			..Self::default()
		}
	}

	/// Long polling requests must outlive the server side wait
	pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
		self.request_timeout = request_timeout;
		self
	}
}

/// Creates a retryable HTTP client with middleware
///
/// Transient failures (connection errors, timeouts, 5xx, 429) are retried
/// with exponential backoff; everything else is returned to the caller.
///
/// # Parameters:
/// - `config`: Configuration for retry policies and timeouts
///
/// # Returns
/// A `ClientWithMiddleware` that includes retry capabilities, or the builder
/// error if the underlying client cannot be created
pub fn create_retryable_http_client(
	config: &HttpRetryConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
	let base_client = reqwest::Client::builder()
		.pool_idle_timeout(Duration::from_secs(90))
		.pool_max_idle_per_host(10)
		.timeout(config.request_timeout)
		.connect_timeout(config.connect_timeout)
		.build()?;

	let retry_policy = ExponentialBackoff::builder()
		.base(config.base_for_backoff)
		.retry_bounds(config.initial_backoff, config.max_backoff)
		.jitter(config.jitter)
		.build_with_max_retries(config.max_retries);

	Ok(ClientBuilder::new(base_client)
		.with(RetryTransientMiddleware::new_with_policy(retry_policy))
		.build())
}

/// Placeholder written where a request URL was
pub const REDACTED_URL: &str = "<redacted url>";

/// Renders a middleware error without the request URL
///
/// Telegram bot tokens live in the URL path, so URLs must never reach the logs.
/// The retry middleware hands transport failures back wrapped in
/// `Error::Middleware`, so the wrapped `reqwest::Error` is looked up in the
/// error chain and its URL scrubbed from the rendered message.
pub fn redact_request_error(error: reqwest_middleware::Error) -> String {
	match error {
		reqwest_middleware::Error::Reqwest(e) => e.without_url().to_string(),
		reqwest_middleware::Error::Middleware(e) => {
			let message = format!("{:#}", e);
			let url = e
				.chain()
				.find_map(|cause| cause.downcast_ref::<reqwest::Error>())
				.and_then(reqwest::Error::url);
			match url {
				Some(url) => {
					let message = message.replace(url.as_str(), REDACTED_URL);
					match url.path() {
						"" | "/" => message,
						path => message.replace(path, REDACTED_URL),
					}
				}
				None => message,
			}
		}
	}
}
