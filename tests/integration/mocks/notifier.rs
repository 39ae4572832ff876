//! Mock implementations of notification transports.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mockall::mock;
use wallet_tracker::services::notification::{MessageFormat, NotificationError, Notifier};

mock! {
	/// Mock implementation of the notifier trait.
	pub Notifier {}

	#[async_trait]
	impl Notifier for Notifier {
		async fn notify(
			&self,
			destination: &str,
			message: &str,
			format: MessageFormat,
		) -> Result<(), NotificationError>;
	}
}

/// Messages received by a recording notifier, in delivery order
pub type Outbox = Arc<Mutex<Vec<(String, String)>>>;

/// Creates a notifier recording every message
///
/// Messages containing `fail_on` are recorded and then rejected with a
/// delivery error.
pub fn recording_notifier(fail_on: Option<&'static str>) -> (MockNotifier, Outbox) {
	let outbox: Outbox = Arc::new(Mutex::new(Vec::new()));
	let mut notifier = MockNotifier::new();

	let recorded = outbox.clone();
	notifier
		.expect_notify()
		.returning(move |destination, message, _format| {
			recorded
				.lock()
				.unwrap()
				.push((destination.to_string(), message.to_string()));
			match fail_on {
				Some(needle) if message.contains(needle) => {
					Err(NotificationError::delivery_error("Bad Request: chat not found"))
				}
				_ => Ok(()),
			}
		});

	(notifier, outbox)
}

/// Text of every recorded message
pub fn messages(outbox: &Outbox) -> Vec<String> {
	outbox
		.lock()
		.unwrap()
		.iter()
		.map(|(_, message)| message.clone())
		.collect()
}
