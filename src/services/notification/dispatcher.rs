//! Fire-and-forget alert delivery.
//!
//! Scanners submit alerts to a bounded queue and move on. A worker task pulls
//! alerts from the queue and delivers each one in its own task, with at most
//! `max_in_flight` deliveries running at once. A failed delivery is logged and
//! dropped, never retried.

use std::sync::Arc;

use tokio::{
	sync::{mpsc, Semaphore},
	task::{JoinError, JoinHandle, JoinSet},
};
use tracing::{debug, error, info, Instrument};

use crate::{
	models::Alert,
	services::notification::{MessageFormat, NotificationError, Notifier},
	utils::b256_to_string,
};

/// Delivery counters reported when the dispatcher shuts down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
	pub delivered: u64,
	pub failed: u64,
}

impl DispatchStats {
	fn record(&mut self, outcome: Result<bool, JoinError>) {
		match outcome {
			Ok(true) => self.delivered += 1,
			Ok(false) => self.failed += 1,
			Err(e) => {
				error!("Alert delivery task panicked: {}", e);
				self.failed += 1;
			}
		}
	}
}

/// Cloneable handle used by scanners to enqueue alerts
#[derive(Clone, Debug)]
pub struct AlertSink {
	tx: mpsc::Sender<Alert>,
}

impl AlertSink {
	/// Enqueues an alert, waiting only while the queue is full
	///
	/// # Errors
	/// Returns `NotificationError::InternalError` once the dispatcher has shut down
	pub async fn submit(&self, alert: Alert) -> Result<(), NotificationError> {
		self.tx
			.send(alert)
			.await
			.map_err(|_| NotificationError::internal_error("dispatch queue is closed"))
	}
}

/// Bounded delivery queue in front of a [`Notifier`]
pub struct NotificationDispatcher {
	sink: AlertSink,
	worker: JoinHandle<DispatchStats>,
}

impl NotificationDispatcher {
	/// Spawns the delivery worker
	///
	/// # Arguments
	/// * `notifier` - Transport used for every alert
	/// * `format` - Markup dialect of the rendered alerts
	/// * `queue_size` - Alerts that may wait for delivery
	/// * `max_in_flight` - Deliveries allowed to run concurrently
	pub fn start(
		notifier: Arc<dyn Notifier>,
		format: MessageFormat,
		queue_size: usize,
		max_in_flight: usize,
	) -> Self {
		let (tx, rx) = mpsc::channel(queue_size.max(1));
		let semaphore = Arc::new(Semaphore::new(max_in_flight.max(1)));
		let worker =
			tokio::spawn(run_worker(rx, notifier, format, semaphore).in_current_span());

		Self {
			sink: AlertSink { tx },
			worker,
		}
	}

	/// Returns a handle for submitting alerts
	pub fn sink(&self) -> AlertSink {
		self.sink.clone()
	}

	/// Closes the queue and waits for every queued and in-flight delivery
	///
	/// The queue only closes once every [`AlertSink`] clone has been dropped,
	/// so scanners must be dropped before calling this.
	pub async fn shutdown(self) -> DispatchStats {
		drop(self.sink);
		match self.worker.await {
			Ok(stats) => {
				info!(
					delivered = stats.delivered,
					failed = stats.failed,
					"Notification dispatcher drained"
				);
				stats
			}
			Err(e) => {
				error!("Notification dispatcher worker failed: {}", e);
				DispatchStats::default()
			}
		}
	}
}

async fn run_worker(
	mut rx: mpsc::Receiver<Alert>,
	notifier: Arc<dyn Notifier>,
	format: MessageFormat,
	semaphore: Arc<Semaphore>,
) -> DispatchStats {
	let mut deliveries = JoinSet::new();
	let mut stats = DispatchStats::default();

	while let Some(alert) = rx.recv().await {
		while let Some(outcome) = deliveries.try_join_next() {
			stats.record(outcome);
		}

		// The semaphore is never closed
		let Ok(permit) = semaphore.clone().acquire_owned().await else {
			break;
		};
		let notifier = notifier.clone();
		deliveries.spawn(
			async move {
				let _permit = permit;
				deliver(notifier.as_ref(), &alert, format).await
			}
			.in_current_span(),
		);
	}

	while let Some(outcome) = deliveries.join_next().await {
		stats.record(outcome);
	}
	stats
}

async fn deliver(notifier: &dyn Notifier, alert: &Alert, format: MessageFormat) -> bool {
	match notifier
		.notify(&alert.destination, &alert.text, format)
		.await
	{
		Ok(()) => {
			debug!(
				chain = %alert.chain_slug,
				block = alert.block_number,
				tx_hash = %b256_to_string(&alert.transaction_hash),
				"Alert delivered"
			);
			true
		}
		Err(e) => {
			error!(
				chain = %alert.chain_slug,
				block = alert.block_number,
				tx_hash = %b256_to_string(&alert.transaction_hash),
				"Failed to deliver alert: {}",
				e
			);
			false
		}
	}
}
