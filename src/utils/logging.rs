//! Logging utilities for the application
//!
//! This module provides utilities for setting up and configuring logging for the application.
//! It uses the `tracing_subscriber` crate to configure the logging.
//!
//! The `setup_logging` function reads the environment to decide where logs go:
//! - `LOG_MODE=file` mirrors every line to `wallet_tracker.log` inside
//!   `LOG_DATA_DIR` (default `logs/`) in addition to stdout
//! - `LOG_LEVEL` (or `RUST_LOG`) sets the filter, defaulting to `info`
//!
//! The `setup_logging_with_writer` function sets up the logging for the application with a custom
//! writer.

use std::path::Path;

use tracing_appender::{
	non_blocking::WorkerGuard,
	rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
	filter::EnvFilter,
	fmt::{self, writer::MakeWriterExt},
	prelude::*,
};

/// Name of the log file written when `LOG_MODE=file`
pub const LOG_FILE_NAME: &str = "wallet_tracker.log";
/// Directory used for the log file when `LOG_DATA_DIR` is unset
pub const DEFAULT_LOG_DIR: &str = "logs/";

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Setup logging for the application
///
/// Logs always go to stdout. When `LOG_MODE=file` they are also written to a
/// file through a non-blocking writer; the returned guard must be kept alive
/// for the lifetime of the process so buffered lines are flushed on exit.
pub fn setup_logging() -> Result<Option<WorkerGuard>, BoxError> {
	let file_mode = std::env::var("LOG_MODE")
		.map(|mode| mode.eq_ignore_ascii_case("file"))
		.unwrap_or(false);

	if !file_mode {
		init_subscriber(std::io::stdout, true)?;
		return Ok(None);
	}

	let log_dir = std::env::var("LOG_DATA_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
	let appender = build_file_appender(Path::new(&log_dir))?;
	let (file_writer, guard) = tracing_appender::non_blocking(appender);

	// Escape codes would end up in the file
	init_subscriber(std::io::stdout.and(file_writer), false)?;
	Ok(Some(guard))
}

/// Setup logging for the application with a custom writer
///
/// This function sets up the logging for the application with a custom writer.
/// It uses the `tracing_subscriber` crate to configure the logging.
pub fn setup_logging_with_writer<W>(writer: W) -> Result<(), BoxError>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	init_subscriber(writer, true)
}

/// Creates the appender behind the file sink
pub fn build_file_appender(log_dir: &Path) -> Result<RollingFileAppender, BoxError> {
	std::fs::create_dir_all(log_dir)?;
	let appender = RollingFileAppender::builder()
		.rotation(Rotation::NEVER)
		.filename_prefix(LOG_FILE_NAME)
		.build(log_dir)?;
	Ok(appender)
}

fn build_filter() -> EnvFilter {
	match std::env::var("LOG_LEVEL") {
		Ok(level) if !level.trim().is_empty() => EnvFilter::new(level.trim()),
		_ => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
	}
}

fn init_subscriber<W>(writer: W, ansi: bool) -> Result<(), BoxError>
where
	W: for<'writer> tracing_subscriber::fmt::MakeWriter<'writer> + Send + Sync + 'static,
{
	tracing_subscriber::registry()
		.with(build_filter())
		.with(
			fmt::layer()
				.with_writer(writer)
				.event_format(
					fmt::format()
						.with_level(true)
						.with_target(true)
						.with_thread_ids(false)
						.with_thread_names(false)
						.with_ansi(ansi)
						.compact(),
				)
				.fmt_fields(fmt::format::PrettyFields::new()),
		)
		.try_init()?;
	Ok(())
}
