use thiserror::Error;
use tracing::info;
use tracing_subscriber::{
	fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Error, Debug)]
pub enum TracingError {
	#[error("Invalid log filter '{directive}': {reason}")]
	InvalidFilter { directive: String, reason: String },

	#[error("Failed to initialize tracing: {0}")]
	Init(String),
}

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
	/// Filter directive used when `RUST_LOG` is not set
	pub level: String,
	pub with_thread_ids: bool,
	pub with_file_and_line: bool,
	pub with_target: bool,
	pub with_span_events: FmtSpan,
	pub json_format: bool,
}

impl Default for TracingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: true,
			with_span_events: FmtSpan::NONE,
			json_format: false,
		}
	}
}

impl TracingConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_level(mut self, level: impl Into<String>) -> Self {
		self.level = level.into();
		self
	}

	pub fn with_json_format(mut self, json: bool) -> Self {
		self.json_format = json;
		self
	}

	pub fn debug() -> Self {
		Self {
			level: "debug".to_string(),
			with_thread_ids: true,
			with_file_and_line: true,
			with_target: true,
			with_span_events: FmtSpan::ENTER | FmtSpan::CLOSE,
			json_format: false,
		}
	}

	pub fn production() -> Self {
		Self {
			level: "info".to_string(),
			with_thread_ids: false,
			with_file_and_line: false,
			with_target: false,
			with_span_events: FmtSpan::CLOSE,
			json_format: true,
		}
	}

	/// Builds the level filter, preferring `RUST_LOG` when it is set.
	pub fn env_filter(&self) -> Result<EnvFilter, TracingError> {
		if let Ok(filter) = EnvFilter::try_from_default_env() {
			return Ok(filter);
		}
		EnvFilter::try_new(&self.level).map_err(|e| TracingError::InvalidFilter {
			directive: self.level.clone(),
			reason: e.to_string(),
		})
	}
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
	let filter = config.env_filter()?;
	let subscriber = tracing_subscriber::registry().with(filter);

	if config.json_format {
		let json_layer = tracing_subscriber::fmt::layer()
			.json()
			.with_span_events(config.with_span_events.clone())
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(json_layer)
			.try_init()
			.map_err(|e| TracingError::Init(e.to_string()))?;
	} else {
		let fmt_layer = tracing_subscriber::fmt::layer()
			.pretty()
			.with_span_events(config.with_span_events.clone())
			.with_thread_ids(config.with_thread_ids)
			.with_file(config.with_file_and_line)
			.with_line_number(config.with_file_and_line)
			.with_target(config.with_target);

		subscriber
			.with(fmt_layer)
			.try_init()
			.map_err(|e| TracingError::Init(e.to_string()))?;
	}

	info!(
		"Tracing initialized with filter '{}' ({})",
		config.level,
		if config.json_format { "json" } else { "pretty" }
	);
	Ok(())
}
