//! Intent parser: model call, strict JSON decoding and schema checks.

use crate::client::{CompletionClient, CompletionError, CompletionRequest};
use crate::{prompt::SYSTEM_PROMPT, IntentParseError};
use backoff::{backoff::Backoff, ExponentialBackoff};
use orbit_types::ParsedIntent;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Retry behaviour for transient model failures.
///
/// Only transport-level failures are retried; malformed model output is
/// returned to the caller immediately. `max_retries` is the only cap: a
/// request that times out still gets its retry however long it took.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
	backoff: ExponentialBackoff,
	max_retries: u32,
}

impl Default for RetryPolicy {
	/// One retry, starting at a 250ms delay.
	fn default() -> Self {
		Self::new(1, Duration::from_millis(250))
	}
}

impl RetryPolicy {
	pub fn new(max_retries: u32, initial_delay: Duration) -> Self {
		let backoff = ExponentialBackoff {
			initial_interval: initial_delay,
			max_elapsed_time: None,
			..Default::default()
		};

		Self {
			backoff,
			max_retries,
		}
	}

	pub fn none() -> Self {
		Self::new(0, Duration::ZERO)
	}

	pub fn max_retries(&self) -> u32 {
		self.max_retries
	}
}

/// Turns free text into a [`ParsedIntent`] through a completion model.
pub struct IntentParser {
	client: Arc<dyn CompletionClient>,
	retry: RetryPolicy,
}

impl IntentParser {
	pub fn new(client: Arc<dyn CompletionClient>) -> Self {
		Self {
			client,
			retry: RetryPolicy::default(),
		}
	}

	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	/// Parses a trading instruction.
	///
	/// # Errors
	///
	/// Fails when the instruction is blank, the model call fails, or the
	/// returned content is not a JSON object matching [`ParsedIntent`].
	#[instrument(skip(self), fields(len = raw_text.len()))]
	pub async fn parse(&self, raw_text: &str) -> Result<ParsedIntent, IntentParseError> {
		let raw_text = raw_text.trim();
		if raw_text.is_empty() {
			return Err(IntentParseError::EmptyInput);
		}

		let request = CompletionRequest::json(SYSTEM_PROMPT, raw_text);
		let content = self.complete_with_retry(&request).await?;
		debug!("Model output: {}", content);

		let intent = decode_intent(&content)?;
		info!(
			token_in = %intent.token_in_symbol,
			token_out = %intent.token_out_symbol,
			amount = intent.amount,
			source = %intent.source_chain,
			destination = %intent.destination_chain,
			confidence = intent.confidence,
			"Parsed intent"
		);
		Ok(intent)
	}

	async fn complete_with_retry(
		&self,
		request: &CompletionRequest,
	) -> Result<String, CompletionError> {
		let mut backoff = self.retry.backoff.clone();
		backoff.reset();
		let mut attempts = 0;

		loop {
			match self.client.complete(request).await {
				Ok(content) => return Ok(content),
				Err(e) => {
					attempts += 1;

					if !e.is_transient() || attempts > self.retry.max_retries {
						warn!("Completion failed after {} attempt(s): {}", attempts, e);
						return Err(e);
					}

					match backoff.next_backoff() {
						Some(delay) => {
							warn!(
								"Completion failed, attempt {}/{}, retrying in {:?}: {}",
								attempts,
								self.retry.max_retries + 1,
								delay,
								e
							);
							tokio::time::sleep(delay).await;
						},
						None => {
							warn!("Completion backoff exhausted after {} attempts: {}", attempts, e);
							return Err(e);
						},
					}
				},
			}
		}
	}
}

/// Decodes model output into a validated intent.
pub fn decode_intent(content: &str) -> Result<ParsedIntent, IntentParseError> {
	let value: serde_json::Value = serde_json::from_str(content.trim())
		.map_err(|e| IntentParseError::InvalidJson(e.to_string()))?;

	let intent: ParsedIntent =
		serde_json::from_value(value).map_err(|e| IntentParseError::Schema(e.to_string()))?;

	intent.validate().map_err(IntentParseError::Schema)?;
	Ok(intent)
}
