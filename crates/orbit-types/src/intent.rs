//! User intents and their structured, model-extracted form.

use serde::{Deserialize, Serialize};

/// Free-text trading instruction submitted by a wallet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIntent {
	/// Instruction as typed by the user, e.g. "Swap 100 USDC to ETH on Optimism"
	pub raw_text: String,
	/// The user's wallet address
	pub user_address: String,
}

impl UserIntent {
	pub fn new(raw_text: impl Into<String>, user_address: impl Into<String>) -> Self {
		Self {
			raw_text: raw_text.into(),
			user_address: user_address.into(),
		}
	}

	/// Returns true when there is no instruction to parse.
	pub fn is_blank(&self) -> bool {
		self.raw_text.trim().is_empty()
	}
}

/// Swap parameters extracted from a [`UserIntent`].
///
/// Field names match the JSON object the language model is instructed to
/// emit, so the model output deserializes directly into this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedIntent {
	pub token_in_symbol: String,
	pub token_out_symbol: String,
	pub amount: f64,
	pub source_chain: String,
	pub destination_chain: String,
	pub confidence: f64,
}

impl ParsedIntent {
	/// Checks the value constraints serde cannot express.
	pub fn validate(&self) -> Result<(), String> {
		if self.token_in_symbol.trim().is_empty() {
			return Err("token_in_symbol is empty".to_string());
		}
		if self.token_out_symbol.trim().is_empty() {
			return Err("token_out_symbol is empty".to_string());
		}
		if self.source_chain.trim().is_empty() {
			return Err("source_chain is empty".to_string());
		}
		if self.destination_chain.trim().is_empty() {
			return Err("destination_chain is empty".to_string());
		}
		if !self.amount.is_finite() || self.amount <= 0.0 {
			return Err(format!("amount must be positive, got {}", self.amount));
		}
		if !(0.0..=1.0).contains(&self.confidence) {
			return Err(format!(
				"confidence must be within [0, 1], got {}",
				self.confidence
			));
		}
		Ok(())
	}
}
