//! Chat-completion client abstraction.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
	#[error("Network error: {0}")]
	Network(String),

	#[error("Request timed out")]
	Timeout,

	#[error("Provider returned status {status}: {body}")]
	Status { status: u16, body: String },

	#[error("Empty completion")]
	EmptyCompletion,

	#[error("Invalid provider response: {0}")]
	InvalidResponse(String),
}

impl CompletionError {
	/// Whether retrying the same request may succeed.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Network(_) | Self::Timeout => true,
			Self::Status { status, .. } => *status == 429 || *status >= 500,
			Self::EmptyCompletion | Self::InvalidResponse(_) => false,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
	pub role: String,
	pub content: String,
}

impl ChatMessage {
	pub fn system(content: impl Into<String>) -> Self {
		Self {
			role: "system".to_string(),
			content: content.into(),
		}
	}

	pub fn user(content: impl Into<String>) -> Self {
		Self {
			role: "user".to_string(),
			content: content.into(),
		}
	}
}

/// A deterministic, JSON-mode completion request.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
	pub messages: Vec<ChatMessage>,
	pub temperature: f32,
	/// Ask the provider to constrain output to a JSON object
	pub json_mode: bool,
}

impl CompletionRequest {
	pub fn json(system: &str, user: &str) -> Self {
		Self {
			messages: vec![ChatMessage::system(system), ChatMessage::user(user)],
			temperature: 0.0,
			json_mode: true,
		}
	}
}

/// A language-model completion endpoint.
#[async_trait]
pub trait CompletionClient: Send + Sync {
	/// Returns the text content of the first completion choice.
	async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
