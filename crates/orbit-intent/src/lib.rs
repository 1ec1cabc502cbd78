//! Natural-language intent parsing.
//!
//! The parser hands the user's instruction to a chat-completion model with a
//! fixed instruction prompt and accepts only a strict JSON object matching
//! [`ParsedIntent`](orbit_types::ParsedIntent). Anything else is an
//! [`IntentParseError`].

use thiserror::Error;

pub mod client;
pub mod parser;
pub mod prompt;

pub mod implementations {
	pub mod openai;
}

pub use client::{ChatMessage, CompletionClient, CompletionError, CompletionRequest};
pub use implementations::openai::{OpenAiCompatibleClient, OpenAiConfig};
pub use parser::{IntentParser, RetryPolicy};
pub use prompt::SYSTEM_PROMPT;

#[derive(Error, Debug)]
pub enum IntentParseError {
	#[error("Empty instruction")]
	EmptyInput,

	#[error("Model request failed: {0}")]
	Completion(#[from] CompletionError),

	#[error("Model output is not valid JSON: {0}")]
	InvalidJson(String),

	#[error("Model output does not match the intent schema: {0}")]
	Schema(String),
}
