//! OpenAI-compatible chat-completion client.
//!
//! Works against any provider exposing `POST {base_url}/chat/completions`
//! with bearer authentication. The defaults target Groq.

use crate::client::{ChatMessage, CompletionClient, CompletionError, CompletionRequest};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
	pub base_url: String,
	pub api_key: String,
	pub model: String,
	/// Bound on a single completion request
	pub timeout: Duration,
}

impl OpenAiConfig {
	pub fn new(api_key: impl Into<String>) -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			api_key: api_key.into(),
			model: DEFAULT_MODEL.to_string(),
			timeout: Duration::from_secs(30),
		}
	}
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
	model: &'a str,
	messages: &'a [ChatMessage],
	temperature: f32,
	#[serde(skip_serializing_if = "Option::is_none")]
	response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
	#[serde(rename = "type")]
	kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
	choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
	message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
	content: Option<String>,
}

pub struct OpenAiCompatibleClient {
	client: Client,
	config: OpenAiConfig,
}

impl OpenAiCompatibleClient {
	pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
		let client = Client::builder()
			.connect_timeout(Duration::from_secs(10))
			.timeout(config.timeout)
			.build()
			.map_err(|e| CompletionError::Network(format!("Failed to create HTTP client: {e}")))?;

		Ok(Self { client, config })
	}

	fn endpoint(&self) -> String {
		format!(
			"{}/chat/completions",
			self.config.base_url.trim_end_matches('/')
		)
	}
}

#[async_trait]
impl CompletionClient for OpenAiCompatibleClient {
	async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
		let body = ChatRequest {
			model: &self.config.model,
			messages: &request.messages,
			temperature: request.temperature,
			response_format: request.json_mode.then_some(ResponseFormat {
				kind: "json_object",
			}),
		};

		debug!(
			"Requesting completion from {} with model {}",
			self.config.base_url, self.config.model
		);

		let response = self
			.client
			.post(self.endpoint())
			.bearer_auth(&self.config.api_key)
			.json(&body)
			.send()
			.await
			.map_err(|e| {
				if e.is_timeout() {
					CompletionError::Timeout
				} else {
					CompletionError::Network(e.to_string())
				}
			})?;

		if !response.status().is_success() {
			let status = response.status().as_u16();
			let body = response.text().await.unwrap_or_default();
			return Err(CompletionError::Status { status, body });
		}

		let payload: ChatResponse = response
			.json()
			.await
			.map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

		payload
			.choices
			.into_iter()
			.next()
			.and_then(|choice| choice.message.content)
			.filter(|content| !content.trim().is_empty())
			.ok_or(CompletionError::EmptyCompletion)
	}
}
