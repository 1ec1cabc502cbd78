//! Configuration sections.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Complete service configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
	pub server: ServerConfig,
	pub logging: LoggingConfig,
	pub llm: LlmConfig,
	pub pricing: PricingConfig,
	pub routing: RoutingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
	pub host: String,
	pub port: u16,
	/// Reported by `GET /`
	pub mode: String,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 8000,
			mode: "production".to_string(),
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
	/// Filter directive, e.g. "info" or "orbit_routing=debug,info"
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

/// OpenAI-compatible completion endpoint used for intent parsing
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
	pub base_url: String,
	pub api_key: String,
	pub model: String,
	pub timeout_secs: u64,
	/// Retries for transient failures only
	pub max_retries: u32,
	pub retry_delay_ms: u64,
}

impl LlmConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	pub fn retry_delay(&self) -> Duration {
		Duration::from_millis(self.retry_delay_ms)
	}
}

impl Default for LlmConfig {
	fn default() -> Self {
		Self {
			base_url: "https://api.groq.com/openai/v1".to_string(),
			api_key: String::new(),
			model: "meta-llama/llama-4-scout-17b-16e-instruct".to_string(),
			timeout_secs: 30,
			max_retries: 1,
			retry_delay_ms: 250,
		}
	}
}

// Keeps the key out of logs.
impl fmt::Debug for LlmConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("LlmConfig")
			.field("base_url", &self.base_url)
			.field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
			.field("model", &self.model)
			.field("timeout_secs", &self.timeout_secs)
			.field("max_retries", &self.max_retries)
			.field("retry_delay_ms", &self.retry_delay_ms)
			.finish()
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PricingProvider {
	#[default]
	DefiLlama,
	Static,
}

impl fmt::Display for PricingProvider {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DefiLlama => write!(f, "defillama"),
			Self::Static => write!(f, "static"),
		}
	}
}

impl FromStr for PricingProvider {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_lowercase().as_str() {
			"defillama" => Ok(Self::DefiLlama),
			"static" => Ok(Self::Static),
			other => Err(format!("unknown pricing provider '{other}'")),
		}
	}
}

/// A fixed USD price. `token` is either a registry symbol or a contract
/// address on `chain`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaticPrice {
	pub chain: String,
	pub token: String,
	pub usd: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
	pub provider: PricingProvider,
	pub base_url: String,
	pub timeout_secs: u64,
	/// Only read by the static provider
	pub static_prices: Vec<StaticPrice>,
}

impl PricingConfig {
	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}
}

impl Default for PricingConfig {
	fn default() -> Self {
		Self {
			provider: PricingProvider::DefiLlama,
			base_url: "https://coins.llama.fi".to_string(),
			timeout_secs: 10,
			static_prices: Vec::new(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingSettings {
	pub slippage_bps: u32,
	pub fee_tier: u32,
	pub estimated_gas: u64,
	pub router_address: String,
}

impl Default for RoutingSettings {
	fn default() -> Self {
		Self {
			slippage_bps: 100,
			fee_tier: 3000,
			estimated_gas: 200_000,
			router_address: "0xPLACEHOLDER_ROUTER".to_string(),
		}
	}
}
