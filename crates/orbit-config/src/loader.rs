//! Configuration loading from files and environment.

use crate::types::{OrbitConfig, PricingProvider};
use crate::ConfigError;
use regex::Regex;
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Transient model failures get at most one retry.
const MAX_LLM_RETRIES: u32 = 1;

/// Largest value representable as a uint24 fee tier.
const MAX_FEE_TIER: u32 = (1 << 24) - 1;

/// Configuration loader with environment variable substitution
pub struct ConfigLoader {
	file_path: Option<PathBuf>,
	env_prefix: String,
}

impl Default for ConfigLoader {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigLoader {
	pub fn new() -> Self {
		Self {
			file_path: None,
			env_prefix: "ORBIT_".to_string(),
		}
	}

	pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
		self.file_path = Some(path.as_ref().to_path_buf());
		self
	}

	pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.env_prefix = prefix.into();
		self
	}

	/// Loads, overrides and validates the configuration.
	///
	/// Without a file the defaults are used, so a deployment can be driven
	/// entirely by `ORBIT_*` variables.
	pub async fn load(&self) -> Result<OrbitConfig, ConfigError> {
		let mut config = match &self.file_path {
			Some(path) => self.load_from_file(path).await?,
			None => {
				info!("No configuration file given, using defaults");
				OrbitConfig::default()
			},
		};

		self.apply_env_overrides(&mut config)?;
		validate_config(&config)?;

		Ok(config)
	}

	async fn load_from_file(&self, path: &Path) -> Result<OrbitConfig, ConfigError> {
		info!("Loading configuration from {:?}", path);

		let content = tokio::fs::read_to_string(path).await.map_err(|e| {
			if e.kind() == std::io::ErrorKind::NotFound {
				ConfigError::FileNotFound(path.display().to_string())
			} else {
				ConfigError::IoError(e)
			}
		})?;

		let content = substitute_env_vars(&content)?;

		match path.extension().and_then(|s| s.to_str()) {
			Some("toml") | None => Self::from_toml(&content),
			Some("json") => Self::from_json(&content),
			Some("yaml") | Some("yml") => Self::from_yaml(&content),
			Some(other) => Err(ConfigError::ParseError(format!(
				"Unsupported config format: .{other}"
			))),
		}
	}

	pub fn from_toml(contents: &str) -> Result<OrbitConfig, ConfigError> {
		toml::from_str(contents).map_err(|e| ConfigError::ParseError(format!("TOML: {e}")))
	}

	pub fn from_json(contents: &str) -> Result<OrbitConfig, ConfigError> {
		serde_json::from_str(contents).map_err(|e| ConfigError::ParseError(format!("JSON: {e}")))
	}

	pub fn from_yaml(contents: &str) -> Result<OrbitConfig, ConfigError> {
		serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError(format!("YAML: {e}")))
	}

	fn env(&self, name: &str) -> Option<String> {
		env::var(format!("{}{}", self.env_prefix, name)).ok()
	}

	fn apply_env_overrides(&self, config: &mut OrbitConfig) -> Result<(), ConfigError> {
		if let Some(port) = self.env("HTTP_PORT") {
			debug!("Overriding HTTP port from environment");
			config.server.port = port
				.parse()
				.map_err(|e| ConfigError::ValidationError(format!("Invalid HTTP port: {e}")))?;
		}

		if let Some(level) = self.env("LOG_LEVEL") {
			debug!("Overriding log level from environment");
			config.logging.level = level;
		}

		if let Some(key) = self.env("LLM_API_KEY") {
			debug!("Overriding LLM API key from environment");
			config.llm.api_key = key;
		}

		if let Some(provider) = self.env("PRICING_PROVIDER") {
			debug!("Overriding pricing provider from environment");
			config.pricing.provider = provider
				.parse()
				.map_err(ConfigError::ValidationError)?;
		}

		Ok(())
	}
}

/// Replaces every `${VAR}` with the value of `VAR`, and `${VAR:-fallback}`
/// with `fallback` when `VAR` is unset.
fn substitute_env_vars(content: &str) -> Result<String, ConfigError> {
	let re = Regex::new(r"\$\{([^}:]+)(?::-([^}]*))?\}")
		.map_err(|e| ConfigError::ParseError(e.to_string()))?;
	let mut result = content.to_string();

	for cap in re.captures_iter(content) {
		let full_match = &cap[0];
		let var_name = &cap[1];

		let value = match (env::var(var_name), cap.get(2)) {
			(Ok(value), _) => value,
			(Err(_), Some(fallback)) => fallback.as_str().to_string(),
			(Err(_), None) => return Err(ConfigError::EnvVarNotFound(var_name.to_string())),
		};
		result = result.replace(full_match, &value);
	}

	Ok(result)
}

fn validate_config(config: &OrbitConfig) -> Result<(), ConfigError> {
	let invalid =
		|msg: String| -> Result<(), ConfigError> { Err(ConfigError::ValidationError(msg)) };

	if config.llm.api_key.trim().is_empty() {
		return invalid("llm.api_key must be set (or ORBIT_LLM_API_KEY)".to_string());
	}
	if config.llm.model.trim().is_empty() {
		return invalid("llm.model must not be empty".to_string());
	}
	if config.llm.timeout_secs == 0 {
		return invalid("llm.timeout_secs must be positive".to_string());
	}
	if config.llm.max_retries > MAX_LLM_RETRIES {
		return invalid(format!(
			"llm.max_retries must be at most {MAX_LLM_RETRIES}, got {}",
			config.llm.max_retries
		));
	}
	if config.pricing.timeout_secs == 0 {
		return invalid("pricing.timeout_secs must be positive".to_string());
	}
	if config.routing.slippage_bps >= 10_000 {
		return invalid(format!(
			"routing.slippage_bps must be below 10000, got {}",
			config.routing.slippage_bps
		));
	}
	if config.routing.fee_tier > MAX_FEE_TIER {
		return invalid(format!(
			"routing.fee_tier {} does not fit in uint24",
			config.routing.fee_tier
		));
	}

	if config.pricing.provider == PricingProvider::Static {
		if let Some(bad) = config
			.pricing
			.static_prices
			.iter()
			.find(|p| !p.usd.is_finite() || p.usd <= 0.0)
		{
			return invalid(format!(
				"static price for {} on {} must be positive",
				bad.token, bad.chain
			));
		}
	}

	Ok(())
}
