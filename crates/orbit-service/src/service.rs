//! The intent pipeline: validate, parse, route.

use alloy::primitives::Address;
use orbit_chains::TokenRegistry;
use orbit_config::{OrbitConfig, PricingConfig, PricingProvider};
use orbit_intent::{
	IntentParseError, IntentParser, OpenAiCompatibleClient, OpenAiConfig, RetryPolicy,
};
use orbit_pricing::{DefiLlamaOracle, PriceOracle, StaticPriceOracle};
use orbit_routing::{RouteGenerator, RoutingConfig, RoutingError};
use orbit_types::{ErrorResponse, SwapRoute, UserIntent};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum ServiceError {
	#[error("invalid request: {0}")]
	InvalidRequest(String),

	#[error("intent parsing failed: {0}")]
	Parse(#[from] IntentParseError),

	#[error("route generation failed: {0}")]
	Routing(#[from] RoutingError),

	#[error("configuration error: {0}")]
	Configuration(String),
}

impl ServiceError {
	/// HTTP status reported for this error.
	pub fn status_code(&self) -> u16 {
		match self {
			Self::InvalidRequest(_) | Self::Parse(_) => 400,
			Self::Routing(_) | Self::Configuration(_) => 500,
		}
	}

	pub fn code(&self) -> &'static str {
		match self {
			Self::InvalidRequest(_) => "INVALID_REQUEST",
			Self::Parse(_) => "INTENT_PARSE_ERROR",
			Self::Routing(RoutingError::TokenNotSupported { .. }) => "TOKEN_NOT_SUPPORTED",
			Self::Routing(RoutingError::PriceUnavailable { .. }) => "PRICE_UNAVAILABLE",
			Self::Routing(_) => "ROUTING_ERROR",
			Self::Configuration(_) => "CONFIGURATION_ERROR",
		}
	}

	pub fn to_response(&self) -> ErrorResponse {
		ErrorResponse {
			status: self.status_code(),
			error: self.code().to_string(),
			detail: self.to_string(),
		}
	}
}

/// Runs a [`UserIntent`] through the parser and the route generator.
pub struct OrbitService {
	parser: IntentParser,
	router: RouteGenerator,
	mode: String,
}

impl OrbitService {
	pub fn new(parser: IntentParser, router: RouteGenerator) -> Self {
		Self {
			parser,
			router,
			mode: "production".to_string(),
		}
	}

	pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
		self.mode = mode.into();
		self
	}

	/// Builds the completion client, price oracle and registry from config.
	pub fn from_config(config: &OrbitConfig) -> Result<Self, ServiceError> {
		let registry = Arc::new(TokenRegistry::mainnet());

		let client = OpenAiCompatibleClient::new(OpenAiConfig {
			base_url: config.llm.base_url.clone(),
			api_key: config.llm.api_key.clone(),
			model: config.llm.model.clone(),
			timeout: config.llm.timeout(),
		})
		.map_err(|e| ServiceError::Configuration(e.to_string()))?;
		let parser = IntentParser::new(Arc::new(client)).with_retry(RetryPolicy::new(
			config.llm.max_retries,
			config.llm.retry_delay(),
		));

		let oracle = build_oracle(&config.pricing, &registry)?;
		info!(
			"Using {} pricing and model {}",
			oracle.name(),
			config.llm.model
		);

		let router = RouteGenerator::new(registry, oracle).with_config(RoutingConfig {
			slippage_bps: config.routing.slippage_bps,
			fee_tier: config.routing.fee_tier,
			estimated_gas: config.routing.estimated_gas,
			router_address: config.routing.router_address.clone(),
		});

		Ok(Self::new(parser, router).with_mode(config.server.mode.clone()))
	}

	/// Reported by `GET /`.
	pub fn mode(&self) -> &str {
		&self.mode
	}

	/// Resolves an intent into a swap route.
	///
	/// Parsing always completes before routing starts; a failure in either
	/// stage ends the request.
	#[instrument(skip_all, fields(request_id = %Uuid::new_v4(), user = %intent.user_address))]
	pub async fn solve(&self, intent: UserIntent) -> Result<SwapRoute, ServiceError> {
		if intent.is_blank() {
			warn!("Rejecting intent with empty raw_text");
			return Err(ServiceError::InvalidRequest(
				"raw_text must not be empty".to_string(),
			));
		}

		info!("Solving intent: {}", intent.raw_text);

		let parsed = self
			.parser
			.parse(&intent.raw_text)
			.await
			.inspect_err(|e| warn!("Intent parsing failed: {}", e))?;

		info!(
			confidence = parsed.confidence,
			"Parsed {} {} on {} -> {} on {}",
			parsed.amount,
			parsed.token_in_symbol,
			parsed.source_chain,
			parsed.token_out_symbol,
			parsed.destination_chain
		);

		let route = self
			.router
			.generate_route(&parsed, &intent.user_address)
			.await
			.inspect_err(|e| warn!("Route generation failed: {}", e))?;

		Ok(route)
	}
}

/// Selects the price oracle named by the pricing configuration.
///
/// Static prices may name their token by registry symbol or by address.
fn build_oracle(
	pricing: &PricingConfig,
	registry: &TokenRegistry,
) -> Result<Arc<dyn PriceOracle>, ServiceError> {
	match pricing.provider {
		PricingProvider::DefiLlama => {
			let oracle = DefiLlamaOracle::new(&pricing.base_url, pricing.timeout())
				.map_err(|e| ServiceError::Configuration(e.to_string()))?;
			Ok(Arc::new(oracle))
		},
		PricingProvider::Static => {
			let mut oracle = StaticPriceOracle::new();
			for price in &pricing.static_prices {
				let token = match price.token.parse::<Address>() {
					Ok(address) => address,
					Err(_) => {
						registry
							.resolve_token(&price.chain, &price.token)
							.map_err(|e| {
								ServiceError::Configuration(format!("static price: {e}"))
							})?
							.address
					},
				};
				oracle.insert(&price.chain, token, price.usd);
			}
			Ok(Arc::new(oracle))
		},
	}
}

#[cfg(test)]
pub(crate) mod testing {
	use super::*;
	use async_trait::async_trait;
	use orbit_intent::{CompletionClient, CompletionError, CompletionRequest};
	use orbit_pricing::StaticPriceOracle;
	use std::sync::atomic::{AtomicUsize, Ordering};

	pub const USDC_TO_ETH: &str = r#"{"token_in_symbol":"USDC","token_out_symbol":"ETH","amount":100.0,"source_chain":"Base","destination_chain":"Optimism","confidence":0.99}"#;

	/// Answers every completion with the same content.
	pub struct FixedCompletion {
		pub reply: String,
		pub calls: AtomicUsize,
	}

	#[async_trait]
	impl CompletionClient for FixedCompletion {
		async fn complete(&self, _request: &CompletionRequest) -> Result<String, CompletionError> {
			self.calls.fetch_add(1, Ordering::SeqCst);
			Ok(self.reply.clone())
		}
	}

	pub fn market(registry: &TokenRegistry) -> StaticPriceOracle {
		let usdc = registry.resolve_token("Base", "USDC").unwrap().address;
		let weth = registry.resolve_token("Optimism", "ETH").unwrap().address;
		StaticPriceOracle::new()
			.with_price("Base", usdc, 1.0)
			.with_price("Optimism", weth, 2500.0)
	}

	pub fn service_with(reply: &str, oracle: StaticPriceOracle) -> (OrbitService, Arc<FixedCompletion>) {
		let client = Arc::new(FixedCompletion {
			reply: reply.to_string(),
			calls: AtomicUsize::new(0),
		});
		let parser = IntentParser::new(client.clone()).with_retry(RetryPolicy::none());
		let router = RouteGenerator::new(Arc::new(TokenRegistry::mainnet()), Arc::new(oracle));
		(OrbitService::new(parser, router), client)
	}

	pub fn service(reply: &str) -> (OrbitService, Arc<FixedCompletion>) {
		service_with(reply, market(&TokenRegistry::mainnet()))
	}
}
