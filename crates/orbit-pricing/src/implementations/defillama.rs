//! DeFiLlama price oracle.
//!
//! Queries the `coins.llama.fi` current-price endpoint once per token. The
//! service is free and keyless, but it is slow at times, so every request is
//! bounded by the configured timeout.

use crate::{price_key, PriceOracle, PricingError, TokenPrice};
use alloy::primitives::Address;
use async_trait::async_trait;
use reqwest::{
	header::{HeaderMap, HeaderValue, ACCEPT},
	Client,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://coins.llama.fi";

/// DeFiLlama API response for the current prices endpoint
#[derive(Debug, Deserialize)]
struct DefiLlamaPriceResponse {
	coins: HashMap<String, CoinPrice>,
}

#[derive(Debug, Deserialize)]
struct CoinPrice {
	price: f64,
	#[allow(dead_code)]
	symbol: Option<String>,
	#[allow(dead_code)]
	confidence: Option<f64>,
}

pub struct DefiLlamaOracle {
	client: Client,
	base_url: String,
}

impl DefiLlamaOracle {
	pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, PricingError> {
		let mut headers = HeaderMap::new();
		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		let client = Client::builder()
			.default_headers(headers)
			.user_agent(concat!("orbit-agent/", env!("CARGO_PKG_VERSION")))
			.timeout(timeout)
			.build()
			.map_err(|e| PricingError::Network(format!("Failed to create HTTP client: {e}")))?;

		let base_url = base_url.into().trim_end_matches('/').to_string();
		debug!(
			"DeFiLlama oracle initialized - Base URL: {}, timeout: {:?}",
			base_url, timeout
		);

		Ok(Self { client, base_url })
	}

	async fn fetch_price(&self, key: &str) -> Result<f64, PricingError> {
		let url = format!("{}/prices/current/{}", self.base_url, key);
		debug!("Fetching price from DeFiLlama: {}", url);

		let response = self
			.client
			.get(&url)
			.send()
			.await
			.map_err(|e| PricingError::Network(format!("API request failed: {e}")))?;

		if !response.status().is_success() {
			let status = response.status();
			let body = response.text().await.unwrap_or_default();
			return Err(PricingError::Network(format!(
				"API returned error status {status}: {body}"
			)));
		}

		let payload = response
			.json::<DefiLlamaPriceResponse>()
			.await
			.map_err(|e| PricingError::InvalidData(format!("Failed to parse response: {e}")))?;

		// Keys usually echo the query verbatim, but address casing is not guaranteed.
		payload
			.coins
			.get(key)
			.or_else(|| {
				payload
					.coins
					.iter()
					.find(|(k, _)| k.eq_ignore_ascii_case(key))
					.map(|(_, v)| v)
			})
			.map(|coin| coin.price)
			.ok_or_else(|| PricingError::PriceNotAvailable(key.to_string()))
	}
}

#[async_trait]
impl PriceOracle for DefiLlamaOracle {
	fn name(&self) -> &str {
		"defillama"
	}

	async fn get_price(&self, chain: &str, token: Address) -> TokenPrice {
		let key = price_key(chain, token);
		match self.fetch_price(&key).await {
			Ok(price) => {
				let price = TokenPrice::from_usd(price);
				if !price.is_available() {
					warn!("DeFiLlama reported an unusable price for {}", key);
				}
				debug!("Price for {}: {:?}", key, price);
				price
			},
			Err(e) => {
				warn!("Price fetch failed for {}: {}", key, e);
				TokenPrice::Unavailable
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::address;
	use wiremock::matchers::{method, path};
	use wiremock::{Mock, MockServer, ResponseTemplate};

	const BASE_USDC: Address = address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");

	fn usdc_path() -> String {
		format!("/prices/current/base:{}", BASE_USDC)
	}

	async fn oracle_for(server: &MockServer) -> DefiLlamaOracle {
		DefiLlamaOracle::new(server.uri(), Duration::from_millis(500)).unwrap()
	}

	#[tokio::test]
	async fn test_get_price_success() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.and(path(usdc_path()))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"coins": {
					format!("base:{}", BASE_USDC): {
						"price": 0.9998,
						"symbol": "USDC",
						"confidence": 0.99
					}
				}
			})))
			.expect(1)
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Usd(0.9998));
	}

	#[tokio::test]
	async fn test_key_lookup_ignores_address_case() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
				"coins": {
					format!("base:{}", BASE_USDC).to_lowercase(): { "price": 1.0 }
				}
			})))
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Usd(1.0));
	}

	#[tokio::test]
	async fn test_missing_coin_is_unavailable() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(
				ResponseTemplate::new(200).set_body_json(serde_json::json!({ "coins": {} })),
			)
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Unavailable);
		assert_eq!(price.as_usd(), 0.0);
	}

	#[tokio::test]
	async fn test_error_status_is_unavailable() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
			.expect(1)
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Unavailable);
	}

	#[tokio::test]
	async fn test_malformed_body_is_unavailable() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(ResponseTemplate::new(200).set_body_string("not-json"))
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Unavailable);
	}

	#[tokio::test]
	async fn test_slow_response_times_out() {
		let server = MockServer::start().await;
		Mock::given(method("GET"))
			.respond_with(
				ResponseTemplate::new(200)
					.set_body_json(serde_json::json!({ "coins": {} }))
					.set_delay(Duration::from_secs(2)),
			)
			.mount(&server)
			.await;

		let price = oracle_for(&server).await.get_price("Base", BASE_USDC).await;
		assert_eq!(price, TokenPrice::Unavailable);
	}

	#[test]
	fn test_trailing_slash_trimmed() {
		let oracle = DefiLlamaOracle::new("https://coins.llama.fi/", Duration::from_secs(1)).unwrap();
		assert_eq!(oracle.base_url, DEFAULT_BASE_URL);
		assert_eq!(oracle.name(), "defillama");
	}
}
