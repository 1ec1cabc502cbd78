//! Fixed-price oracle for offline runs and tests.

use crate::{price_key, PriceOracle, TokenPrice};
use alloy::primitives::Address;
use async_trait::async_trait;
use std::collections::HashMap;
use tracing::debug;

/// Serves prices from a table set up front. Tokens without an entry are
/// reported as unavailable.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceOracle {
	prices: HashMap<String, f64>,
}

impl StaticPriceOracle {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_price(mut self, chain: &str, token: Address, usd: f64) -> Self {
		self.insert(chain, token, usd);
		self
	}

	pub fn insert(&mut self, chain: &str, token: Address, usd: f64) {
		self.prices.insert(price_key(chain, token), usd);
	}

	pub fn len(&self) -> usize {
		self.prices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.prices.is_empty()
	}
}

#[async_trait]
impl PriceOracle for StaticPriceOracle {
	fn name(&self) -> &str {
		"static"
	}

	async fn get_price(&self, chain: &str, token: Address) -> TokenPrice {
		let key = price_key(chain, token);
		let price = self
			.prices
			.get(&key)
			.map(|usd| TokenPrice::from_usd(*usd))
			.unwrap_or(TokenPrice::Unavailable);
		debug!("Static price for {}: {:?}", key, price);
		price
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::address;

	#[tokio::test]
	async fn test_static_prices() {
		let weth = address!("0x4200000000000000000000000000000000000006");
		let oracle = StaticPriceOracle::new()
			.with_price("Optimism", weth, 2500.0)
			.with_price("Base", weth, 0.0);

		assert_eq!(oracle.len(), 2);
		assert_eq!(
			oracle.get_price("optimism", weth).await,
			TokenPrice::Usd(2500.0)
		);
		assert_eq!(oracle.get_price("Base", weth).await, TokenPrice::Unavailable);
		assert_eq!(oracle.get_price("Mode", weth).await, TokenPrice::Unavailable);
	}
}
