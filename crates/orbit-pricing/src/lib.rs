//! USD price lookups for routable tokens.
//!
//! A price lookup never fails outright. When the upstream service cannot
//! answer, the oracle reports [`TokenPrice::Unavailable`] and logs the cause;
//! the route generator then aborts the route instead of pricing against zero.

use alloy::primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

pub mod implementations {
	pub mod defillama;
	pub mod fixed;
}

pub use implementations::defillama::DefiLlamaOracle;
pub use implementations::fixed::StaticPriceOracle;

/// Failure reasons behind an unavailable price.
#[derive(Error, Debug)]
pub enum PricingError {
	#[error("Network error: {0}")]
	Network(String),

	#[error("Invalid data: {0}")]
	InvalidData(String),

	#[error("Price not available: {0}")]
	PriceNotAvailable(String),
}

/// Result of a price lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenPrice {
	/// Price of one whole token in USD
	Usd(f64),
	/// The price could not be determined
	Unavailable,
}

impl TokenPrice {
	/// Wraps a reported price, treating non-positive or non-finite values as unknown.
	pub fn from_usd(price: f64) -> Self {
		if price.is_finite() && price > 0.0 {
			Self::Usd(price)
		} else {
			Self::Unavailable
		}
	}

	pub fn usd(&self) -> Option<f64> {
		match self {
			Self::Usd(price) => Some(*price),
			Self::Unavailable => None,
		}
	}

	/// The price in USD, or `0.0` when unavailable.
	pub fn as_usd(&self) -> f64 {
		self.usd().unwrap_or(0.0)
	}

	pub fn is_available(&self) -> bool {
		matches!(self, Self::Usd(_))
	}
}

/// Source of current token prices.
#[async_trait]
pub trait PriceOracle: Send + Sync {
	/// Get the name of this oracle
	fn name(&self) -> &str;

	/// Current USD price of `token` on `chain`.
	async fn get_price(&self, chain: &str, token: Address) -> TokenPrice;
}

/// Coin key in `<chain>:<address>` form with the chain name lower-cased.
pub fn price_key(chain: &str, token: Address) -> String {
	format!("{}:{}", chain.trim().to_lowercase(), token)
}
