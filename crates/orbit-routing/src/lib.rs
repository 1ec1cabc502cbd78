//! Route generation for parsed swap intents.
//!
//! Resolves symbols to token contracts, converts amounts to base units,
//! prices the destination output with a fixed slippage tolerance, and
//! encodes the router call.
//!
//! # Numeric model
//!
//! Price ratios are computed in `f64` and converted to integer base units
//! only at the last step: `expected_out * (1 - slippage) * 10^decimals`,
//! evaluated left to right and then floored. The input amount is rounded to
//! the nearest base unit.

use alloy::primitives::Address;
use orbit_chains::RegistryError;
use thiserror::Error;

pub mod amounts;
pub mod calldata;
pub mod generator;

pub use calldata::{SwapCall, CALLDATA_LEN, SWAP_SIGNATURE};
pub use generator::{RouteGenerator, RoutingConfig};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
	#[error("Token not supported: {symbol} on {chain}")]
	TokenNotSupported { chain: String, symbol: String },

	#[error("Chain not supported: {0}")]
	UnsupportedChain(String),

	#[error("Price unavailable for {token} on {chain}")]
	PriceUnavailable { chain: String, token: Address },

	#[error("Amount out of range: {0}")]
	AmountOutOfRange(String),

	#[error("Encoding error: {0}")]
	Encoding(String),

	#[error("Registry error: {0}")]
	Registry(String),
}

impl From<RegistryError> for RoutingError {
	fn from(err: RegistryError) -> Self {
		match err {
			RegistryError::TokenNotSupported { chain, symbol } => {
				Self::TokenNotSupported { chain, symbol }
			},
			RegistryError::UnsupportedChain(chain) => Self::UnsupportedChain(chain),
			other => Self::Registry(other.to_string()),
		}
	}
}
