//! The resolved swap transaction payload.

use crate::api::u256_serde;
use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

/// Uniswap-style pool fee tier in hundredths of a basis point (0.3%).
pub const DEFAULT_FEE_TIER: u32 = 3000;

/// Static gas estimate for `initiateCrossChainSwap`; not simulated.
pub const DEFAULT_ESTIMATED_GAS: u64 = 200_000;

/// Router address used until the router contract is deployed.
pub const PLACEHOLDER_ROUTER: &str = "0xPLACEHOLDER_ROUTER";

/// A fully resolved cross-chain swap, ready to be signed by the user's wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRoute {
	/// Input token on the source chain
	pub token_in_address: Address,
	/// Output token on the destination chain
	pub token_out_address: Address,
	/// Input amount in the input token's base units
	#[serde(with = "u256_serde")]
	pub amount_in_wei: U256,
	/// Minimum acceptable output in the output token's base units
	#[serde(with = "u256_serde")]
	pub min_amount_out_wei: U256,
	/// Router contract the calldata targets
	pub router_address: String,
	/// `0x`-prefixed selector and ABI-encoded arguments
	pub calldata: String,
	pub fee_tier: u32,
	pub estimated_gas: u64,
}
