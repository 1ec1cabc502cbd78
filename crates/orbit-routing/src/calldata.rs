//! ABI encoding for the router's `initiateCrossChainSwap` entry point.

use crate::RoutingError;
use alloy::primitives::{aliases::U24, Address, U256};
use alloy::{sol, sol_types::SolCall};
use orbit_types::ChainId;

sol! {
	/// Orbit cross-chain swap router.
	interface IOrbitRouter {
		function initiateCrossChainSwap(
			address tokenIn,
			uint256 amountIn,
			uint256 destChainId,
			address tokenOutOnDest,
			uint24 fee,
			uint256 minAmountOut
		) external;
	}
}

/// Canonical signature the selector is derived from.
pub const SWAP_SIGNATURE: &str =
	"initiateCrossChainSwap(address,uint256,uint256,address,uint24,uint256)";

/// Selector plus six 32-byte words.
pub const CALLDATA_LEN: usize = 4 + 6 * 32;

const UINT24_MAX: u32 = (1 << 24) - 1;

/// Arguments of a router swap call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapCall {
	pub token_in: Address,
	pub amount_in: U256,
	pub dest_chain_id: ChainId,
	pub token_out: Address,
	/// Pool fee tier, must fit in a `uint24`
	pub fee: u32,
	pub min_amount_out: U256,
}

impl SwapCall {
	/// First four bytes of `keccak256(SWAP_SIGNATURE)`.
	pub fn selector() -> [u8; 4] {
		IOrbitRouter::initiateCrossChainSwapCall::SELECTOR
	}

	/// Selector followed by the ABI-encoded arguments.
	pub fn encode(&self) -> Result<Vec<u8>, RoutingError> {
		if self.fee > UINT24_MAX {
			return Err(RoutingError::Encoding(format!(
				"fee {} does not fit in uint24",
				self.fee
			)));
		}

		let call = IOrbitRouter::initiateCrossChainSwapCall {
			tokenIn: self.token_in,
			amountIn: self.amount_in,
			destChainId: U256::from(self.dest_chain_id.0),
			tokenOutOnDest: self.token_out,
			fee: U24::from(self.fee),
			minAmountOut: self.min_amount_out,
		};

		let data = call.abi_encode();
		debug_assert_eq!(data.len(), CALLDATA_LEN);
		Ok(data)
	}

	/// `0x`-prefixed hex of [`SwapCall::encode`].
	pub fn encode_hex(&self) -> Result<String, RoutingError> {
		Ok(format!("0x{}", hex::encode(self.encode()?)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::address;
	use sha3::{Digest, Keccak256};

	fn sample_call() -> SwapCall {
		SwapCall {
			token_in: address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
			amount_in: U256::from(100_000_000u64),
			dest_chain_id: ChainId::OPTIMISM,
			token_out: address!("0x4200000000000000000000000000000000000006"),
			fee: 3000,
			min_amount_out: U256::from(39_600_000_000_000_000u64),
		}
	}

	#[test]
	fn test_selector_matches_signature_hash() {
		let hash = Keccak256::digest(SWAP_SIGNATURE.as_bytes());
		assert_eq!(SwapCall::selector(), hash[..4]);
		assert_eq!(
			IOrbitRouter::initiateCrossChainSwapCall::SIGNATURE,
			SWAP_SIGNATURE
		);
	}

	#[test]
	fn test_calldata_layout() {
		let call = sample_call();
		let data = call.encode().unwrap();
		assert_eq!(data.len(), CALLDATA_LEN);
		assert_eq!(data[..4], SwapCall::selector());

		let word = |i: usize| &data[4 + i * 32..4 + (i + 1) * 32];

		// Addresses are left-padded with zeros.
		assert_eq!(word(0)[..12], [0u8; 12]);
		assert_eq!(word(0)[12..], call.token_in[..]);
		assert_eq!(word(1), U256::from(100_000_000u64).to_be_bytes::<32>());
		assert_eq!(word(2), U256::from(10u64).to_be_bytes::<32>());
		assert_eq!(word(3)[12..], call.token_out[..]);
		assert_eq!(word(4), U256::from(3000u64).to_be_bytes::<32>());
		assert_eq!(word(5), call.min_amount_out.to_be_bytes::<32>());
	}

	#[test]
	fn test_hex_encoding_length() {
		let hex = sample_call().encode_hex().unwrap();
		assert!(hex.starts_with("0x"));
		assert_eq!(hex.len(), 2 + 8 + 6 * 64);
		assert_eq!(hex[2..10], hex::encode(SwapCall::selector()));
	}

	#[test]
	fn test_encoding_is_deterministic() {
		let call = sample_call();
		assert_eq!(call.encode().unwrap(), call.encode().unwrap());
		assert_eq!(call.encode_hex().unwrap(), sample_call().encode_hex().unwrap());
	}

	#[test]
	fn test_fee_must_fit_uint24() {
		let mut call = sample_call();
		call.fee = 1 << 24;
		assert!(matches!(call.encode(), Err(RoutingError::Encoding(_))));
	}
}
