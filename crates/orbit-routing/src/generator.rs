//! Route generator: registry lookups, pricing, amounts and calldata.

use crate::amounts::{self, Rounding};
use crate::calldata::SwapCall;
use crate::RoutingError;
use alloy::primitives::Address;
use orbit_chains::TokenRegistry;
use orbit_pricing::PriceOracle;
use orbit_types::{
	ParsedIntent, SwapRoute, DEFAULT_ESTIMATED_GAS, DEFAULT_FEE_TIER, PLACEHOLDER_ROUTER,
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Tunables for route generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingConfig {
	/// Slippage tolerance applied to the expected output
	pub slippage_bps: u32,
	/// Pool fee tier passed to the router
	pub fee_tier: u32,
	/// Gas estimate reported with every route
	pub estimated_gas: u64,
	/// Router contract the calldata targets
	pub router_address: String,
}

impl Default for RoutingConfig {
	fn default() -> Self {
		Self {
			slippage_bps: 100,
			fee_tier: DEFAULT_FEE_TIER,
			estimated_gas: DEFAULT_ESTIMATED_GAS,
			router_address: PLACEHOLDER_ROUTER.to_string(),
		}
	}
}

pub struct RouteGenerator {
	registry: Arc<TokenRegistry>,
	oracle: Arc<dyn PriceOracle>,
	config: RoutingConfig,
}

impl RouteGenerator {
	pub fn new(registry: Arc<TokenRegistry>, oracle: Arc<dyn PriceOracle>) -> Self {
		Self {
			registry,
			oracle,
			config: RoutingConfig::default(),
		}
	}

	pub fn with_config(mut self, config: RoutingConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &RoutingConfig {
		&self.config
	}

	/// Resolves a parsed intent into a signed-ready swap route.
	///
	/// All registry lookups happen before any price is fetched, and the
	/// input price is fetched before the output price.
	///
	/// # Errors
	///
	/// - [`RoutingError::TokenNotSupported`] if either symbol is unknown on its chain
	/// - [`RoutingError::UnsupportedChain`] if the destination chain has no chain id
	/// - [`RoutingError::PriceUnavailable`] if either price cannot be determined
	/// - [`RoutingError::AmountOutOfRange`] if an amount cannot be expressed in base units
	#[instrument(skip_all, fields(user = %user_address))]
	pub async fn generate_route(
		&self,
		intent: &ParsedIntent,
		user_address: &str,
	) -> Result<SwapRoute, RoutingError> {
		let src_chain = intent.source_chain.as_str();
		let dst_chain = intent.destination_chain.as_str();

		let token_in = *self
			.registry
			.resolve_token(src_chain, &intent.token_in_symbol)?;
		let token_out = *self
			.registry
			.resolve_token(dst_chain, &intent.token_out_symbol)?;
		let dest_chain_id = self.registry.resolve_chain_id(dst_chain)?;

		let amount_in_wei = amounts::to_base_units(intent.amount, token_in.decimals, Rounding::Nearest)?;

		let price_in = self.fetch_price(src_chain, token_in.address).await?;
		let price_out = self.fetch_price(dst_chain, token_out.address).await?;

		let expected_out = intent.amount * price_in / price_out;
		let min_amount_out_wei =
			amounts::min_amount_out(expected_out, self.config.slippage_bps, token_out.decimals)?;
		debug!(
			price_in,
			price_out, expected_out, "Computed expected output"
		);

		let call = SwapCall {
			token_in: token_in.address,
			amount_in: amount_in_wei,
			dest_chain_id,
			token_out: token_out.address,
			fee: self.config.fee_tier,
			min_amount_out: min_amount_out_wei,
		};
		let calldata = call.encode_hex()?;

		info!(
			"Route generated: {} {} on {} -> {} on {} (chain {}), min out {}",
			intent.amount,
			intent.token_in_symbol,
			src_chain,
			intent.token_out_symbol,
			dst_chain,
			dest_chain_id,
			min_amount_out_wei
		);

		Ok(SwapRoute {
			token_in_address: token_in.address,
			token_out_address: token_out.address,
			amount_in_wei,
			min_amount_out_wei,
			router_address: self.config.router_address.clone(),
			calldata,
			fee_tier: self.config.fee_tier,
			estimated_gas: self.config.estimated_gas,
		})
	}

	async fn fetch_price(&self, chain: &str, token: Address) -> Result<f64, RoutingError> {
		self.oracle.get_price(chain, token).await.usd().ok_or_else(|| {
			warn!(
				"No usable {} price for {} on {}",
				self.oracle.name(),
				token,
				chain
			);
			RoutingError::PriceUnavailable {
				chain: chain.to_string(),
				token,
			}
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy::primitives::{address, U256};
	use async_trait::async_trait;
	use orbit_pricing::{StaticPriceOracle, TokenPrice};
	use std::sync::Mutex;

	const BASE_USDC: Address = address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913");
	const OP_USDC: Address = address!("0x0b2C639c533813f4Aa9D7837CAf992c96bdB5a88");
	const WETH: Address = address!("0x4200000000000000000000000000000000000006");

	/// Records every lookup and answers from a static table.
	struct RecordingOracle {
		inner: StaticPriceOracle,
		lookups: Mutex<Vec<(String, Address)>>,
	}

	impl RecordingOracle {
		fn new(inner: StaticPriceOracle) -> Arc<Self> {
			Arc::new(Self {
				inner,
				lookups: Mutex::new(Vec::new()),
			})
		}

		fn lookups(&self) -> Vec<(String, Address)> {
			self.lookups.lock().unwrap().clone()
		}
	}

	#[async_trait]
	impl PriceOracle for RecordingOracle {
		fn name(&self) -> &str {
			"recording"
		}

		async fn get_price(&self, chain: &str, token: Address) -> TokenPrice {
			self.lookups.lock().unwrap().push((chain.to_string(), token));
			self.inner.get_price(chain, token).await
		}
	}

	fn market() -> StaticPriceOracle {
		StaticPriceOracle::new()
			.with_price("Base", BASE_USDC, 1.0)
			.with_price("Optimism", OP_USDC, 1.0)
			.with_price("Base", WETH, 2500.0)
			.with_price("Optimism", WETH, 2500.0)
	}

	fn generator(oracle: Arc<RecordingOracle>) -> RouteGenerator {
		RouteGenerator::new(Arc::new(TokenRegistry::mainnet()), oracle)
	}

	fn intent(token_in: &str, token_out: &str, amount: f64, src: &str, dst: &str) -> ParsedIntent {
		ParsedIntent {
			token_in_symbol: token_in.to_string(),
			token_out_symbol: token_out.to_string(),
			amount,
			source_chain: src.to_string(),
			destination_chain: dst.to_string(),
			confidence: 0.99,
		}
	}

	#[tokio::test]
	async fn test_usdc_to_eth_on_optimism() {
		let oracle = RecordingOracle::new(market());
		let route = generator(oracle.clone())
			.generate_route(&intent("USDC", "ETH", 100.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap();

		assert_eq!(route.token_in_address, BASE_USDC);
		assert_eq!(route.token_out_address, WETH);
		assert_eq!(route.amount_in_wei, U256::from(100_000_000u64));
		// 100 USDC at $1 buys 0.04 ETH at $2500, less 1%.
		assert_eq!(
			route.min_amount_out_wei,
			U256::from((100.0f64 * 1.0 / 2500.0 * 0.99 * 1e18).floor() as u128)
		);
		assert_eq!(route.fee_tier, 3000);
		assert_eq!(route.estimated_gas, 200_000);
		assert_eq!(route.router_address, PLACEHOLDER_ROUTER);
		assert_eq!(route.calldata.len(), 2 + 2 * crate::CALLDATA_LEN);

		assert_eq!(
			oracle.lookups(),
			vec![
				("Base".to_string(), BASE_USDC),
				("Optimism".to_string(), WETH)
			]
		);
	}

	#[tokio::test]
	async fn test_eth_amount_uses_18_decimals() {
		let oracle = RecordingOracle::new(market());
		let route = generator(oracle)
			.generate_route(&intent("ETH", "USDC", 100.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap();

		assert_eq!(route.amount_in_wei, U256::from(100u128 * 10u128.pow(18)));
		assert_eq!(route.token_out_address, OP_USDC);
		// 100 ETH at $2500 is 250,000 USDC, less 1%, in 6 decimals.
		assert_eq!(route.min_amount_out_wei, U256::from(247_500_000_000u64));
	}

	#[tokio::test]
	async fn test_slippage_on_unit_expected_output() {
		let oracle = RecordingOracle::new(market());
		let route = generator(oracle)
			.generate_route(&intent("ETH", "ETH", 1.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap();

		assert_eq!(
			route.min_amount_out_wei,
			U256::from((0.99f64 * 1e18).floor() as u128)
		);
	}

	#[tokio::test]
	async fn test_missing_output_price_fails_without_route() {
		let oracle = RecordingOracle::new(
			StaticPriceOracle::new().with_price("Base", BASE_USDC, 1.0),
		);
		let err = generator(oracle.clone())
			.generate_route(&intent("USDC", "ETH", 100.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap_err();

		assert_eq!(
			err,
			RoutingError::PriceUnavailable {
				chain: "Optimism".to_string(),
				token: WETH,
			}
		);
		assert_eq!(oracle.lookups().len(), 2);
	}

	#[tokio::test]
	async fn test_missing_input_price_fails() {
		let oracle = RecordingOracle::new(
			StaticPriceOracle::new().with_price("Optimism", WETH, 2500.0),
		);
		let err = generator(oracle)
			.generate_route(&intent("USDC", "ETH", 100.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap_err();
		assert!(matches!(err, RoutingError::PriceUnavailable { token, .. } if token == BASE_USDC));
	}

	#[tokio::test]
	async fn test_unsupported_token_skips_pricing() {
		let oracle = RecordingOracle::new(market());
		let err = generator(oracle.clone())
			.generate_route(&intent("DEGEN", "ETH", 5.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap_err();

		assert_eq!(
			err,
			RoutingError::TokenNotSupported {
				chain: "Base".to_string(),
				symbol: "DEGEN".to_string(),
			}
		);
		assert!(oracle.lookups().is_empty());
	}

	#[tokio::test]
	async fn test_unknown_destination_chain() {
		let oracle = RecordingOracle::new(market());
		let err = generator(oracle.clone())
			.generate_route(&intent("USDC", "ETH", 5.0, "Base", "Zora"), "0xabc")
			.await
			.unwrap_err();

		assert!(matches!(err, RoutingError::TokenNotSupported { ref chain, .. } if chain == "Zora"));
		assert!(oracle.lookups().is_empty());
	}

	#[tokio::test]
	async fn test_custom_routing_config() {
		let oracle = RecordingOracle::new(market());
		let config = RoutingConfig {
			slippage_bps: 50,
			fee_tier: 500,
			estimated_gas: 250_000,
			router_address: "0x1111111111111111111111111111111111111111".to_string(),
		};
		let route = generator(oracle)
			.with_config(config.clone())
			.generate_route(&intent("USDC", "USDC", 10.0, "Base", "Optimism"), "0xabc")
			.await
			.unwrap();

		assert_eq!(route.fee_tier, 500);
		assert_eq!(route.estimated_gas, 250_000);
		assert_eq!(route.router_address, config.router_address);
		assert_eq!(
			route.min_amount_out_wei,
			U256::from((10.0f64 * 0.995 * 1e6).floor() as u64)
		);
	}

	#[tokio::test]
	async fn test_same_intent_same_calldata() {
		let oracle = RecordingOracle::new(market());
		let generator = generator(oracle);
		let request = intent("USDC", "ETH", 100.0, "Base", "Optimism");
		let first = generator.generate_route(&request, "0xabc").await.unwrap();
		let second = generator.generate_route(&request, "0xabc").await.unwrap();
		assert_eq!(first.calldata, second.calldata);
	}
}
