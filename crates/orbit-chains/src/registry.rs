//! Static registry of supported chains and tokens.

use alloy::primitives::{address, Address};
use orbit_types::ChainId;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Canonical WETH predeploy shared by OP Stack chains.
const OP_STACK_WETH: Address = address!("0x4200000000000000000000000000000000000006");

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
	#[error("Token not supported: {symbol} on {chain}")]
	TokenNotSupported { chain: String, symbol: String },

	#[error("Chain not supported: {0}")]
	UnsupportedChain(String),

	#[error("Duplicate registry entry: {0}")]
	Duplicate(String),
}

/// A token contract and its decimal precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
	pub address: Address,
	pub decimals: u8,
}

/// A supported chain and the tokens routable on it.
#[derive(Debug, Clone)]
pub struct ChainEntry {
	/// Display name, e.g. "Optimism"
	pub name: String,
	pub chain_id: ChainId,
	tokens: HashMap<String, TokenInfo>,
}

impl ChainEntry {
	pub fn new(name: impl Into<String>, chain_id: ChainId) -> Self {
		Self {
			name: name.into(),
			chain_id,
			tokens: HashMap::new(),
		}
	}

	/// Adds a token, keyed by its upper-cased symbol.
	pub fn with_token(mut self, symbol: &str, address: Address, decimals: u8) -> Self {
		self.tokens
			.insert(symbol.to_uppercase(), TokenInfo { address, decimals });
		self
	}

	pub fn token(&self, symbol: &str) -> Option<&TokenInfo> {
		self.tokens.get(&symbol.trim().to_uppercase())
	}

	/// Symbols routable on this chain, sorted.
	pub fn symbols(&self) -> Vec<&str> {
		let mut symbols: Vec<&str> = self.tokens.keys().map(String::as_str).collect();
		symbols.sort_unstable();
		symbols
	}
}

/// Registry of supported chains, keyed by lower-cased chain name.
#[derive(Debug, Clone, Default)]
pub struct TokenRegistry {
	chains: HashMap<String, ChainEntry>,
}

impl TokenRegistry {
	/// Creates a new empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// The mainnet tables the router supports.
	///
	/// `ETH` resolves to the wrapped-ether predeploy since the router only
	/// handles ERC-20 transfers. Mode has a chain id but no routable tokens yet.
	pub fn mainnet() -> Self {
		let mut registry = Self::new();
		let chains = [
			ChainEntry::new("Base", ChainId::BASE)
				.with_token("ETH", OP_STACK_WETH, 18)
				.with_token(
					"USDC",
					address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
					6,
				),
			ChainEntry::new("Optimism", ChainId::OPTIMISM)
				.with_token("ETH", OP_STACK_WETH, 18)
				.with_token(
					"USDC",
					address!("0x0b2C639c533813f4Aa9D7837CAf992c96bdB5a88"),
					6,
				),
			ChainEntry::new("Mode", ChainId::MODE),
		];
		for chain in chains {
			let registered = registry.register(chain);
			debug_assert!(registered.is_ok(), "mainnet table: {registered:?}");
		}
		registry
	}

	/// Registers a chain.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::Duplicate`] if a chain with the same name
	/// (case-insensitive) is already registered.
	pub fn register(&mut self, chain: ChainEntry) -> Result<(), RegistryError> {
		let key = chain.name.to_lowercase();
		if self.chains.contains_key(&key) {
			return Err(RegistryError::Duplicate(chain.name));
		}
		debug!(
			"Registering chain {} ({}) with {} tokens",
			chain.name,
			chain.chain_id,
			chain.tokens.len()
		);
		self.chains.insert(key, chain);
		Ok(())
	}

	pub fn chain(&self, name: &str) -> Option<&ChainEntry> {
		self.chains.get(&name.trim().to_lowercase())
	}

	/// Resolves a token contract on a chain.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::TokenNotSupported`] when either the chain or
	/// the symbol is unknown.
	pub fn resolve_token(&self, chain: &str, symbol: &str) -> Result<&TokenInfo, RegistryError> {
		self.chain(chain)
			.and_then(|entry| entry.token(symbol))
			.ok_or_else(|| RegistryError::TokenNotSupported {
				chain: chain.to_string(),
				symbol: symbol.to_string(),
			})
	}

	/// Resolves a chain name to its chain id.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::UnsupportedChain`] for unknown chains. There
	/// is no fallback chain id.
	pub fn resolve_chain_id(&self, chain: &str) -> Result<ChainId, RegistryError> {
		self.chain(chain)
			.map(|entry| entry.chain_id)
			.ok_or_else(|| RegistryError::UnsupportedChain(chain.to_string()))
	}

	/// Registered chain names, sorted.
	pub fn chain_names(&self) -> Vec<&str> {
		let mut names: Vec<&str> = self.chains.values().map(|c| c.name.as_str()).collect();
		names.sort_unstable();
		names
	}
}
