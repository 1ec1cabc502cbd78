//! Chain identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// EVM chain identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(pub u64);

impl ChainId {
	pub const OPTIMISM: Self = Self(10);
	pub const BASE: Self = Self(8453);
	pub const MODE: Self = Self(34443);
}

impl fmt::Display for ChainId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl FromStr for ChainId {
	type Err = std::num::ParseIntError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Ok(ChainId(s.parse()?))
	}
}

impl From<ChainId> for u64 {
	fn from(id: ChainId) -> Self {
		id.0
	}
}
