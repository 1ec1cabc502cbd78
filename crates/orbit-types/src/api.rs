//! HTTP API types.

use serde::{Deserialize, Serialize};

/// API error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
	/// HTTP status code
	pub status: u16,
	/// Error type/code
	pub error: String,
	/// Human-readable description, prefixed with the failing stage
	pub detail: String,
}

/// Serde module for U256 as a plain JSON integer.
///
/// Values must fit in a `u128`.
pub mod u256_serde {
	use alloy::primitives::U256;
	use serde::{
		de::{self, Visitor},
		ser::Error as _,
		Deserializer, Serializer,
	};
	use std::fmt;

	pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let value = u128::try_from(*value)
			.map_err(|_| S::Error::custom(format!("{value} does not fit in 128 bits")))?;
		serializer.serialize_u128(value)
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_u128(U256Visitor)
	}

	struct U256Visitor;

	impl Visitor<'_> for U256Visitor {
		type Value = U256;

		fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			f.write_str("a non-negative integer")
		}

		fn visit_u64<E: de::Error>(self, v: u64) -> Result<U256, E> {
			Ok(U256::from(v))
		}

		fn visit_u128<E: de::Error>(self, v: u128) -> Result<U256, E> {
			Ok(U256::from(v))
		}
	}
}
