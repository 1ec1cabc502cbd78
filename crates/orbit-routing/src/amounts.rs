//! Conversion between whole-token floats and integer base units.

use crate::RoutingError;
use alloy::primitives::U256;

/// Largest supported decimal precision.
pub const MAX_DECIMALS: u8 = 36;

/// Basis points in 100%.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// `2^128`, the exclusive upper bound for converted amounts.
const U128_LIMIT: f64 = 340_282_366_920_938_463_463_374_607_431_768_211_456.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
	Nearest,
	Down,
}

/// `10^decimals` as a float.
pub fn scale_factor(decimals: u8) -> Result<f64, RoutingError> {
	if decimals > MAX_DECIMALS {
		return Err(RoutingError::AmountOutOfRange(format!(
			"{decimals} decimals exceeds the supported maximum of {MAX_DECIMALS}"
		)));
	}
	Ok(10u128.pow(decimals as u32) as f64)
}

/// Converts a whole-token amount into base units.
pub fn to_base_units(amount: f64, decimals: u8, rounding: Rounding) -> Result<U256, RoutingError> {
	let scaled = amount * scale_factor(decimals)?;
	float_to_u256(scaled, rounding)
}

/// Multiplier applied to the expected output, e.g. 0.99 for 100 bps.
pub fn slippage_factor(slippage_bps: u32) -> Result<f64, RoutingError> {
	if slippage_bps >= BPS_DENOMINATOR {
		return Err(RoutingError::AmountOutOfRange(format!(
			"slippage of {slippage_bps} bps leaves no output"
		)));
	}
	Ok((BPS_DENOMINATOR - slippage_bps) as f64 / BPS_DENOMINATOR as f64)
}

/// Minimum acceptable output in base units:
/// `floor(expected_out * slippage_factor * 10^decimals)`.
pub fn min_amount_out(
	expected_out: f64,
	slippage_bps: u32,
	decimals: u8,
) -> Result<U256, RoutingError> {
	let scaled = expected_out * slippage_factor(slippage_bps)? * scale_factor(decimals)?;
	float_to_u256(scaled, Rounding::Down)
}

fn float_to_u256(value: f64, rounding: Rounding) -> Result<U256, RoutingError> {
	if !value.is_finite() || value < 0.0 {
		return Err(RoutingError::AmountOutOfRange(format!(
			"{value} is not a non-negative amount"
		)));
	}

	let rounded = match rounding {
		Rounding::Nearest => value.round(),
		Rounding::Down => value.floor(),
	};
	if rounded >= U128_LIMIT {
		return Err(RoutingError::AmountOutOfRange(format!(
			"{value} exceeds 2^128 base units"
		)));
	}

	Ok(U256::from(rounded as u128))
}
