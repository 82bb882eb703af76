//! Raw on-chain integer amounts and decimal scaling
//!
//! Chains report token amounts as unscaled integers in several wire shapes:
//! `0x`-prefixed hex quantities (EVM, Starknet), decimal strings (Cosmos, Sui,
//! Hedera, ...) and plain JSON numbers (Algorand, Liquid). All of them are
//! parsed into an arbitrary-precision [`RawAmount`] and only converted to
//! floating point after the decimal exponent has been applied, so supplies far
//! above 2^53 keep their leading digits.

use std::fmt;

use num_bigint::{BigInt, BigUint, Sign};
use serde_json::Value;
use thiserror::Error;

/// Malformed or out-of-range numeric/address data found in a response
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	#[error("missing field: {field}")]
	MissingField { field: String },

	#[error("invalid integer '{value}': {reason}")]
	InvalidInteger { value: String, reason: String },

	#[error("negative amount '{value}'")]
	Negative { value: String },

	#[error("invalid decimal amount '{value}'")]
	InvalidDecimal { value: String },

	#[error("invalid base58 character '{character}'")]
	InvalidBase58Char { character: char },

	#[error("invalid address: {reason}")]
	InvalidAddress { reason: String },

	#[error("unexpected response shape: {reason}")]
	UnexpectedShape { reason: String },

	#[error("decimals {decimals} exceed the maximum of {max}")]
	DecimalsOutOfRange { decimals: u32, max: u32 },
}

impl DecodeError {
	pub fn missing(field: impl Into<String>) -> Self {
		Self::MissingField {
			field: field.into(),
		}
	}

	pub fn shape(reason: impl Into<String>) -> Self {
		Self::UnexpectedShape {
			reason: reason.into(),
		}
	}

	fn invalid_integer(value: &str, reason: &str) -> Self {
		Self::InvalidInteger {
			value: value.to_string(),
			reason: reason.to_string(),
		}
	}
}

/// Largest decimal exponent accepted when scaling; 10^77 already exceeds 2^256
pub const MAX_DECIMALS: u32 = 77;

/// Unscaled, non-negative on-chain integer amount
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RawAmount(BigUint);

impl RawAmount {
	pub fn new(value: BigUint) -> Self {
		Self(value)
	}

	/// Parse a `0x`-prefixed hex quantity such as an `eth_call` result
	pub fn from_hex(value: &str) -> Result<Self, DecodeError> {
		let trimmed = value.trim();
		if trimmed.starts_with('-') {
			return Err(DecodeError::Negative {
				value: value.to_string(),
			});
		}
		let digits = trimmed
			.strip_prefix("0x")
			.or_else(|| trimmed.strip_prefix("0X"))
			.ok_or_else(|| DecodeError::invalid_integer(value, "missing 0x prefix"))?;
		if digits.is_empty() {
			return Err(DecodeError::invalid_integer(value, "empty hex quantity"));
		}
		BigUint::parse_bytes(digits.as_bytes(), 16)
			.map(Self)
			.ok_or_else(|| DecodeError::invalid_integer(value, "not a hex number"))
	}

	/// Parse a base-10 integer string; a leading minus sign is rejected as corrupt data
	pub fn from_decimal_str(value: &str) -> Result<Self, DecodeError> {
		let trimmed = value.trim();
		if trimmed.is_empty() {
			return Err(DecodeError::invalid_integer(value, "empty string"));
		}
		let parsed = BigInt::parse_bytes(trimmed.as_bytes(), 10)
			.ok_or_else(|| DecodeError::invalid_integer(value, "not a decimal integer"))?;
		Self::try_from(parsed).map_err(|_| DecodeError::Negative {
			value: value.to_string(),
		})
	}

	/// Accept either a decimal/hex string or a non-negative JSON integer
	pub fn from_json(value: &Value) -> Result<Self, DecodeError> {
		match value {
			Value::String(text) if text.starts_with("0x") => Self::from_hex(text),
			Value::String(text) => Self::from_decimal_str(text),
			Value::Number(number) => {
				if let Some(unsigned) = number.as_u64() {
					Ok(Self::from(unsigned))
				} else if number.as_i64().is_some() {
					Err(DecodeError::Negative {
						value: number.to_string(),
					})
				} else {
					// Large integers outside u64 still arrive as exact JSON text
					Self::from_decimal_str(&number.to_string())
				}
			},
			Value::Null => Err(DecodeError::shape("amount is null")),
			other => Err(DecodeError::shape(format!(
				"expected integer amount, got {}",
				other
			))),
		}
	}

	pub fn as_biguint(&self) -> &BigUint {
		&self.0
	}

	pub fn is_zero(&self) -> bool {
		self.0.bits() == 0
	}

	/// Subtract, failing when the result would be negative
	pub fn checked_sub(&self, other: &RawAmount) -> Result<RawAmount, DecodeError> {
		if other.0 > self.0 {
			return Err(DecodeError::Negative {
				value: format!("{} - {}", self.0, other.0),
			});
		}
		Ok(RawAmount(&self.0 - &other.0))
	}

	/// `self / 10^decimals` as a float; decimals above [`MAX_DECIMALS`] are rejected
	pub fn scale(&self, decimals: u32) -> Result<f64, DecodeError> {
		if decimals > MAX_DECIMALS {
			return Err(DecodeError::DecimalsOutOfRange {
				decimals,
				max: MAX_DECIMALS,
			});
		}
		Ok(scale_unsigned(&self.0, decimals))
	}
}

impl From<u64> for RawAmount {
	fn from(value: u64) -> Self {
		Self(BigUint::from(value))
	}
}

impl From<u128> for RawAmount {
	fn from(value: u128) -> Self {
		Self(BigUint::from(value))
	}
}

impl TryFrom<BigInt> for RawAmount {
	type Error = DecodeError;

	fn try_from(value: BigInt) -> Result<Self, Self::Error> {
		match value.to_biguint() {
			Some(unsigned) => Ok(Self(unsigned)),
			None => Err(DecodeError::Negative {
				value: value.to_string(),
			}),
		}
	}
}

impl fmt::Display for RawAmount {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Compute `raw / 10^decimals` for an arbitrary-precision signed integer.
///
/// The division is carried out on the big integer and the exact decimal
/// expansion is handed to the float parser, which rounds once. Negative input
/// is rejected.
pub fn scale(raw: &BigInt, decimals: u32) -> Result<f64, DecodeError> {
	if raw.sign() == Sign::Minus {
		return Err(DecodeError::Negative {
			value: raw.to_string(),
		});
	}
	let amount = RawAmount::try_from(raw.clone())?;
	amount.scale(decimals)
}

fn scale_unsigned(raw: &BigUint, decimals: u32) -> f64 {
	if decimals == 0 {
		return parse_exact(&raw.to_string());
	}
	let divisor = BigUint::from(10u32).pow(decimals);
	let whole = raw / &divisor;
	let fraction = (raw % &divisor).to_string();
	let padding = "0".repeat(decimals as usize - fraction.len());
	parse_exact(&format!("{}.{}{}", whole, padding, fraction))
}

fn parse_exact(text: &str) -> f64 {
	// Digit-only strings always parse; very long ones saturate to infinity
	text.parse::<f64>().unwrap_or(f64::INFINITY)
}

/// Parse an amount a chain already reports in whole-token units (Stellar, XRPL)
pub fn parse_scaled_decimal(value: &str) -> Result<f64, DecodeError> {
	let parsed: f64 = value
		.trim()
		.parse()
		.map_err(|_| DecodeError::InvalidDecimal {
			value: value.to_string(),
		})?;
	if !parsed.is_finite() {
		return Err(DecodeError::InvalidDecimal {
			value: value.to_string(),
		});
	}
	if parsed < 0.0 {
		return Err(DecodeError::Negative {
			value: value.to_string(),
		});
	}
	Ok(parsed)
}
