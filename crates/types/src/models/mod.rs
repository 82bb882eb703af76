//! Chain-agnostic decoding helpers shared by all adapters

pub mod currency_code;
pub mod raw_amount;
pub mod tron_address;

pub use currency_code::xrpl_hex_currency_code;
pub use raw_amount::{parse_scaled_decimal, scale, DecodeError, RawAmount, MAX_DECIMALS};
pub use tron_address::tron_base58_to_hex;
