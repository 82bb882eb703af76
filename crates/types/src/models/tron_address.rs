//! Tron base58-check address transcoding
//!
//! Tron's execution layer accepts EVM-style `eth_call` requests, but contract
//! addresses are published in base58-check form:
//!
//! ```text
//! base58( 0x41 | 20-byte account | sha256(sha256(0x41 | account))[..4] )
//! ```
//!
//! The call target is the 20-byte account rendered as `0x`-prefixed hex.

use num_bigint::BigUint;
use sha2::{Digest, Sha256};

use super::raw_amount::DecodeError;

const BASE58_ALPHABET: &[u8; 58] = b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Length in bytes of the trailing checksum
const CHECKSUM_LEN: usize = 4;

/// Length in bytes of the leading network prefix
const PREFIX_LEN: usize = 1;

fn alphabet_index(character: char) -> Option<u32> {
	BASE58_ALPHABET
		.iter()
		.position(|&candidate| candidate as char == character)
		.map(|index| index as u32)
}

/// Decode a base58 string into its big-endian byte sequence by big-integer accumulation
fn base58_decode(address: &str) -> Result<Vec<u8>, DecodeError> {
	let mut accumulator = BigUint::from(0u32);
	for character in address.chars() {
		let index =
			alphabet_index(character).ok_or(DecodeError::InvalidBase58Char { character })?;
		accumulator = accumulator * 58u32 + index;
	}
	Ok(accumulator.to_bytes_be())
}

fn verify_checksum(payload: &[u8], checksum: &[u8]) -> Result<(), DecodeError> {
	let digest = Sha256::digest(Sha256::digest(payload));
	if &digest[..4] != checksum {
		return Err(DecodeError::InvalidAddress {
			reason: "base58 checksum mismatch".to_string(),
		});
	}
	Ok(())
}

/// Convert a base58-check Tron address (e.g. `TR7NHq...`) into the `0x` hex
/// form accepted by Tron's `eth_call`.
///
/// The network prefix byte and the 4-byte checksum are stripped. A standard
/// 25-byte address yields 40 hex characters after `0x`.
pub fn tron_base58_to_hex(address: &str) -> Result<String, DecodeError> {
	let address = address.trim();
	if address.is_empty() {
		return Err(DecodeError::InvalidAddress {
			reason: "empty address".to_string(),
		});
	}

	let bytes = base58_decode(address)?;
	if bytes.len() <= CHECKSUM_LEN + PREFIX_LEN {
		return Err(DecodeError::InvalidAddress {
			reason: format!("decoded payload too short ({} bytes)", bytes.len()),
		});
	}

	let checksum_start = bytes.len() - CHECKSUM_LEN;
	verify_checksum(&bytes[..checksum_start], &bytes[checksum_start..])?;

	Ok(format!("0x{}", hex::encode(&bytes[PREFIX_LEN..checksum_start])))
}
