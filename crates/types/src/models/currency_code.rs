//! XRPL currency codes
//!
//! Codes longer than three characters are carried on the ledger as 160-bit
//! values: the ASCII symbol right-padded with zero bytes, written as 40
//! upper-case hex characters.

/// Length in bytes of a non-standard XRPL currency code
const CURRENCY_CODE_BYTES: usize = 20;

/// Hex currency code for a token symbol, e.g. `USDC` ->
/// `5553444300000000000000000000000000000000`
pub fn xrpl_hex_currency_code(symbol: &str) -> String {
	let mut bytes = symbol.as_bytes().to_vec();
	bytes.truncate(CURRENCY_CODE_BYTES);
	bytes.resize(CURRENCY_CODE_BYTES, 0);
	hex::encode_upper(bytes)
}
