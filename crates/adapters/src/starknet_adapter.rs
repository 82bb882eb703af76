//! Starknet adapter
//!
//! There is no view call here: the adapter reads the ERC-20 `total_supply`
//! storage slot directly. The slot key differs between contract
//! implementations, so only contracts listed in [`storage_key_for`] are
//! supported.

use async_trait::async_trait;
use num_bigint::BigUint;
use serde_json::json;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, RawAmount, SupplyAdapter,
};

use crate::http::HttpContext;

/// (contract address, storage key of the low u128 limb of total supply)
const STORAGE_KEYS: [(&str, &str); 2] = [
	// Bridged USDC (StarkGate)
	(
		"0x053c91253bc9682c04929ca02ed00b3e423f6710d2ee7e0d5ebb06f3ecf368a8",
		"0x110e2f729c9c2b988559994a3daccd838cf52faf88e18101373e67dd061455a",
	),
	// Native USDC
	(
		"0x033068f6539f8e6e6b131e6b2b814e6c34a5224bc66947c47dab9dfee93b35fb",
		"0x1557182e4359a1f0c6301278e8f5b35a776ab58d39892581e357578fb287836",
	),
];

/// Storage key holding total supply for a known contract (case-insensitive)
pub fn storage_key_for(contract_address: &str) -> Option<&'static str> {
	let needle = contract_address.to_lowercase();
	STORAGE_KEYS
		.iter()
		.find(|(contract, _)| *contract == needle)
		.map(|(_, key)| *key)
}

#[derive(Debug)]
pub struct StarknetAdapter {
	config: Adapter,
	http: HttpContext,
}

impl StarknetAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("starknet-v1", "Starknet storage read"),
			http,
		}
	}
}

/// Keep the low 128 bits of a storage felt
fn low_u128(raw: &RawAmount) -> RawAmount {
	let mask = (BigUint::from(1u32) << 128usize) - BigUint::from(1u32);
	RawAmount::new(raw.as_biguint() & &mask)
}

#[async_trait]
impl SupplyAdapter for StarknetAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Starknet
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let key = storage_key_for(&chain.contract_address).ok_or_else(|| {
			AdapterError::configuration(
				&chain.id,
				format!(
					"no total supply storage key for Starknet contract {}",
					chain.contract_address
				),
			)
		})?;

		let result: String = self
			.http
			.json_rpc(
				&chain.id,
				&chain.rpc_url,
				"starknet_getStorageAt",
				json!({
					"contract_address": chain.contract_address,
					"key": key,
					"block_id": "latest",
				}),
			)
			.await?;

		let raw = RawAmount::from_hex(&result).map_err(|e| AdapterError::decode(&chain.id, e))?;
		low_u128(&raw).scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::{Matcher, Server};
	use supply_types::ErrorKind;

	const NATIVE_USDC: &str = "0x033068f6539f8e6e6b131e6b2b814e6c34a5224bc66947c47dab9dfee93b35fb";

	#[test]
	fn test_storage_key_lookup_ignores_case() {
		assert_eq!(
			storage_key_for(&NATIVE_USDC.to_uppercase().replace("0X", "0x")),
			Some("0x1557182e4359a1f0c6301278e8f5b35a776ab58d39892581e357578fb287836")
		);
		assert!(storage_key_for("0x1234").is_none());
	}

	#[test]
	fn test_low_u128_drops_high_limb() {
		let raw = RawAmount::from_hex("0x100000000000000000000000000000005").unwrap();
		assert_eq!(low_u128(&raw), RawAmount::from(5u64));
	}

	#[tokio::test]
	async fn test_reads_total_supply_slot() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock("POST", "/")
			.match_body(Matcher::PartialJson(json!({
				"method": "starknet_getStorageAt",
				"params": {
					"contract_address": NATIVE_USDC,
					"key": "0x1557182e4359a1f0c6301278e8f5b35a776ab58d39892581e357578fb287836",
					"block_id": "latest"
				}
			})))
			.with_status(200)
			.with_body(json!({"jsonrpc": "2.0", "id": 1, "result": "0x3b9aca00"}).to_string())
			.create_async()
			.await;

		let adapter = StarknetAdapter::new(HttpContext::default());
		let chain = ChainConfig::new(
			"starknet",
			"USDC",
			ChainType::Starknet,
			NATIVE_USDC,
			6,
			server.url(),
		);

		assert_eq!(adapter.fetch_supply(&chain).await.unwrap(), 1_000.0);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_unknown_contract_is_configuration_error() {
		let mut server = Server::new_async().await;
		let mock = server.mock("POST", "/").expect(0).create_async().await;

		let adapter = StarknetAdapter::new(HttpContext::default());
		let chain = ChainConfig::new(
			"starknet",
			"USDC",
			ChainType::Starknet,
			"0xdeadbeef",
			6,
			server.url(),
		);

		let err = adapter.fetch_supply(&chain).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Configuration);
		mock.assert_async().await;
	}
}
