//! EVM adapter
//!
//! Reads `totalSupply()` with a read-only `eth_call`. Tron exposes the same
//! JSON-RPC surface but addresses contracts in base58check, so the Tron
//! variant transcodes the address before building the call.

use async_trait::async_trait;
use serde_json::json;
use supply_types::{
	tron_base58_to_hex, Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, RawAmount,
	SupplyAdapter,
};
use tracing::debug;

use crate::http::HttpContext;

/// 4-byte selector of `totalSupply()`
pub const TOTAL_SUPPLY_SELECTOR: &str = "0x18160ddd";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddressFormat {
	Hex,
	TronBase58,
}

#[derive(Debug)]
pub struct EvmAdapter {
	config: Adapter,
	chain_type: ChainType,
	address_format: AddressFormat,
	http: HttpContext,
}

impl EvmAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("evm-v1", "EVM eth_call"),
			chain_type: ChainType::Evm,
			address_format: AddressFormat::Hex,
			http,
		}
	}

	/// Tron flavour: base58check contract addresses over the EVM JSON-RPC
	pub fn tron(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("tron-v1", "Tron eth_call"),
			chain_type: ChainType::Tron,
			address_format: AddressFormat::TronBase58,
			http,
		}
	}

	fn call_target(&self, chain: &ChainConfig) -> AdapterResult<String> {
		match self.address_format {
			AddressFormat::Hex => Ok(chain.contract_address.clone()),
			AddressFormat::TronBase58 => tron_base58_to_hex(&chain.contract_address)
				.map_err(|e| AdapterError::decode(&chain.id, e)),
		}
	}
}

#[async_trait]
impl SupplyAdapter for EvmAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		self.chain_type
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let to = self.call_target(chain)?;
		debug!("eth_call totalSupply on {} (chain: {})", to, chain.id);

		let result: String = self
			.http
			.json_rpc(
				&chain.id,
				&chain.rpc_url,
				"eth_call",
				json!([{ "to": to, "data": TOTAL_SUPPLY_SELECTOR }, "latest"]),
			)
			.await?;

		let raw = RawAmount::from_hex(&result).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
