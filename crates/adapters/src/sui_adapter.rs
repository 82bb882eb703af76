//! Sui adapter

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, RawAmount, SupplyAdapter,
};

use crate::http::HttpContext;

#[derive(Debug, Deserialize)]
struct Supply {
	value: String,
}

#[derive(Debug)]
pub struct SuiAdapter {
	config: Adapter,
	http: HttpContext,
}

impl SuiAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("sui-v1", "Sui coin supply"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for SuiAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Sui
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		// The contract address is the full coin type, e.g. `0x...::usdc::USDC`
		let supply: Supply = self
			.http
			.json_rpc(
				&chain.id,
				&chain.rpc_url,
				"suix_getTotalSupply",
				json!([chain.contract_address]),
			)
			.await?;

		let raw = RawAmount::from_decimal_str(&supply.value)
			.map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
