//! TON adapter (toncenter jetton API)

use async_trait::async_trait;
use serde_json::Value;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug)]
pub struct TonAdapter {
	config: Adapter,
	http: HttpContext,
}

impl TonAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("ton-v1", "TON jetton"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for TonAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Ton
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let url = endpoint(
			chain,
			&format!("v2/jettons/{}", chain.contract_address),
			&[],
		)?;
		let body: Value = self.http.get_json(&chain.id, &url).await?;

		let total_supply = body
			.get("total_supply")
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("total_supply")))?;
		let raw =
			RawAmount::from_json(total_supply).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
