//! Polkadot Asset Hub adapter (Substrate API Sidecar)

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
struct StorageItem {
	value: Option<AssetDetails>,
}

#[derive(Debug, Deserialize)]
struct AssetDetails {
	supply: Option<Value>,
}

#[derive(Debug)]
pub struct PolkadotAdapter {
	config: Adapter,
	http: HttpContext,
}

impl PolkadotAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("polkadot-v1", "Sidecar assets pallet"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for PolkadotAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Polkadot
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		// The contract address is the asset id in the Assets pallet
		let url = endpoint(
			chain,
			"pallets/assets/storage/Asset",
			&[("keys[]", chain.contract_address.as_str())],
		)?;
		let item: StorageItem = self.http.get_json(&chain.id, &url).await?;

		let supply = item
			.value
			.and_then(|details| details.supply)
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("value.supply")))?;
		let raw = RawAmount::from_json(&supply).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
