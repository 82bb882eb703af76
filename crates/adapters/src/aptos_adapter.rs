//! Aptos adapter
//!
//! Supply is read with the `0x1::fungible_asset::supply` view function,
//! which takes a fungible-asset metadata object. A configured contract is
//! either that object itself or a package exposing a
//! `<module>::<module>_address` view returning it. The resolved object is
//! remembered in a shared [`MetadataCache`] so steady-state lookups cost a
//! single round trip.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};
use tracing::{debug, info};

use crate::http::{endpoint, HttpContext};
use crate::metadata_cache::MetadataCache;

const METADATA_RESOURCE: &str = "0x1::fungible_asset::Metadata";
const SUPPLY_FUNCTION: &str = "0x1::fungible_asset::supply";

/// Package modules probed for a metadata accessor, in order
pub const METADATA_MODULES: [&str; 2] = ["usdt", "usdc"];

#[derive(Debug)]
pub struct AptosAdapter {
	config: Adapter,
	http: HttpContext,
	metadata: Arc<MetadataCache>,
}

impl AptosAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self::with_cache(http, Arc::new(MetadataCache::new()))
	}

	/// Share a metadata cache with other adapter instances or seed it in tests
	pub fn with_cache(http: HttpContext, metadata: Arc<MetadataCache>) -> Self {
		Self {
			config: Adapter::new("aptos-v1", "Aptos fungible asset"),
			http,
			metadata,
		}
	}

	pub fn metadata_cache(&self) -> &Arc<MetadataCache> {
		&self.metadata
	}

	/// Metadata object for the configured contract, resolved at most once per contract
	pub async fn resolve_metadata(&self, chain: &ChainConfig) -> AdapterResult<String> {
		self.metadata
			.resolve_with(&chain.contract_address, || self.discover_metadata(chain))
			.await
	}

	async fn discover_metadata(&self, chain: &ChainConfig) -> AdapterResult<String> {
		let catalog_ms = self.http.timeouts().catalog_ms;
		let contract = &chain.contract_address;

		let resource_url = endpoint(
			chain,
			&format!("accounts/{}/resource/{}", contract, METADATA_RESOURCE),
			&[],
		)?;
		if self.http.probe(&chain.id, &resource_url, catalog_ms).await? {
			info!("Aptos contract {} is a metadata object", contract);
			return Ok(contract.clone());
		}

		let view_url = endpoint(chain, "view", &[])?;
		for module in METADATA_MODULES {
			let body = json!({
				"function": format!("{}::{}::{}_address", contract, module, module),
				"type_arguments": [],
				"arguments": [],
			});
			match self
				.http
				.post_json::<Value>(&chain.id, &view_url, &body, catalog_ms)
				.await
			{
				Ok(response) => {
					if let Some(address) = first_string(&response) {
						info!(
							"Resolved Aptos metadata {} via {}::{}",
							address, contract, module
						);
						return Ok(address);
					}
					debug!("{}::{} returned no address", contract, module);
				},
				Err(e) => debug!("{}::{}_address unavailable: {}", contract, module, e),
			}
		}

		Err(AdapterError::resolution(
			&chain.id,
			format!("cannot resolve fungible asset metadata for {}", contract),
		))
	}
}

fn first_string(response: &Value) -> Option<String> {
	response
		.as_array()
		.and_then(|values| values.first())
		.and_then(Value::as_str)
		.filter(|address| !address.is_empty())
		.map(str::to_string)
}

/// Unwrap the `Option<u128>` returned by `fungible_asset::supply`
fn decode_supply(response: &Value) -> Result<RawAmount, DecodeError> {
	let option = response
		.as_array()
		.and_then(|values| values.first())
		.ok_or_else(|| DecodeError::shape("view response is not a non-empty array"))?;
	let vec = option
		.get("vec")
		.and_then(Value::as_array)
		.ok_or_else(|| DecodeError::missing("[0].vec"))?;
	let value = vec
		.first()
		.ok_or_else(|| DecodeError::shape("supply is not tracked for this asset"))?;
	RawAmount::from_json(value)
}

#[async_trait]
impl SupplyAdapter for AptosAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Aptos
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let metadata = self.resolve_metadata(chain).await?;

		let body = json!({
			"function": SUPPLY_FUNCTION,
			"type_arguments": [METADATA_RESOURCE],
			"arguments": [metadata],
		});
		let view_url = endpoint(chain, "view", &[])?;
		let response: Value = self
			.http
			.post_json(&chain.id, &view_url, &body, self.http.timeouts().request_ms)
			.await?;

		if response.get("error_code").is_some() {
			let message = response
				.get("message")
				.and_then(Value::as_str)
				.unwrap_or("Aptos view error");
			return Err(AdapterError::rpc(&chain.id, None, message));
		}

		let raw = decode_supply(&response).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
