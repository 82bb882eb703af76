//! Liquid Network adapter (Esplora asset endpoint)

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
struct AssetInfo {
	chain_stats: Option<ChainStats>,
}

#[derive(Debug, Deserialize)]
struct ChainStats {
	issued_amount: Value,
	#[serde(default)]
	burned_amount: Value,
}

#[derive(Debug)]
pub struct LiquidAdapter {
	config: Adapter,
	http: HttpContext,
}

impl LiquidAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("liquid-v1", "Liquid asset stats"),
			http,
		}
	}
}

/// Issued minus burned; burned above issued is corrupt data
fn outstanding(stats: &ChainStats) -> Result<RawAmount, DecodeError> {
	let issued = RawAmount::from_json(&stats.issued_amount)?;
	let burned = match &stats.burned_amount {
		Value::Null => RawAmount::from(0u64),
		value => RawAmount::from_json(value)?,
	};
	issued.checked_sub(&burned)
}

#[async_trait]
impl SupplyAdapter for LiquidAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Liquid
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let url = endpoint(chain, &format!("asset/{}", chain.contract_address), &[])?;
		let info: AssetInfo = self.http.get_json(&chain.id, &url).await?;

		let stats = info
			.chain_stats
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("chain_stats")))?;
		let raw = outstanding(&stats).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::Server;
	use serde_json::json;
	use supply_types::ErrorKind;

	const ASSET: &str = "ce091c998b83c78bb71a632313ba3760f1763d9cfcffae02258ffa9865a37bd2";

	fn chain(url: String) -> ChainConfig {
		ChainConfig::new("liquid", "USDT", ChainType::Liquid, ASSET, 8, url)
	}

	#[test]
	fn test_burned_above_issued_is_rejected() {
		let stats = ChainStats {
			issued_amount: json!(10),
			burned_amount: json!(11),
		};
		assert!(matches!(outstanding(&stats), Err(DecodeError::Negative { .. })));
	}

	#[tokio::test]
	async fn test_burned_amount_is_subtracted() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock("GET", format!("/asset/{}", ASSET).as_str())
			.with_status(200)
			.with_body(
				json!({
					"asset_id": ASSET,
					"chain_stats": {
						"tx_count": 100,
						"issuance_count": 3,
						"issued_amount": 50_000_000_000u64,
						"burned_amount": 10_000_000_000u64,
						"has_blinded_issuances": false
					}
				})
				.to_string(),
			)
			.create_async()
			.await;

		let adapter = LiquidAdapter::new(HttpContext::default());
		assert_eq!(adapter.fetch_supply(&chain(server.url())).await.unwrap(), 400.0);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_missing_chain_stats() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", format!("/asset/{}", ASSET).as_str())
			.with_status(200)
			.with_body(json!({"asset_id": ASSET}).to_string())
			.create_async()
			.await;

		let adapter = LiquidAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
	}
}
