//! Solana adapter
//!
//! `getTokenSupply` already returns the supply in whole-token units, so the
//! configured decimals are never applied here.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use supply_types::{
	parse_scaled_decimal, Adapter, AdapterError, AdapterResult, ChainConfig, ChainType,
	DecodeError, SupplyAdapter,
};

use crate::http::HttpContext;

#[derive(Debug, Deserialize)]
struct TokenSupplyResult {
	value: TokenAmount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenAmount {
	ui_amount: Option<f64>,
	ui_amount_string: Option<String>,
}

#[derive(Debug)]
pub struct SolanaAdapter {
	config: Adapter,
	http: HttpContext,
}

impl SolanaAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("solana-v1", "Solana getTokenSupply"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for SolanaAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Solana
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let result: TokenSupplyResult = self
			.http
			.json_rpc(
				&chain.id,
				&chain.rpc_url,
				"getTokenSupply",
				json!([chain.contract_address]),
			)
			.await?;

		// uiAmount is null for amounts the node cannot express as a float
		match (result.value.ui_amount, result.value.ui_amount_string) {
			(Some(amount), _) => Ok(amount),
			(None, Some(text)) => {
				parse_scaled_decimal(&text).map_err(|e| AdapterError::decode(&chain.id, e))
			},
			(None, None) => Err(AdapterError::decode(
				&chain.id,
				DecodeError::missing("value.uiAmount"),
			)),
		}
	}
}
