//! XRPL adapter (`gateway_balances`)
//!
//! Issued currencies show up under `obligations`, keyed by the 40-hex
//! currency code for symbols longer than three characters and by the plain
//! symbol otherwise. Both keys are tried. Amounts are decimal strings in
//! whole-token units.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use supply_types::{
	parse_scaled_decimal, xrpl_hex_currency_code, Adapter, AdapterError, AdapterResult,
	ChainConfig, ChainType, DecodeError, SupplyAdapter,
};

use crate::http::HttpContext;

#[derive(Debug, Deserialize)]
struct GatewayBalancesResponse {
	result: Option<GatewayBalances>,
}

#[derive(Debug, Deserialize)]
struct GatewayBalances {
	error: Option<String>,
	error_message: Option<String>,
	obligations: Option<Map<String, Value>>,
}

#[derive(Debug)]
pub struct XrplAdapter {
	config: Adapter,
	http: HttpContext,
}

impl XrplAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("xrpl-v1", "XRPL gateway balances"),
			http,
		}
	}
}

fn find_obligation<'a>(obligations: &'a Map<String, Value>, symbol: &str) -> Option<&'a str> {
	let hex_code = xrpl_hex_currency_code(symbol);
	obligations
		.get(&hex_code)
		.or_else(|| obligations.get(symbol))
		.and_then(Value::as_str)
}

#[async_trait]
impl SupplyAdapter for XrplAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Xrpl
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let body = json!({
			"method": "gateway_balances",
			"params": [{
				"account": chain.contract_address,
				"hotwallet": [],
				"ledger_index": "validated",
			}],
		});
		let response: GatewayBalancesResponse = self
			.http
			.post_json(&chain.id, &chain.rpc_url, &body, self.http.timeouts().request_ms)
			.await?;
		let result = response
			.result
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("result")))?;

		if let Some(error) = result.error {
			return Err(AdapterError::rpc(
				&chain.id,
				None,
				result.error_message.unwrap_or(error),
			));
		}

		let obligations = result.obligations.ok_or_else(|| {
			AdapterError::decode(&chain.id, DecodeError::missing("result.obligations"))
		})?;
		let amount = find_obligation(&obligations, &chain.token).ok_or_else(|| {
			AdapterError::decode(
				&chain.id,
				DecodeError::shape(format!(
					"no {} obligations issued by {}",
					chain.token, chain.contract_address
				)),
			)
		})?;
		parse_scaled_decimal(amount).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
