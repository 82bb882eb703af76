//! NEAR adapter
//!
//! `ft_total_supply` is invoked through the `query` RPC method. The view
//! result comes back as a byte array holding the JSON serialisation of the
//! return value, which for NEP-141 is a quoted decimal string, so the
//! response is decoded twice before the integer parse.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use serde_json::json;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::HttpContext;

#[derive(Debug, Deserialize)]
struct CallFunctionResult {
	result: Option<Vec<u8>>,
	error: Option<String>,
}

#[derive(Debug)]
pub struct NearAdapter {
	config: Adapter,
	http: HttpContext,
}

impl NearAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("near-v1", "NEAR call_function"),
			http,
		}
	}
}

/// Bytes -> UTF-8 text -> JSON string literal -> integer
fn decode_view_result(bytes: &[u8]) -> Result<RawAmount, DecodeError> {
	let text = std::str::from_utf8(bytes)
		.map_err(|e| DecodeError::shape(format!("view result is not UTF-8: {}", e)))?;
	let literal: String = serde_json::from_str(text).map_err(|e| {
		DecodeError::shape(format!("view result '{}' is not a JSON string: {}", text, e))
	})?;
	RawAmount::from_decimal_str(&literal)
}

#[async_trait]
impl SupplyAdapter for NearAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Near
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let params = json!({
			"request_type": "call_function",
			"finality": "final",
			"account_id": chain.contract_address,
			"method_name": "ft_total_supply",
			"args_base64": STANDARD.encode("{}"),
		});
		let result: CallFunctionResult = self
			.http
			.json_rpc(&chain.id, &chain.rpc_url, "query", params)
			.await?;

		if let Some(message) = result.error {
			return Err(AdapterError::rpc(&chain.id, None, message));
		}
		let bytes = result
			.result
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("result.result")))?;
		let raw = decode_view_result(&bytes).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::{Matcher, Server};
	use supply_types::ErrorKind;

	const TOKEN: &str = "17208628f84f5d6ad33f0da3bbbeb27ffcb398eac501a31bd6ad2011e36133a1";

	fn chain(url: String) -> ChainConfig {
		ChainConfig::new("near", "USDC", ChainType::Near, TOKEN, 6, url)
	}

	#[test]
	fn test_double_decode() {
		let bytes = b"\"2500000000\"";
		assert_eq!(
			decode_view_result(bytes).unwrap(),
			RawAmount::from(2_500_000_000u64)
		);
		// An unquoted number is not the NEP-141 return shape
		assert!(decode_view_result(b"2500000000").is_err());
		assert!(decode_view_result(&[0xff, 0xfe]).is_err());
	}

	#[tokio::test]
	async fn test_fetch_supply() {
		let mut server = Server::new_async().await;
		let bytes: Vec<u8> = b"\"2500000000\"".to_vec();
		let mock = server
			.mock("POST", "/")
			.match_body(Matcher::PartialJson(json!({
				"method": "query",
				"params": {
					"request_type": "call_function",
					"finality": "final",
					"account_id": TOKEN,
					"method_name": "ft_total_supply",
					"args_base64": "e30="
				}
			})))
			.with_status(200)
			.with_body(
				json!({
					"jsonrpc": "2.0",
					"id": 1,
					"result": {"block_height": 1, "logs": [], "result": bytes}
				})
				.to_string(),
			)
			.create_async()
			.await;

		let adapter = NearAdapter::new(HttpContext::default());
		assert_eq!(adapter.fetch_supply(&chain(server.url())).await.unwrap(), 2_500.0);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_contract_error_in_result() {
		let mut server = Server::new_async().await;
		server
			.mock("POST", "/")
			.with_status(200)
			.with_body(
				json!({
					"jsonrpc": "2.0",
					"id": 1,
					"result": {"error": "wasm execution failed", "logs": []}
				})
				.to_string(),
			)
			.create_async()
			.await;

		let adapter = NearAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Transport);
		assert_eq!(err.to_string(), "RPC error: wasm execution failed");
	}
}
