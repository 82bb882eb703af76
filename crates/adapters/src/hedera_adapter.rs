//! Hedera adapter (mirror node token lookup)

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
struct TokenInfo {
	total_supply: Option<Value>,
	decimals: Option<Value>,
}

#[derive(Debug)]
pub struct HederaAdapter {
	config: Adapter,
	http: HttpContext,
}

impl HederaAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("hedera-v1", "Hedera mirror node"),
			http,
		}
	}
}

/// Decimals reported by the mirror node, which take precedence over configuration
fn reported_decimals(value: Option<&Value>) -> Option<u32> {
	match value? {
		Value::String(text) => text.trim().parse().ok(),
		Value::Number(number) => number.as_u64().and_then(|d| u32::try_from(d).ok()),
		_ => None,
	}
}

#[async_trait]
impl SupplyAdapter for HederaAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Hedera
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let url = endpoint(
			chain,
			&format!("api/v1/tokens/{}", chain.contract_address),
			&[],
		)?;
		let info: TokenInfo = self.http.get_json(&chain.id, &url).await?;

		let total_supply = info
			.total_supply
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("total_supply")))?;
		let raw =
			RawAmount::from_json(&total_supply).map_err(|e| AdapterError::decode(&chain.id, e))?;
		let decimals = reported_decimals(info.decimals.as_ref()).unwrap_or(chain.decimals);
		raw.scale(decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::Server;
	use serde_json::json;
	use supply_types::ErrorKind;

	const TOKEN_ID: &str = "0.0.456858";

	fn chain(url: String) -> ChainConfig {
		// Deliberately wrong configured decimals
		ChainConfig::new("hedera", "USDC", ChainType::Hedera, TOKEN_ID, 18, url)
	}

	#[test]
	fn test_reported_decimals() {
		assert_eq!(reported_decimals(Some(&json!("6"))), Some(6));
		assert_eq!(reported_decimals(Some(&json!(8))), Some(8));
		assert_eq!(reported_decimals(Some(&json!("six"))), None);
		assert_eq!(reported_decimals(None), None);
	}

	#[tokio::test]
	async fn test_response_decimals_override_configuration() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock("GET", format!("/api/v1/tokens/{}", TOKEN_ID).as_str())
			.with_status(200)
			.with_body(
				json!({"token_id": TOKEN_ID, "decimals": "6", "total_supply": "42000000"})
					.to_string(),
			)
			.create_async()
			.await;

		let adapter = HederaAdapter::new(HttpContext::default());
		assert_eq!(adapter.fetch_supply(&chain(server.url())).await.unwrap(), 42.0);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_configured_decimals_used_when_absent() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", format!("/api/v1/tokens/{}", TOKEN_ID).as_str())
			.with_status(200)
			.with_body(json!({"total_supply": "1000000000000000000"}).to_string())
			.create_async()
			.await;

		let adapter = HederaAdapter::new(HttpContext::default());
		assert_eq!(adapter.fetch_supply(&chain(server.url())).await.unwrap(), 1.0);
	}

	#[tokio::test]
	async fn test_oversized_reported_decimals_are_rejected() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", format!("/api/v1/tokens/{}", TOKEN_ID).as_str())
			.with_status(200)
			.with_body(json!({"total_supply": "1", "decimals": "20000000"}).to_string())
			.create_async()
			.await;

		let adapter = HederaAdapter::new(HttpContext::default());
		let outcome = tokio::time::timeout(
			std::time::Duration::from_millis(500),
			adapter.fetch_supply(&chain(server.url())),
		)
		.await
		.expect("scaling must not stall the task");

		let err = outcome.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
		assert!(err.to_string().contains("20000000"));
	}

	#[tokio::test]
	async fn test_unknown_token_is_transport_error() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", format!("/api/v1/tokens/{}", TOKEN_ID).as_str())
			.with_status(404)
			.with_body(json!({"_status": {"messages": [{"message": "Not found"}]}}).to_string())
			.create_async()
			.await;

		let adapter = HederaAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Transport);
		assert_eq!(err.status_code(), Some(404));
	}
}
