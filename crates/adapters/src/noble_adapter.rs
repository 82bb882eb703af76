//! Noble / Cosmos SDK adapter (bank module LCD)

use async_trait::async_trait;
use serde::Deserialize;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
struct SupplyOfResponse {
	amount: Option<Coin>,
}

#[derive(Debug, Deserialize)]
struct Coin {
	amount: Option<String>,
}

#[derive(Debug)]
pub struct NobleAdapter {
	config: Adapter,
	http: HttpContext,
}

impl NobleAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("noble-v1", "Cosmos bank supply"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for NobleAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Noble
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let url = endpoint(
			chain,
			"cosmos/bank/v1beta1/supply/by_denom",
			&[("denom", chain.contract_address.as_str())],
		)?;
		let response: SupplyOfResponse = self.http.get_json(&chain.id, &url).await?;

		let amount = response
			.amount
			.and_then(|coin| coin.amount)
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("amount.amount")))?;
		let raw =
			RawAmount::from_decimal_str(&amount).map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::{Matcher, Server};
	use serde_json::json;
	use supply_types::ErrorKind;

	fn chain(url: String) -> ChainConfig {
		ChainConfig::new("noble", "USDC", ChainType::Noble, "uusdc", 6, url)
	}

	#[tokio::test]
	async fn test_bank_supply_by_denom() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock(
				"GET",
				Matcher::Regex(r"^/cosmos/bank/v1beta1/supply/by_denom".to_string()),
			)
			.match_query(Matcher::UrlEncoded("denom".into(), "uusdc".into()))
			.with_status(200)
			.with_body(json!({"amount": {"denom": "uusdc", "amount": "98765432100"}}).to_string())
			.create_async()
			.await;

		let adapter = NobleAdapter::new(HttpContext::default());
		assert_eq!(
			adapter.fetch_supply(&chain(server.url())).await.unwrap(),
			98_765.4321
		);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_missing_amount() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", Matcher::Regex(r"^/cosmos/bank".to_string()))
			.match_query(Matcher::Any)
			.with_status(200)
			.with_body(json!({"amount": {"denom": "uusdc"}}).to_string())
			.create_async()
			.await;

		let adapter = NobleAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
	}
}
