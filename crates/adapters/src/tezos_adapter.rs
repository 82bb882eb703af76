//! Tezos adapter (TzKT token index)

use async_trait::async_trait;
use serde::Deserialize;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenRecord {
	total_supply: Option<String>,
}

#[derive(Debug)]
pub struct TezosAdapter {
	config: Adapter,
	http: HttpContext,
}

impl TezosAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("tezos-v1", "TzKT tokens"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for TezosAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Tezos
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let url = endpoint(
			chain,
			"v1/tokens",
			&[
				("contract", chain.contract_address.as_str()),
				("tokenId", "0"),
				("limit", "1"),
			],
		)?;
		let records: Vec<TokenRecord> = self.http.get_json(&chain.id, &url).await?;

		let record = records.into_iter().next().ok_or_else(|| {
			AdapterError::decode(
				&chain.id,
				DecodeError::shape(format!("no token 0 indexed for {}", chain.contract_address)),
			)
		})?;
		let total_supply = record
			.total_supply
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("totalSupply")))?;
		let raw = RawAmount::from_decimal_str(&total_supply)
			.map_err(|e| AdapterError::decode(&chain.id, e))?;
		raw.scale(chain.decimals).map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::{Matcher, Server};
	use serde_json::json;
	use supply_types::ErrorKind;

	const CONTRACT: &str = "KT1XnTn74bUtxHfDtBmm2bGZAQfhPbvKWR8o";

	fn chain(url: String) -> ChainConfig {
		ChainConfig::new("tezos", "USDT", ChainType::Tezos, CONTRACT, 6, url)
	}

	fn tokens_mock(server: &mut mockito::ServerGuard) -> mockito::Mock {
		server
			.mock("GET", Matcher::Regex(r"^/v1/tokens".to_string()))
			.match_query(Matcher::AllOf(vec![
				Matcher::UrlEncoded("contract".into(), CONTRACT.into()),
				Matcher::UrlEncoded("tokenId".into(), "0".into()),
				Matcher::UrlEncoded("limit".into(), "1".into()),
			]))
	}

	#[tokio::test]
	async fn test_first_record_total_supply() {
		let mut server = Server::new_async().await;
		let mock = tokens_mock(&mut server)
			.with_status(200)
			.with_body(
				json!([{
					"id": 1,
					"contract": {"address": CONTRACT},
					"tokenId": "0",
					"totalSupply": "7000000000"
				}])
				.to_string(),
			)
			.create_async()
			.await;

		let adapter = TezosAdapter::new(HttpContext::default());
		assert_eq!(adapter.fetch_supply(&chain(server.url())).await.unwrap(), 7_000.0);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_empty_result_is_decode_error() {
		let mut server = Server::new_async().await;
		tokens_mock(&mut server)
			.with_status(200)
			.with_body("[]")
			.create_async()
			.await;

		let adapter = TezosAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
	}

	#[tokio::test]
	async fn test_missing_total_supply_field() {
		let mut server = Server::new_async().await;
		tokens_mock(&mut server)
			.with_status(200)
			.with_body(json!([{"id": 1, "tokenId": "0"}]).to_string())
			.create_async()
			.await;

		let adapter = TezosAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
		assert!(err.to_string().contains("totalSupply"));
	}
}
