//! Stellar adapter (Horizon `/assets`)
//!
//! Horizon reports balances as decimal strings in whole-token units, so no
//! integer scaling is applied.

use async_trait::async_trait;
use serde::Deserialize;
use supply_types::{
	parse_scaled_decimal, Adapter, AdapterError, AdapterResult, ChainConfig, ChainType,
	DecodeError, SupplyAdapter,
};

use crate::http::{endpoint, HttpContext};

#[derive(Debug, Deserialize)]
struct AssetsPage {
	#[serde(rename = "_embedded")]
	embedded: Option<Embedded>,
}

#[derive(Debug, Deserialize)]
struct Embedded {
	#[serde(default)]
	records: Vec<AssetRecord>,
}

#[derive(Debug, Deserialize)]
struct AssetRecord {
	balances: Balances,
}

#[derive(Debug, Deserialize)]
struct Balances {
	authorized: String,
}

#[derive(Debug)]
pub struct StellarAdapter {
	config: Adapter,
	http: HttpContext,
}

impl StellarAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self {
			config: Adapter::new("stellar-v1", "Stellar Horizon"),
			http,
		}
	}
}

#[async_trait]
impl SupplyAdapter for StellarAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Stellar
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		// The asset code is the token symbol; the contract address is the issuer
		let url = endpoint(
			chain,
			"assets",
			&[
				("asset_code", chain.token.as_str()),
				("asset_issuer", chain.contract_address.as_str()),
				("limit", "1"),
			],
		)?;
		let page: AssetsPage = self.http.get_json(&chain.id, &url).await?;

		let record = page
			.embedded
			.and_then(|embedded| embedded.records.into_iter().next())
			.ok_or_else(|| {
				AdapterError::decode(&chain.id, DecodeError::missing("_embedded.records[0]"))
			})?;
		parse_scaled_decimal(&record.balances.authorized)
			.map_err(|e| AdapterError::decode(&chain.id, e))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use mockito::{Matcher, Server};
	use serde_json::json;
	use supply_types::ErrorKind;

	const ISSUER: &str = "GA5ZSEJYB37JRC5AVCIA5MOP4RHTM335X2KGX3IHOJAPP5RE34K4KZVN";

	fn chain(url: String) -> ChainConfig {
		ChainConfig::new("stellar", "USDC", ChainType::Stellar, ISSUER, 7, url)
	}

	#[tokio::test]
	async fn test_authorized_balance_is_used_as_is() {
		let mut server = Server::new_async().await;
		let mock = server
			.mock("GET", Matcher::Regex(r"^/assets".to_string()))
			.match_query(Matcher::AllOf(vec![
				Matcher::UrlEncoded("asset_code".into(), "USDC".into()),
				Matcher::UrlEncoded("asset_issuer".into(), ISSUER.into()),
				Matcher::UrlEncoded("limit".into(), "1".into()),
			]))
			.with_status(200)
			.with_body(
				json!({
					"_embedded": {"records": [{
						"asset_code": "USDC",
						"balances": {
							"authorized": "250000000.1234567",
							"authorized_to_maintain_liabilities": "0.0"
						}
					}]}
				})
				.to_string(),
			)
			.create_async()
			.await;

		let adapter = StellarAdapter::new(HttpContext::default());
		let supply = adapter.fetch_supply(&chain(server.url())).await.unwrap();

		assert_eq!(supply, 250_000_000.123_456_7);
		mock.assert_async().await;
	}

	#[tokio::test]
	async fn test_no_records_is_decode_error() {
		let mut server = Server::new_async().await;
		server
			.mock("GET", Matcher::Regex(r"^/assets".to_string()))
			.match_query(Matcher::Any)
			.with_status(200)
			.with_body(json!({"_embedded": {"records": []}}).to_string())
			.create_async()
			.await;

		let adapter = StellarAdapter::new(HttpContext::default());
		let err = adapter.fetch_supply(&chain(server.url())).await.unwrap_err();
		assert_eq!(err.kind(), ErrorKind::Decode);
	}
}
