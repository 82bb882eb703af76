//! Algorand adapter (indexer account lookup)
//!
//! Circulating supply is inferred rather than queried: the asset's total
//! issuance is taken to be `u64::MAX` and the reserve account's holding is
//! subtracted from it.

use async_trait::async_trait;
use serde::Deserialize;
use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, DecodeError, RawAmount,
	SupplyAdapter,
};
use tracing::debug;

use crate::http::{endpoint, HttpContext};

/// Issuer reserve account for USDC on Algorand
pub const DEFAULT_RESERVE_ACCOUNT: &str =
	"2UEQTE5QDNXPI7M3TU44G6SYKLFWLPQO7EBZM7K7MHMQQMFI4QJPLHQFHM";

#[derive(Debug, Deserialize)]
struct AccountResponse {
	account: Option<Account>,
}

#[derive(Debug, Deserialize)]
struct Account {
	#[serde(default)]
	assets: Vec<AssetHolding>,
}

#[derive(Debug, Deserialize)]
struct AssetHolding {
	#[serde(rename = "asset-id")]
	asset_id: u64,
	amount: u64,
}

#[derive(Debug)]
pub struct AlgorandAdapter {
	config: Adapter,
	reserve_account: String,
	http: HttpContext,
}

impl AlgorandAdapter {
	pub fn new(http: HttpContext) -> Self {
		Self::with_reserve_account(http, DEFAULT_RESERVE_ACCOUNT)
	}

	pub fn with_reserve_account(http: HttpContext, reserve_account: impl Into<String>) -> Self {
		Self {
			config: Adapter::new("algorand-v1", "Algorand indexer"),
			reserve_account: reserve_account.into(),
			http,
		}
	}

	pub fn reserve_account(&self) -> &str {
		&self.reserve_account
	}
}

/// `u64::MAX - reserve`, the circulating amount in raw units
pub fn circulating_from_reserve(reserve: u64) -> RawAmount {
	RawAmount::from(u64::MAX - reserve)
}

#[async_trait]
impl SupplyAdapter for AlgorandAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		ChainType::Algorand
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let asset_id: u64 = chain.contract_address.trim().parse().map_err(|_| {
			AdapterError::configuration(
				&chain.id,
				format!("Algorand asset id '{}' is not an integer", chain.contract_address),
			)
		})?;

		let url = endpoint(chain, &format!("v2/accounts/{}", self.reserve_account), &[])?;
		let response: AccountResponse = self.http.get_json(&chain.id, &url).await?;
		let account = response
			.account
			.ok_or_else(|| AdapterError::decode(&chain.id, DecodeError::missing("account")))?;

		let holding = account
			.assets
			.iter()
			.find(|holding| holding.asset_id == asset_id)
			.ok_or_else(|| {
				AdapterError::decode(
					&chain.id,
					DecodeError::shape(format!(
						"reserve account holds no asset {}",
						asset_id
					)),
				)
			})?;
		debug!(
			"Algorand reserve {} holds {} of asset {}",
			self.reserve_account, holding.amount, asset_id
		);

		circulating_from_reserve(holding.amount)
			.scale(chain.decimals)
			.map_err(|e| AdapterError::decode(&chain.id, e))
	}
}
