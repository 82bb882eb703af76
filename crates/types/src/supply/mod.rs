//! Supply results and the aggregate report produced by one fan-out

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::adapters::{AdapterError, ErrorKind};
use crate::ChainConfig;

/// Outcome of one chain query.
///
/// Exactly one of `supply` and `error` is populated; the constructors are the
/// only way to build a result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyResult {
	pub chain_id: String,
	pub chain_name: String,
	pub token: String,
	supply: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	error_kind: Option<ErrorKind>,
	pub color: String,
	pub contract_address: String,
	pub explorer_url: String,
	pub explorer_address_path: String,
}

impl SupplyResult {
	fn from_config(
		chain: &ChainConfig,
		supply: Option<f64>,
		error: Option<(String, ErrorKind)>,
	) -> Self {
		let (error, error_kind) = match error {
			Some((message, kind)) => (Some(message), Some(kind)),
			None => (None, None),
		};
		Self {
			chain_id: chain.id.clone(),
			chain_name: chain.display_name.clone(),
			token: chain.token.clone(),
			supply,
			error,
			error_kind,
			color: chain.color.clone(),
			contract_address: chain.contract_address.clone(),
			explorer_url: chain.explorer_url.clone(),
			explorer_address_path: chain.explorer_address_path.clone(),
		}
	}

	pub fn success(chain: &ChainConfig, supply: f64) -> Self {
		Self::from_config(chain, Some(supply), None)
	}

	pub fn failure(chain: &ChainConfig, error: &AdapterError) -> Self {
		Self::from_config(chain, None, Some((error.to_string(), error.kind())))
	}

	pub fn supply(&self) -> Option<f64> {
		self.supply
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn error_kind(&self) -> Option<ErrorKind> {
		self.error_kind
	}

	pub fn is_success(&self) -> bool {
		self.supply.is_some()
	}
}

/// Per-token roll-up of a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSummary {
	pub token: String,
	/// Sum of every populated supply for the token
	pub total_supply: f64,
	/// Chains configured for the token, failed ones included
	pub chains_configured: usize,
	pub chains_reporting: usize,
}

/// Result of one fan-out across all configured chains, in input order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateReport {
	#[serde(rename = "data")]
	pub results: Vec<SupplyResult>,
	#[serde(with = "chrono::serde::ts_milliseconds")]
	pub timestamp: DateTime<Utc>,
}

impl AggregateReport {
	pub fn new(results: Vec<SupplyResult>, timestamp: DateTime<Utc>) -> Self {
		Self { results, timestamp }
	}

	pub fn len(&self) -> usize {
		self.results.len()
	}

	pub fn is_empty(&self) -> bool {
		self.results.is_empty()
	}

	pub fn success_count(&self) -> usize {
		self.results.iter().filter(|r| r.is_success()).count()
	}

	pub fn failure_count(&self) -> usize {
		self.results.len() - self.success_count()
	}

	/// Results for one token, preserving report order
	pub fn results_for<'a>(&'a self, token: &'a str) -> impl Iterator<Item = &'a SupplyResult> {
		self.results.iter().filter(move |r| r.token == token)
	}

	/// One summary per token in first-seen order
	pub fn token_summaries(&self) -> Vec<TokenSummary> {
		let mut summaries: Vec<TokenSummary> = Vec::new();
		for result in &self.results {
			let index = match summaries.iter().position(|s| s.token == result.token) {
				Some(index) => index,
				None => {
					summaries.push(TokenSummary {
						token: result.token.clone(),
						total_supply: 0.0,
						chains_configured: 0,
						chains_reporting: 0,
					});
					summaries.len() - 1
				},
			};
			let summary = &mut summaries[index];
			summary.chains_configured += 1;
			if let Some(supply) = result.supply {
				summary.total_supply += supply;
				summary.chains_reporting += 1;
			}
		}
		summaries
	}
}
