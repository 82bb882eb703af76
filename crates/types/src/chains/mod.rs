//! Chain configuration domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::adapters::AdapterError;

/// Closed set of chain families, each serviced by exactly one adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChainType {
	Evm,
	Tron,
	Solana,
	Ton,
	Near,
	Stellar,
	Algorand,
	Aptos,
	Hedera,
	Noble,
	Polkadot,
	Starknet,
	Sui,
	Xrpl,
	Liquid,
	Tezos,
}

impl ChainType {
	pub const ALL: [ChainType; 16] = [
		ChainType::Evm,
		ChainType::Tron,
		ChainType::Solana,
		ChainType::Ton,
		ChainType::Near,
		ChainType::Stellar,
		ChainType::Algorand,
		ChainType::Aptos,
		ChainType::Hedera,
		ChainType::Noble,
		ChainType::Polkadot,
		ChainType::Starknet,
		ChainType::Sui,
		ChainType::Xrpl,
		ChainType::Liquid,
		ChainType::Tezos,
	];

	/// Configuration tag for this chain type
	pub fn as_str(&self) -> &'static str {
		match self {
			ChainType::Evm => "evm",
			ChainType::Tron => "tron",
			ChainType::Solana => "solana",
			ChainType::Ton => "ton",
			ChainType::Near => "near",
			ChainType::Stellar => "stellar",
			ChainType::Algorand => "algorand",
			ChainType::Aptos => "aptos",
			ChainType::Hedera => "hedera",
			ChainType::Noble => "noble",
			ChainType::Polkadot => "polkadot",
			ChainType::Starknet => "starknet",
			ChainType::Sui => "sui",
			ChainType::Xrpl => "xrpl",
			ChainType::Liquid => "liquid",
			ChainType::Tezos => "tezos",
		}
	}
}

impl fmt::Display for ChainType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ChainType {
	type Err = AdapterError;

	fn from_str(tag: &str) -> Result<Self, Self::Err> {
		ChainType::ALL
			.iter()
			.copied()
			.find(|chain_type| chain_type.as_str() == tag)
			.ok_or_else(|| AdapterError::Configuration {
				chain_id: String::new(),
				reason: format!("unknown chain type '{}'", tag),
			})
	}
}

/// Static per-deployment description of one token on one chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
	/// Unique chain identifier, e.g. `ethereum`
	pub id: String,

	/// Human-readable chain name
	pub display_name: String,

	/// Token symbol, e.g. `USDC`
	pub token: String,

	/// Contract, mint, denom, asset id or issuer, depending on the chain family
	pub contract_address: String,

	/// Exponent applied to the raw integer supply
	pub decimals: u32,

	/// RPC or REST endpoint
	pub rpc_url: String,

	pub explorer_url: String,

	pub explorer_address_path: String,

	/// Selects the adapter servicing this chain
	pub chain_type: ChainType,

	/// Display colour carried through to results
	pub color: String,
}

impl ChainConfig {
	/// Minimal config for the given chain; display fields are left empty
	pub fn new(
		id: impl Into<String>,
		token: impl Into<String>,
		chain_type: ChainType,
		contract_address: impl Into<String>,
		decimals: u32,
		rpc_url: impl Into<String>,
	) -> Self {
		let id = id.into();
		Self {
			display_name: id.clone(),
			id,
			token: token.into(),
			contract_address: contract_address.into(),
			decimals,
			rpc_url: rpc_url.into(),
			explorer_url: String::new(),
			explorer_address_path: String::new(),
			chain_type,
			color: String::new(),
		}
	}

	/// RPC URL without a trailing slash, for appending REST paths
	pub fn base_url(&self) -> &str {
		self.rpc_url.trim_end_matches('/')
	}
}
