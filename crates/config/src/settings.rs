//! Configuration settings structures

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use supply_types::{ChainConfig, ChainType, MAX_DECIMALS};
use thiserror::Error;
use url::Url;

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Settings {
	#[serde(default)]
	pub chains: Vec<ChainSettings>,
	#[serde(default)]
	pub timeouts: TimeoutSettings,
	#[serde(default)]
	pub logging: LoggingSettings,
}

/// One token deployment on one chain
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChainSettings {
	pub id: String,
	/// Display name; defaults to the id
	pub name: Option<String>,
	pub token: String,
	/// Chain family tag, e.g. `evm`, `tron`, `aptos`
	pub chain_type: String,
	pub contract_address: String,
	pub decimals: u32,
	pub rpc_url: String,
	#[serde(default)]
	pub explorer_url: String,
	#[serde(default)]
	pub explorer_address_path: String,
	#[serde(default)]
	pub color: String,
	#[serde(default = "default_enabled")]
	pub enabled: bool,
}

fn default_enabled() -> bool {
	true
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Bound on a single network call
	pub request_ms: u64,
	/// Bound on a metadata/catalog lookup (Aptos probe)
	pub catalog_ms: u64,
	/// Backstop around one whole chain lookup
	pub per_chain_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			request_ms: 10_000,
			catalog_ms: 15_000,
			per_chain_ms: 45_000,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Deployment defects detected while loading settings
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
	#[error("chain '{chain_id}': unknown chain type '{chain_type}'")]
	UnknownChainType { chain_id: String, chain_type: String },

	#[error("duplicate chain id '{chain_id}'")]
	DuplicateChainId { chain_id: String },

	#[error("chain entry with empty id")]
	EmptyChainId,

	#[error("chain '{chain_id}': invalid rpc_url '{rpc_url}': {reason}")]
	InvalidRpcUrl {
		chain_id: String,
		rpc_url: String,
		reason: String,
	},

	#[error("chain '{chain_id}': contract_address must not be empty")]
	MissingContractAddress { chain_id: String },

	#[error("chain '{chain_id}': decimals {decimals} exceed the maximum of {max}")]
	DecimalsOutOfRange {
		chain_id: String,
		decimals: u32,
		max: u32,
	},

	#[error("timeouts.{field} must be greater than zero")]
	ZeroTimeout { field: &'static str },
}

impl ChainSettings {
	/// Parse and check this entry, producing the runtime chain configuration
	pub fn to_chain_config(&self) -> Result<ChainConfig, ConfigValidationError> {
		if self.id.trim().is_empty() {
			return Err(ConfigValidationError::EmptyChainId);
		}
		let chain_type: ChainType =
			self.chain_type
				.parse()
				.map_err(|_| ConfigValidationError::UnknownChainType {
					chain_id: self.id.clone(),
					chain_type: self.chain_type.clone(),
				})?;
		if self.rpc_url.trim().is_empty() {
			return Err(ConfigValidationError::InvalidRpcUrl {
				chain_id: self.id.clone(),
				rpc_url: self.rpc_url.clone(),
				reason: "empty".to_string(),
			});
		}
		Url::parse(&self.rpc_url).map_err(|e| ConfigValidationError::InvalidRpcUrl {
			chain_id: self.id.clone(),
			rpc_url: self.rpc_url.clone(),
			reason: e.to_string(),
		})?;
		if self.contract_address.trim().is_empty() {
			return Err(ConfigValidationError::MissingContractAddress {
				chain_id: self.id.clone(),
			});
		}
		if self.decimals > MAX_DECIMALS {
			return Err(ConfigValidationError::DecimalsOutOfRange {
				chain_id: self.id.clone(),
				decimals: self.decimals,
				max: MAX_DECIMALS,
			});
		}

		let mut config = ChainConfig::new(
			self.id.clone(),
			self.token.clone(),
			chain_type,
			self.contract_address.clone(),
			self.decimals,
			self.rpc_url.clone(),
		);
		if let Some(name) = &self.name {
			config.display_name = name.clone();
		}
		config.explorer_url = self.explorer_url.clone();
		config.explorer_address_path = self.explorer_address_path.clone();
		config.color = self.color.clone();
		Ok(config)
	}
}

impl Settings {
	/// Get enabled chains only, in configuration order
	pub fn enabled_chains(&self) -> impl Iterator<Item = &ChainSettings> {
		self.chains.iter().filter(|chain| chain.enabled)
	}

	/// Check every chain entry (disabled ones included) and the timeouts
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		for (field, value) in [
			("request_ms", self.timeouts.request_ms),
			("catalog_ms", self.timeouts.catalog_ms),
			("per_chain_ms", self.timeouts.per_chain_ms),
		] {
			if value == 0 {
				return Err(ConfigValidationError::ZeroTimeout { field });
			}
		}

		let mut seen = HashSet::new();
		for chain in &self.chains {
			chain.to_chain_config()?;
			if !seen.insert(chain.id.as_str()) {
				return Err(ConfigValidationError::DuplicateChainId {
					chain_id: chain.id.clone(),
				});
			}
		}
		Ok(())
	}

	/// Runtime configurations of the enabled chains, in configuration order
	pub fn chain_configs(&self) -> Result<Vec<ChainConfig>, ConfigValidationError> {
		self.enabled_chains()
			.map(ChainSettings::to_chain_config)
			.collect()
	}
}
