//! Configuration mocks and builders for tests

use supply_aggregator::config::{
	ChainSettings, LogFormat, LoggingSettings, Settings, TimeoutSettings,
};

/// Configuration builders for tests
#[allow(dead_code)]
pub struct MockConfigs;

#[allow(dead_code)]
impl MockConfigs {
	/// Minimal test settings with short timeouts and no chains
	pub fn test_settings() -> Settings {
		Settings {
			chains: Vec::new(),
			timeouts: TimeoutSettings {
				request_ms: 2_000,
				catalog_ms: 2_000,
				per_chain_ms: 5_000,
			},
			logging: LoggingSettings {
				level: "debug".to_string(),
				format: LogFormat::Compact,
				structured: false,
			},
		}
	}

	/// Test settings over the given chains
	pub fn settings_with_chains(chains: Vec<ChainSettings>) -> Settings {
		Settings {
			chains,
			..Self::test_settings()
		}
	}

	/// One enabled chain entry
	pub fn chain(
		id: &str,
		token: &str,
		chain_type: &str,
		contract_address: &str,
		decimals: u32,
		rpc_url: &str,
	) -> ChainSettings {
		ChainSettings {
			id: id.to_string(),
			name: None,
			token: token.to_string(),
			chain_type: chain_type.to_string(),
			contract_address: contract_address.to_string(),
			decimals,
			rpc_url: rpc_url.to_string(),
			explorer_url: String::new(),
			explorer_address_path: String::new(),
			color: String::new(),
			enabled: true,
		}
	}

	/// EVM chain entry for a USDC-like 6-decimal token
	pub fn evm_chain(id: &str, rpc_url: &str) -> ChainSettings {
		Self::chain(
			id,
			"USDC",
			"evm",
			"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
			6,
			rpc_url,
		)
	}
}
