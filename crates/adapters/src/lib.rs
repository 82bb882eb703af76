//! Supply Adapters
//!
//! Chain-family specific adapters for the supply aggregator, plus the
//! registry that maps each [`ChainType`] to the adapter servicing it.

use std::collections::HashMap;
use std::sync::Arc;

pub mod algorand_adapter;
pub mod aptos_adapter;
pub mod client_cache;
pub mod evm_adapter;
pub mod hedera_adapter;
pub mod http;
pub mod liquid_adapter;
pub mod metadata_cache;
pub mod near_adapter;
pub mod noble_adapter;
pub mod polkadot_adapter;
pub mod solana_adapter;
pub mod starknet_adapter;
pub mod stellar_adapter;
pub mod sui_adapter;
pub mod tezos_adapter;
pub mod ton_adapter;
pub mod xrpl_adapter;

pub use algorand_adapter::AlgorandAdapter;
pub use aptos_adapter::AptosAdapter;
pub use client_cache::{ClientCache, ClientConfig};
pub use evm_adapter::EvmAdapter;
pub use hedera_adapter::HederaAdapter;
pub use http::{AdapterTimeouts, HttpContext};
pub use liquid_adapter::LiquidAdapter;
pub use metadata_cache::MetadataCache;
pub use near_adapter::NearAdapter;
pub use noble_adapter::NobleAdapter;
pub use polkadot_adapter::PolkadotAdapter;
pub use solana_adapter::SolanaAdapter;
pub use starknet_adapter::StarknetAdapter;
pub use stellar_adapter::StellarAdapter;
pub use sui_adapter::SuiAdapter;
pub use supply_types::{AdapterError, AdapterResult, SupplyAdapter};
pub use tezos_adapter::TezosAdapter;
pub use ton_adapter::TonAdapter;
pub use xrpl_adapter::XrplAdapter;

use supply_types::ChainType;
use tracing::debug;

/// Chain type to adapter dispatch table
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<ChainType, Arc<dyn SupplyAdapter>>,
}

impl AdapterRegistry {
	/// Empty registry; every lookup fails until adapters are registered
	pub fn new() -> Self {
		Self::default()
	}

	/// Registry with one adapter per chain family, sharing default HTTP settings
	pub fn with_defaults() -> Self {
		Self::with_http(HttpContext::default(), Arc::new(MetadataCache::new()))
	}

	/// Registry with one adapter per chain family over the given HTTP context
	pub fn with_http(http: HttpContext, metadata: Arc<MetadataCache>) -> Self {
		let mut registry = Self::new();
		registry.register(Arc::new(EvmAdapter::new(http.clone())));
		registry.register(Arc::new(EvmAdapter::tron(http.clone())));
		registry.register(Arc::new(SolanaAdapter::new(http.clone())));
		registry.register(Arc::new(TonAdapter::new(http.clone())));
		registry.register(Arc::new(NearAdapter::new(http.clone())));
		registry.register(Arc::new(StellarAdapter::new(http.clone())));
		registry.register(Arc::new(AlgorandAdapter::new(http.clone())));
		registry.register(Arc::new(AptosAdapter::with_cache(http.clone(), metadata)));
		registry.register(Arc::new(HederaAdapter::new(http.clone())));
		registry.register(Arc::new(NobleAdapter::new(http.clone())));
		registry.register(Arc::new(PolkadotAdapter::new(http.clone())));
		registry.register(Arc::new(StarknetAdapter::new(http.clone())));
		registry.register(Arc::new(SuiAdapter::new(http.clone())));
		registry.register(Arc::new(XrplAdapter::new(http.clone())));
		registry.register(Arc::new(LiquidAdapter::new(http.clone())));
		registry.register(Arc::new(TezosAdapter::new(http)));
		registry
	}

	/// Register an adapter under the chain type it reports, replacing any previous one
	pub fn register(&mut self, adapter: Arc<dyn SupplyAdapter>) -> &mut Self {
		let chain_type = adapter.chain_type();
		debug!("Registering adapter '{}' for {}", adapter.id(), chain_type);
		self.adapters.insert(chain_type, adapter);
		self
	}

	pub fn get(&self, chain_type: ChainType) -> Option<Arc<dyn SupplyAdapter>> {
		self.adapters.get(&chain_type).cloned()
	}

	/// Supported chain types in declaration order
	pub fn supported_chain_types(&self) -> Vec<ChainType> {
		ChainType::ALL
			.into_iter()
			.filter(|chain_type| self.adapters.contains_key(chain_type))
			.collect()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
