//! Core adapter trait implemented once per chain family

use async_trait::async_trait;
use std::fmt::Debug;

use super::{Adapter, AdapterResult};
use crate::{ChainConfig, ChainType};

/// Fetches and decodes the total supply of one token on one chain family.
///
/// Implementations perform a bounded number of network round trips, never
/// retry, and return the supply already scaled into whole-token units.
#[async_trait]
pub trait SupplyAdapter: Send + Sync + Debug {
	/// Get adapter information
	fn adapter_info(&self) -> &Adapter;

	/// Chain family this adapter services
	fn chain_type(&self) -> ChainType;

	/// Get adapter ID
	fn id(&self) -> &str {
		&self.adapter_info().adapter_id
	}

	/// Get human-readable name for this adapter
	fn name(&self) -> &str {
		&self.adapter_info().name
	}

	/// Query the chain and return the scaled total supply
	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64>;
}
