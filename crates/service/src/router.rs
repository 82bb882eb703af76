//! Chain-type dispatch

use std::sync::Arc;

use supply_adapters::AdapterRegistry;
use supply_types::{AdapterError, AdapterResult, ChainConfig, DecodeError};
use tracing::debug;

/// Routes a chain configuration to the adapter registered for its chain type
#[derive(Debug, Clone)]
pub struct SupplyRouter {
	registry: Arc<AdapterRegistry>,
}

impl SupplyRouter {
	pub fn new(registry: Arc<AdapterRegistry>) -> Self {
		Self { registry }
	}

	pub fn registry(&self) -> &AdapterRegistry {
		&self.registry
	}

	/// Fetch the scaled supply for one chain.
	///
	/// A chain type with no registered adapter fails with a configuration
	/// error before any I/O. Supplies that are negative or not finite are
	/// rejected as decode errors whatever adapter produced them.
	pub async fn route(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		let adapter = self.registry.get(chain.chain_type).ok_or_else(|| {
			AdapterError::configuration(
				&chain.id,
				format!("no adapter registered for chain type '{}'", chain.chain_type),
			)
		})?;
		debug!("Routing {} to adapter '{}'", chain.id, adapter.id());

		let supply = adapter
			.fetch_supply(chain)
			.await
			.map_err(|e| e.with_chain(&chain.id))?;

		if !supply.is_finite() || supply < 0.0 {
			return Err(AdapterError::decode(
				&chain.id,
				DecodeError::shape(format!("adapter returned invalid supply {}", supply)),
			));
		}
		Ok(supply)
	}
}
