//! Mock adapters for testing
//!
//! Adapters that answer without touching the network, with configurable
//! latency and a call counter so tests can assert routing and fan-out.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use supply_types::{
	Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, SupplyAdapter,
};

#[derive(Debug, Clone)]
enum MockBehavior {
	Supply(f64),
	Fail(AdapterError),
}

/// Mock adapter answering a fixed supply or a fixed error for one chain type
#[derive(Debug, Clone)]
pub struct MockSupplyAdapter {
	adapter: Adapter,
	chain_type: ChainType,
	behavior: MockBehavior,
	delay: Option<Duration>,
	calls: Arc<AtomicUsize>,
}

impl MockSupplyAdapter {
	fn build(chain_type: ChainType, behavior: MockBehavior) -> Self {
		Self {
			adapter: Adapter::new(&format!("mock-{}", chain_type), "Mock Supply Adapter"),
			chain_type,
			behavior,
			delay: None,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	/// Always return `supply`
	pub fn with_supply(chain_type: ChainType, supply: f64) -> Self {
		Self::build(chain_type, MockBehavior::Supply(supply))
	}

	/// Always fail with `error`, re-attributed to the chain being queried
	pub fn failing(chain_type: ChainType, error: AdapterError) -> Self {
		Self::build(chain_type, MockBehavior::Fail(error))
	}

	/// Always fail with a transport error, as an unreachable node would
	pub fn unreachable(chain_type: ChainType) -> Self {
		Self::failing(
			chain_type,
			AdapterError::transport("", "connection refused"),
		)
	}

	/// Sleep before answering
	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	/// Number of `fetch_supply` calls, shared across clones
	pub fn call_count(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SupplyAdapter for MockSupplyAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.adapter
	}

	fn chain_type(&self) -> ChainType {
		self.chain_type
	}

	async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		match &self.behavior {
			MockBehavior::Supply(supply) => Ok(*supply),
			MockBehavior::Fail(error) => Err(error.clone().with_chain(&chain.id)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_clones_share_call_count() {
		let mock = MockSupplyAdapter::with_supply(ChainType::Evm, 3.0);
		let clone = mock.clone();
		let chain = ChainConfig::new("ethereum", "USDC", ChainType::Evm, "0x1", 6, "http://x");

		assert_eq!(clone.fetch_supply(&chain).await.unwrap(), 3.0);
		assert_eq!(mock.call_count(), 1);
	}

	#[tokio::test]
	async fn test_failure_is_attributed_to_queried_chain() {
		let mock = MockSupplyAdapter::unreachable(ChainType::Near);
		let chain = ChainConfig::new("near", "USDC", ChainType::Near, "usdc.near", 6, "http://x");

		let err = mock.fetch_supply(&chain).await.unwrap_err();
		assert_eq!(err.chain_id(), "near");
		assert_eq!(err.to_string(), "request failed: connection refused");
	}
}
