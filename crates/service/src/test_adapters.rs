//! In-crate adapter doubles for router and orchestrator tests

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use supply_types::{Adapter, AdapterError, AdapterResult, ChainConfig, ChainType, SupplyAdapter};
use tokio::time::{sleep, Duration};

#[derive(Debug)]
enum Behaviour {
	Supply(f64),
	Fail(AdapterError),
	Panic,
}

#[derive(Debug)]
pub struct StaticAdapter {
	config: Adapter,
	chain_type: ChainType,
	behaviour: Behaviour,
	delay_ms: u64,
	calls: AtomicUsize,
}

impl StaticAdapter {
	fn build(chain_type: ChainType, behaviour: Behaviour) -> Self {
		Self {
			config: Adapter::new(&format!("static-{}", chain_type), "Static test adapter"),
			chain_type,
			behaviour,
			delay_ms: 0,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn supply(chain_type: ChainType, supply: f64) -> Self {
		Self::build(chain_type, Behaviour::Supply(supply))
	}

	pub fn failing(chain_type: ChainType, error: AdapterError) -> Self {
		Self::build(chain_type, Behaviour::Fail(error))
	}

	pub fn panicking(chain_type: ChainType) -> Self {
		Self::build(chain_type, Behaviour::Panic)
	}

	pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
		self.delay_ms = delay_ms;
		self
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl SupplyAdapter for StaticAdapter {
	fn adapter_info(&self) -> &Adapter {
		&self.config
	}

	fn chain_type(&self) -> ChainType {
		self.chain_type
	}

	async fn fetch_supply(&self, _chain: &ChainConfig) -> AdapterResult<f64> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		if self.delay_ms > 0 {
			sleep(Duration::from_millis(self.delay_ms)).await;
		}
		match &self.behaviour {
			Behaviour::Supply(supply) => Ok(*supply),
			Behaviour::Fail(error) => Err(error.clone()),
			Behaviour::Panic => panic!("adapter blew up"),
		}
	}
}
