//! Per-contract metadata cache
//!
//! Resolved metadata identifiers (Aptos fungible-asset metadata addresses)
//! live for the whole process. Concurrent lookups for the same contract
//! share a single resolution; a failed resolution leaves the slot empty so
//! the next lookup retries.

use std::future::Future;
use std::sync::Arc;

use dashmap::DashMap;
use supply_types::AdapterResult;
use tokio::sync::OnceCell;
use tracing::debug;

/// Process-wide map from contract address to its resolved metadata identifier
#[derive(Debug, Default)]
pub struct MetadataCache {
	entries: DashMap<String, Arc<OnceCell<String>>>,
}

impl MetadataCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Cache pre-populated with known mappings
	pub fn seeded<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let cache = Self::new();
		for (contract, metadata) in entries {
			cache.insert(contract, metadata);
		}
		cache
	}

	/// Record a resolved identifier, replacing any earlier one
	pub fn insert(&self, contract: impl Into<String>, metadata: impl Into<String>) {
		let cell = OnceCell::new_with(Some(metadata.into()));
		self.entries.insert(contract.into(), Arc::new(cell));
	}

	pub fn get(&self, contract: &str) -> Option<String> {
		self.entries
			.get(contract)
			.and_then(|cell| cell.get().cloned())
	}

	/// Number of resolved entries
	pub fn len(&self) -> usize {
		self.entries
			.iter()
			.filter(|entry| entry.value().initialized())
			.count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Return the cached identifier or run `resolver` once to obtain it.
	///
	/// Callers racing on the same contract wait for the first resolver
	/// instead of issuing their own lookups.
	pub async fn resolve_with<F, Fut>(&self, contract: &str, resolver: F) -> AdapterResult<String>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = AdapterResult<String>>,
	{
		// Clone the cell out so no map shard lock is held across the await
		let cell = self
			.entries
			.entry(contract.to_string())
			.or_default()
			.value()
			.clone();

		if let Some(metadata) = cell.get() {
			return Ok(metadata.clone());
		}

		debug!("Resolving metadata for contract {}", contract);
		cell.get_or_try_init(resolver).await.cloned()
	}
}
