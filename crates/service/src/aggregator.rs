//! Concurrent fan-out over all configured chains

use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use supply_types::{AdapterError, AggregateReport, ChainConfig, SupplyResult};
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::router::SupplyRouter;

/// Backstop around one whole chain lookup, multi-call protocols included
pub const DEFAULT_PER_CHAIN_TIMEOUT_MS: u64 = 45_000;

/// Service that queries every configured chain concurrently
#[derive(Debug, Clone)]
pub struct AggregatorService {
	router: Arc<SupplyRouter>,
	per_chain_timeout_ms: u64,
}

impl AggregatorService {
	pub fn new(router: Arc<SupplyRouter>, per_chain_timeout_ms: u64) -> Self {
		Self {
			router,
			per_chain_timeout_ms,
		}
	}

	pub fn router(&self) -> &SupplyRouter {
		&self.router
	}

	/// Query every chain and assemble a report in input order.
	///
	/// Never fails as a whole: each chain settles into either a supply or an
	/// error, and the timestamp is taken once all of them have settled.
	pub async fn aggregate(&self, chains: &[ChainConfig]) -> AggregateReport {
		info!("Aggregating supply across {} chains", chains.len());

		let tasks = chains.iter().cloned().map(|chain| {
			let router = Arc::clone(&self.router);
			let per_chain_timeout_ms = self.per_chain_timeout_ms;

			tokio::spawn(async move {
				debug!("Starting supply fetch for {}", chain.id);
				let outcome = match timeout(
					Duration::from_millis(per_chain_timeout_ms),
					router.route(&chain),
				)
				.await
				{
					Ok(outcome) => outcome,
					Err(_) => Err(AdapterError::timeout(&chain.id, per_chain_timeout_ms)),
				};
				settle(&chain, outcome)
			})
		});

		let joined = join_all(tasks).await;
		let results: Vec<SupplyResult> = joined
			.into_iter()
			.zip(chains)
			.map(|(joined, chain)| match joined {
				Ok(result) => result,
				Err(join_error) => {
					let error = AdapterError::transport(
						&chain.id,
						format!("supply task aborted: {}", join_error),
					);
					warn!("Supply fetch for {} failed: {}", chain.id, error);
					SupplyResult::failure(chain, &error)
				},
			})
			.collect();

		let report = AggregateReport::new(results, Utc::now());
		info!(
			"Supply aggregation completed: {} of {} chains reporting",
			report.success_count(),
			report.len()
		);
		report
	}
}

fn settle(chain: &ChainConfig, outcome: Result<f64, AdapterError>) -> SupplyResult {
	match outcome {
		Ok(supply) => {
			debug!("{} supply: {}", chain.id, supply);
			SupplyResult::success(chain, supply)
		},
		Err(error) => {
			warn!("Supply fetch for {} failed: {}", chain.id, error);
			SupplyResult::failure(chain, &error)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::test_adapters::StaticAdapter;
	use supply_adapters::AdapterRegistry;
	use supply_types::{ChainType, ErrorKind};

	fn chain(id: &str, chain_type: ChainType) -> ChainConfig {
		ChainConfig::new(id, "USDC", chain_type, "0xabc", 6, "http://127.0.0.1:9")
	}

	fn service(adapters: Vec<StaticAdapter>, per_chain_timeout_ms: u64) -> AggregatorService {
		let mut registry = AdapterRegistry::new();
		for adapter in adapters {
			registry.register(Arc::new(adapter));
		}
		let router = SupplyRouter::new(Arc::new(registry));
		AggregatorService::new(Arc::new(router), per_chain_timeout_ms)
	}

	#[tokio::test]
	async fn test_results_follow_input_order_despite_latency() {
		let service = service(
			vec![
				StaticAdapter::supply(ChainType::Evm, 1.0).with_delay_ms(80),
				StaticAdapter::supply(ChainType::Sui, 2.0),
				StaticAdapter::supply(ChainType::Ton, 3.0).with_delay_ms(30),
			],
			DEFAULT_PER_CHAIN_TIMEOUT_MS,
		);
		let chains = vec![
			chain("ethereum", ChainType::Evm),
			chain("sui", ChainType::Sui),
			chain("ton", ChainType::Ton),
		];

		let report = service.aggregate(&chains).await;

		let ids: Vec<&str> = report.results.iter().map(|r| r.chain_id.as_str()).collect();
		assert_eq!(ids, vec!["ethereum", "sui", "ton"]);
		let supplies: Vec<Option<f64>> = report.results.iter().map(|r| r.supply()).collect();
		assert_eq!(supplies, vec![Some(1.0), Some(2.0), Some(3.0)]);
	}

	#[tokio::test]
	async fn test_one_failure_is_isolated() {
		let service = service(
			vec![
				StaticAdapter::supply(ChainType::Evm, 5.0),
				StaticAdapter::failing(ChainType::Near, AdapterError::timeout("near", 10_000)),
				StaticAdapter::supply(ChainType::Sui, 6.0),
			],
			DEFAULT_PER_CHAIN_TIMEOUT_MS,
		);
		let chains = vec![
			chain("ethereum", ChainType::Evm),
			chain("near", ChainType::Near),
			chain("sui", ChainType::Sui),
			chain("base", ChainType::Evm),
		];

		let report = service.aggregate(&chains).await;

		assert_eq!(report.len(), 4);
		assert_eq!(report.success_count(), 3);
		assert_eq!(report.failure_count(), 1);
		let failed = &report.results[1];
		assert_eq!(failed.chain_id, "near");
		assert!(failed.supply().is_none());
		assert_eq!(failed.error(), Some("timeout occurred after 10000ms"));
	}

	#[tokio::test]
	async fn test_unknown_chain_type_becomes_configuration_result() {
		let service = service(
			vec![StaticAdapter::supply(ChainType::Evm, 1.0)],
			DEFAULT_PER_CHAIN_TIMEOUT_MS,
		);
		let report = service
			.aggregate(&[chain("tezos", ChainType::Tezos), chain("ethereum", ChainType::Evm)])
			.await;

		assert_eq!(report.results[0].error_kind(), Some(ErrorKind::Configuration));
		assert_eq!(report.results[1].supply(), Some(1.0));
	}

	#[tokio::test]
	async fn test_per_chain_backstop_timeout() {
		let service = service(
			vec![
				StaticAdapter::supply(ChainType::Aptos, 1.0).with_delay_ms(5_000),
				StaticAdapter::supply(ChainType::Evm, 2.0),
			],
			50,
		);
		let report = service
			.aggregate(&[chain("aptos", ChainType::Aptos), chain("ethereum", ChainType::Evm)])
			.await;

		assert_eq!(report.results[0].error(), Some("timeout occurred after 50ms"));
		assert_eq!(report.results[0].error_kind(), Some(ErrorKind::Transport));
		assert_eq!(report.results[1].supply(), Some(2.0));
	}

	#[tokio::test]
	async fn test_panicking_adapter_is_reported_not_propagated() {
		let service = service(
			vec![
				StaticAdapter::panicking(ChainType::Hedera),
				StaticAdapter::supply(ChainType::Evm, 2.0),
			],
			DEFAULT_PER_CHAIN_TIMEOUT_MS,
		);
		let report = service
			.aggregate(&[chain("hedera", ChainType::Hedera), chain("ethereum", ChainType::Evm)])
			.await;

		assert_eq!(report.results[0].error_kind(), Some(ErrorKind::Transport));
		assert!(report.results[0].error().unwrap().contains("supply task aborted"));
		assert_eq!(report.results[1].supply(), Some(2.0));
	}

	#[tokio::test]
	async fn test_repeated_aggregation_differs_only_in_timestamp() {
		let service = service(
			vec![
				StaticAdapter::supply(ChainType::Evm, 7.5),
				StaticAdapter::failing(
					ChainType::Starknet,
					AdapterError::configuration("starknet", "unknown contract"),
				),
			],
			DEFAULT_PER_CHAIN_TIMEOUT_MS,
		);
		let chains = vec![
			chain("ethereum", ChainType::Evm),
			chain("starknet", ChainType::Starknet),
		];

		let first = service.aggregate(&chains).await;
		let second = service.aggregate(&chains).await;

		assert_eq!(first.results, second.results);
		assert!(second.timestamp >= first.timestamp);
	}

	#[tokio::test]
	async fn test_empty_configuration() {
		let service = service(Vec::new(), DEFAULT_PER_CHAIN_TIMEOUT_MS);
		let report = service.aggregate(&[]).await;
		assert!(report.is_empty());
	}
}
