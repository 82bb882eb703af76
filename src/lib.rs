//! Supply Aggregator Library
//!
//! Queries the total supply of a token across heterogeneous blockchains and
//! assembles a per-chain report. Each chain family is serviced by an adapter
//! that knows its wire protocol; the aggregator fans out over every
//! configured chain and never fails as a whole.

use std::sync::Arc;

use supply_adapters::{AdapterTimeouts, ClientCache, HttpContext};
use thiserror::Error;
use tracing::info;

// Core domain types
pub use supply_types::{
	chrono,
	// External dependencies for convenience
	serde_json,
	Adapter,
	AdapterError,
	AdapterResult,
	AggregateReport,
	ChainConfig,
	ChainType,
	DecodeError,
	ErrorKind,
	SupplyAdapter,
	SupplyResult,
	TokenSummary,
};

// Adapters
pub use supply_adapters::{AdapterRegistry, MetadataCache};

// Service layer
pub use supply_service::{AggregatorService, SupplyRouter};

// Config
pub use supply_config::{
	load_config, log_configuration, log_run_complete, log_service_info, ConfigLoadError,
	ConfigValidationError, Settings,
};

pub mod adapters {
	pub use supply_adapters::*;
}

pub mod config {
	pub use supply_config::*;
}

pub mod service {
	pub use supply_service::*;
}

pub mod mocks;

// Re-export external dependencies for custom adapters
pub use async_trait;

/// Errors raised while assembling an aggregator
#[derive(Debug, Error)]
pub enum BuildError {
	#[error(transparent)]
	Validation(#[from] ConfigValidationError),
}

/// Builder pattern for configuring the aggregator
#[derive(Default)]
pub struct AggregatorBuilder {
	settings: Option<Settings>,
	adapter_registry: Option<AdapterRegistry>,
	adapters: Vec<Arc<dyn SupplyAdapter>>,
	metadata_cache: Option<Arc<MetadataCache>>,
	chains: Vec<ChainConfig>,
}

impl AggregatorBuilder {
	/// Create a builder with default settings and no chains
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a builder from the configuration file and environment
	pub fn from_config() -> Result<Self, ConfigLoadError> {
		Ok(Self::new().with_settings(load_config()?))
	}

	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Replace the default adapter set entirely
	pub fn with_registry(mut self, registry: AdapterRegistry) -> Self {
		self.adapter_registry = Some(registry);
		self
	}

	/// Register an adapter on top of the registry, replacing the one for its chain type
	pub fn with_adapter(mut self, adapter: Arc<dyn SupplyAdapter>) -> Self {
		self.adapters.push(adapter);
		self
	}

	/// Share or pre-seed the Aptos metadata cache
	pub fn with_metadata_cache(mut self, cache: Arc<MetadataCache>) -> Self {
		self.metadata_cache = Some(cache);
		self
	}

	/// Query an extra chain in addition to the configured ones
	pub fn with_chain(mut self, chain: ChainConfig) -> Self {
		self.chains.push(chain);
		self
	}

	/// Initialize tracing with configuration-based settings.
	///
	/// `RUST_LOG` takes precedence over the configured level. Logs go to
	/// stderr so stdout carries only the report.
	pub fn init_tracing(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		use supply_config::LogFormat;

		let settings = self.settings.clone().unwrap_or_default();
		let logging = &settings.logging;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

		match logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt()
					.json()
					.with_writer(std::io::stderr)
					.with_env_filter(env_filter);

				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_writer(std::io::stderr)
					.with_env_filter(env_filter);

				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_writer(std::io::stderr)
					.with_env_filter(env_filter);

				if logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			logging.level, logging.format, logging.structured
		);
		Ok(())
	}

	/// Validate settings and wire adapters, router and orchestrator together
	pub fn build(self) -> Result<SupplyAggregator, BuildError> {
		let settings = self.settings.unwrap_or_default();
		settings.validate()?;

		let mut chains = settings.chain_configs()?;
		chains.extend(self.chains);

		let mut registry = match self.adapter_registry {
			Some(registry) => registry,
			None => {
				let http = HttpContext::new(
					ClientCache::new(),
					AdapterTimeouts {
						request_ms: settings.timeouts.request_ms,
						catalog_ms: settings.timeouts.catalog_ms,
					},
				);
				let metadata = self
					.metadata_cache
					.unwrap_or_else(|| Arc::new(MetadataCache::new()));
				AdapterRegistry::with_http(http, metadata)
			},
		};
		for adapter in self.adapters {
			registry.register(adapter);
		}

		let router = Arc::new(SupplyRouter::new(Arc::new(registry)));
		let service = AggregatorService::new(router, settings.timeouts.per_chain_ms);
		info!(
			"Supply aggregator ready: {} chains, {} chain types supported",
			chains.len(),
			service.router().registry().len()
		);

		Ok(SupplyAggregator { service, chains })
	}
}

/// A configured aggregator over a fixed chain set
#[derive(Debug, Clone)]
pub struct SupplyAggregator {
	service: AggregatorService,
	chains: Vec<ChainConfig>,
}

impl SupplyAggregator {
	/// Chains queried by [`run_once`](Self::run_once), in report order
	pub fn chains(&self) -> &[ChainConfig] {
		&self.chains
	}

	pub fn service(&self) -> &AggregatorService {
		&self.service
	}

	/// One fan-out over every configured chain
	pub async fn run_once(&self) -> AggregateReport {
		self.service.aggregate(&self.chains).await
	}

	/// Fetch a single chain's supply through the router
	pub async fn fetch_supply(&self, chain: &ChainConfig) -> AdapterResult<f64> {
		self.service.router().route(chain).await
	}
}
