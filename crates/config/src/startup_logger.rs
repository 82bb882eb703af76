//! Startup and completion logging for the supply aggregator

use std::env;

use supply_types::AggregateReport;
use tracing::{info, warn};

use crate::Settings;

/// Logs service information at startup
pub fn log_service_info() {
	// Use the root package name, not the current crate
	let service_name = "supply-aggregator";
	let service_version = env!("CARGO_PKG_VERSION");

	info!("=== Supply Aggregator Starting ===");
	info!("🚀 Service: {} v{}", service_name, service_version);
	info!("💻 Platform: {}", env::consts::OS);
	info!("🏗️ Architecture: {}", env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}

	if let Ok(rust_log) = env::var("RUST_LOG") {
		info!("🔧 Log Level: {}", rust_log);
	}

	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

/// Logs the loaded chain set and timeouts
pub fn log_configuration(settings: &Settings) {
	let enabled = settings.enabled_chains().count();
	info!(
		"⛓️ Chains: {} configured, {} enabled",
		settings.chains.len(),
		enabled
	);
	for chain in settings.enabled_chains() {
		info!(
			"   {} [{}] {} on {}",
			chain.id, chain.chain_type, chain.token, chain.rpc_url
		);
	}
	info!(
		"⏱️ Timeouts: request {}ms, catalog {}ms, per chain {}ms",
		settings.timeouts.request_ms, settings.timeouts.catalog_ms, settings.timeouts.per_chain_ms
	);
	if enabled == 0 {
		warn!("No enabled chains; the report will be empty");
	}
}

/// Logs the outcome of one aggregation run
pub fn log_run_complete(report: &AggregateReport) {
	info!(
		"✅ Aggregation finished: {}/{} chains reporting",
		report.success_count(),
		report.len()
	);
	for summary in report.token_summaries() {
		info!(
			"   {}: {} across {}/{} chains",
			summary.token, summary.total_supply, summary.chains_reporting, summary.chains_configured
		);
	}
	for failed in report.results.iter().filter(|r| !r.is_success()) {
		warn!(
			"   {} failed: {}",
			failed.chain_id,
			failed.error().unwrap_or_default()
		);
	}
}
