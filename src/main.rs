//! Supply Aggregator
//!
//! Runs one aggregation over the configured chains and prints the report as JSON

use supply_aggregator::{log_configuration, log_run_complete, log_service_info, AggregatorBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
	let builder = AggregatorBuilder::from_config()?;
	builder.init_tracing()?;

	log_service_info();
	if let Some(settings) = builder.settings() {
		log_configuration(settings);
	}

	let aggregator = builder.build()?;
	let report = aggregator.run_once().await;
	log_run_complete(&report);

	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}
