//! Supply Types
//!
//! Shared models, errors and traits for the multi-chain supply aggregator.
//! Adapters, the router and the orchestrator all speak in these types.

pub mod adapters;
pub mod chains;
pub mod models;
pub mod supply;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use adapters::{Adapter, AdapterError, AdapterResult, ErrorKind, SupplyAdapter};
pub use chains::{ChainConfig, ChainType};
pub use models::{
	parse_scaled_decimal, scale, tron_base58_to_hex, xrpl_hex_currency_code, DecodeError,
	RawAmount, MAX_DECIMALS,
};
pub use supply::{AggregateReport, SupplyResult, TokenSummary};
