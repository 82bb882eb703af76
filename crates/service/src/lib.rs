//! Supply Service
//!
//! Chain-type routing and the concurrent fan-out that produces an
//! [`AggregateReport`](supply_types::AggregateReport).

pub mod aggregator;
pub mod router;

#[cfg(test)]
mod test_adapters;

pub use aggregator::{AggregatorService, DEFAULT_PER_CHAIN_TIMEOUT_MS};
pub use router::SupplyRouter;
