//! Centralized mocks and fixtures for testing
//!
//! Chain and settings fixtures shared across the integration tests.

pub mod configs;

// Re-export commonly used items for convenience
#[allow(unused_imports)]
pub use configs::MockConfigs;
