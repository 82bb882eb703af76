//! Supply Configuration
//!
//! Settings, loading and startup utilities for the supply aggregator.

pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use loader::{load_config, load_config_from, load_config_str, ConfigLoadError};
pub use settings::{
	ChainSettings, ConfigValidationError, LogFormat, LoggingSettings, Settings, TimeoutSettings,
};
pub use startup_logger::{log_configuration, log_run_complete, log_service_info};
