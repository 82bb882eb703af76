//! Configuration loading utilities

use crate::{ConfigValidationError, Settings};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use thiserror::Error;
use tracing::debug;

/// Default configuration file, resolved without extension
pub const DEFAULT_CONFIG_PATH: &str = "config/config";

/// Environment variable naming an alternative configuration file
pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";

/// Prefix of environment overrides, e.g. `SUPPLY__TIMEOUTS__REQUEST_MS`
pub const ENV_PREFIX: &str = "SUPPLY";

#[derive(Debug, Error)]
pub enum ConfigLoadError {
	#[error("failed to read configuration: {0}")]
	Config(#[from] ConfigError),

	#[error("invalid configuration: {0}")]
	Validation(#[from] ConfigValidationError),
}

/// Load configuration from `CONFIG_PATH` or the default file, then the environment
pub fn load_config() -> Result<Settings, ConfigLoadError> {
	match std::env::var(CONFIG_PATH_ENV) {
		Ok(path) => load_config_from(&path),
		Err(_) => finish(
			base_builder().add_source(File::with_name(DEFAULT_CONFIG_PATH).required(false)),
		),
	}
}

/// Load configuration from an explicit file path, then the environment
pub fn load_config_from(path: &str) -> Result<Settings, ConfigLoadError> {
	debug!("Loading configuration from {}", path);
	finish(base_builder().add_source(File::with_name(path).required(true)))
}

/// Parse configuration from an in-memory document (environment overrides still apply)
pub fn load_config_str(content: &str, format: FileFormat) -> Result<Settings, ConfigLoadError> {
	finish(base_builder().add_source(File::from_str(content, format)))
}

fn base_builder() -> ConfigBuilder<DefaultState> {
	Config::builder()
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Settings, ConfigLoadError> {
	let settings: Settings = builder
		.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.separator("__")
				.try_parsing(true),
		)
		.build()?
		.try_deserialize()?;
	settings.validate()?;
	Ok(settings)
}
