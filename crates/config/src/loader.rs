//! Configuration loading utilities

use crate::Settings;
use config::{Config, ConfigError, Environment, File};

/// Load configuration from the config file and environment
///
/// Missing files are fine; every field has a documented default. Environment
/// variables prefixed `CHAINFLOW_` override file values.
pub fn load_config() -> Result<Settings, ConfigError> {
	let s = Config::builder()
		.add_source(File::with_name("config/chainflow").required(false))
		.add_source(Environment::with_prefix("CHAINFLOW").separator("__"))
		.build()?;

	s.try_deserialize()
}
