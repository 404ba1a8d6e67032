//! Chainflow Config
//!
//! Settings structures and file/environment loading for the engine.

pub mod loader;
pub mod settings;

pub use loader::load_config;
pub use settings::{
	CacheSettings, GateSettings, LogFormat, LoggingSettings, RetrySettings, Settings,
	TimeoutSettings, TrackingSettings,
};
