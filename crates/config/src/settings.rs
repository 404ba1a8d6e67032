//! Configuration settings structures
//!
//! Every operational knob the engine exposes, with the defaults the
//! components document: retry counts, timeouts, cache TTLs, the regional
//! gate list and every endpoint override. Values here are configuration
//! defaults, not hardcoded behavior.

use chainflow_adapters::ProviderEndpoints;
use chainflow_chains::Endpoints;
use serde::{Deserialize, Serialize};

/// Main engine settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub timeouts: TimeoutSettings,
	pub retry: RetrySettings,
	pub cache: CacheSettings,
	pub gates: GateSettings,
	pub tracking: TrackingSettings,
	pub logging: LoggingSettings,
	pub chain_endpoints: Endpoints,
	pub provider_endpoints: ProviderEndpoints,
}

/// Timeout configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TimeoutSettings {
	/// Per-provider quote timeout in milliseconds; isolated, not global
	pub per_provider_ms: u64,
	/// Request timeout for the shared HTTP clients
	pub request_ms: u64,
}

impl Default for TimeoutSettings {
	fn default() -> Self {
		Self {
			per_provider_ms: 3_000,
			request_ms: 10_000,
		}
	}
}

/// Retry configuration for fee/price lookups (quote fetches never retry)
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RetrySettings {
	pub attempts: u32,
	pub backoff_ms: u64,
}

impl Default for RetrySettings {
	fn default() -> Self {
		Self {
			attempts: 3,
			backoff_ms: 500,
		}
	}
}

/// Cache configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct CacheSettings {
	/// TTL for fee-price and gas-price entries, in seconds
	pub fee_price_ttl_secs: u64,
}

impl Default for CacheSettings {
	fn default() -> Self {
		Self {
			fee_price_ttl_secs: 120,
		}
	}
}

/// Regional feature gating
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GateSettings {
	/// BCP-47 style locale tag of the running device
	pub locale: Option<String>,
	/// Locales where swapping is unavailable
	pub restricted_locales: Vec<String>,
	/// Optional server endpoint for the disabled-provider list
	pub remote_gates_url: Option<String>,
}

impl Default for GateSettings {
	fn default() -> Self {
		Self {
			locale: None,
			restricted_locales: vec!["en-GB".to_string()],
			remote_gates_url: None,
		}
	}
}

impl GateSettings {
	/// Whether the configured locale falls under the swap restriction
	pub fn swap_restricted(&self) -> bool {
		match &self.locale {
			Some(locale) => self
				.restricted_locales
				.iter()
				.any(|restricted| restricted.eq_ignore_ascii_case(locale)),
			None => false,
		}
	}
}

/// Status tracking configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TrackingSettings {
	/// Not-found polls tolerated before a record is flagged stale
	pub not_found_budget: u32,
}

impl Default for TrackingSettings {
	fn default() -> Self {
		Self {
			not_found_budget: 5,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}
