//! Error taxonomy shared by the provider adapters and chain clients
//!
//! Every variant here is absorbed at the aggregator or tracker boundary;
//! none of these errors crosses the engine's public surface.

use thiserror::Error;

/// Result type for swap-provider adapter operations
pub type AdapterResult<T> = Result<T, AdapterError>;

/// Result type for chain explorer/RPC client operations
pub type ChainResult<T> = Result<T, ChainError>;

/// Failures local to one swap provider during one aggregation round
#[derive(Error, Debug)]
pub enum AdapterError {
	#[error("http error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("provider timed out")]
	Timeout,

	#[error("provider error: {message}")]
	Provider { message: String },

	#[error("response decoding failed: {0}")]
	Decode(#[from] serde_json::Error),

	#[error("no route for the requested pair")]
	RouteUnavailable,

	#[error("swap amount below provider minimum of {minimum}")]
	AmountTooSmall { minimum: String },
}

/// Failures local to one chain's explorer/RPC endpoint
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("http error: {0}")]
	Network(#[from] reqwest::Error),

	#[error("response decoding failed: {0}")]
	Decode(#[from] serde_json::Error),

	/// The endpoint answered but with contradictory or unusable fields
	#[error("chain protocol error: {detail}")]
	Protocol { detail: String },
}
