//! Chainflow Types
//!
//! Shared domain models for the transaction-economics engine: the chain
//! registry and family classifier, asset references, quotes, fee estimates,
//! canonical status records and the error taxonomy.

pub mod amount;
pub mod assets;
pub mod chains;
pub mod errors;
pub mod fees;
pub mod providers;
pub mod quotes;
pub mod status;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

// Re-export commonly used types for convenience
pub use amount::Amount;
pub use assets::AssetRef;
pub use chains::{Chain, ChainFamily, PollConfig, UtxoSizing, LEGACY_SIZING, SEGWIT_SIZING};
pub use errors::{AdapterError, AdapterResult, ChainError, ChainResult};
pub use fees::{FeeEstimate, FeeUnit};
pub use providers::SwapProvider;
pub use quotes::{Quote, QuoteRequest};
pub use status::{StatusObservation, TransactionStatusRecord, TxState};
