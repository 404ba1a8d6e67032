//! Chainflow Chains
//!
//! One client per chain family, each absorbing its explorer or node's
//! response shape and answering in canonical types: a [`StatusObservation`]
//! for status polls, plain integers for fee-price lookups. No raw provider
//! schema leaves this crate.

use async_trait::async_trait;
use chainflow_types::{Chain, ChainResult, StatusObservation};

pub mod cardano;
pub mod cosmos;
pub mod endpoints;
pub mod evm;
pub mod polkadot;
pub mod ripple;
pub mod router;
pub mod solana;
pub mod sui;
pub mod thorchain;
pub mod ton;
pub mod tron;
pub mod utxo;

pub use endpoints::Endpoints;
pub use router::ChainRouter;

/// Status lookup for one chain family
///
/// A `NotFound` observation is an ordinary answer, not an error; errors are
/// reserved for transport and decoding failures the tracker will absorb.
#[async_trait]
pub trait StatusProvider: Send + Sync + std::fmt::Debug {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation>;
}

/// Suggested byte-fee rate for UTXO chains, in sats per vbyte
#[async_trait]
pub trait ByteFeeSource: Send + Sync + std::fmt::Debug {
	async fn byte_fee_rate(&self, chain: Chain) -> ChainResult<u64>;
}

/// Current gas price for EVM chains, in wei
#[async_trait]
pub trait GasPriceSource: Send + Sync + std::fmt::Debug {
	async fn gas_price(&self, chain: Chain) -> ChainResult<u128>;
}

/// Flat network fee for simple account-model chains, in the smallest unit
#[async_trait]
pub trait FlatFeeSource: Send + Sync + std::fmt::Debug {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128>;
}
