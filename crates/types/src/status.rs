//! Canonical transaction lifecycle types
//!
//! Every chain encodes "did my transaction settle" differently; the chain
//! clients normalize their responses into [`StatusObservation`] and the
//! tracker folds observations into a [`TransactionStatusRecord`].

use crate::chains::Chain;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical transaction state
///
/// `NotFound` is a transient observation, not a destination: the tracker
/// retries it as pending until a budget is exhausted and never invents a
/// failure from absence alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxState {
	Pending,
	Confirmed,
	Failed,
	NotFound,
}

impl TxState {
	/// Terminal states stop polling; pending and not-found do not
	pub fn is_terminal(&self) -> bool {
		matches!(self, TxState::Confirmed | TxState::Failed)
	}
}

/// One chain client's answer for one poll tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusObservation {
	pub state: TxState,
	pub confirmations: Option<u64>,
	pub failure_reason: Option<String>,
}

impl StatusObservation {
	pub fn pending() -> Self {
		Self {
			state: TxState::Pending,
			confirmations: None,
			failure_reason: None,
		}
	}

	pub fn not_found() -> Self {
		Self {
			state: TxState::NotFound,
			confirmations: None,
			failure_reason: None,
		}
	}

	pub fn confirmed(confirmations: Option<u64>) -> Self {
		Self {
			state: TxState::Confirmed,
			confirmations,
			failure_reason: None,
		}
	}

	pub fn failed(reason: impl Into<String>) -> Self {
		Self {
			state: TxState::Failed,
			confirmations: None,
			failure_reason: Some(reason.into()),
		}
	}
}

/// Tracked status of one broadcast transaction
///
/// Created when a broadcast succeeds, mutated only by the tracker, handed to
/// the caller by value. Once `state` is terminal the record never changes
/// and re-polling returns it without a network call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStatusRecord {
	pub tx_identifier: String,
	pub chain: Chain,
	pub state: TxState,
	pub confirmations: Option<u64>,
	pub failure_reason: Option<String>,
	/// Set when the not-found retry budget ran out: the transaction is
	/// reported pending but the report may be stale (indexer lag)
	pub stale: bool,
	pub last_checked_at: DateTime<Utc>,
}

impl TransactionStatusRecord {
	/// Build a record from one observation
	pub fn from_observation(
		chain: Chain,
		tx_identifier: impl Into<String>,
		observation: StatusObservation,
	) -> Self {
		Self {
			tx_identifier: tx_identifier.into(),
			chain,
			state: observation.state,
			confirmations: observation.confirmations,
			failure_reason: observation.failure_reason,
			stale: false,
			last_checked_at: Utc::now(),
		}
	}

	pub fn is_terminal(&self) -> bool {
		self.state.is_terminal()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_terminal_states() {
		assert!(TxState::Confirmed.is_terminal());
		assert!(TxState::Failed.is_terminal());
		assert!(!TxState::Pending.is_terminal());
		assert!(!TxState::NotFound.is_terminal());
	}

	#[test]
	fn test_record_from_observation() {
		let record = TransactionStatusRecord::from_observation(
			Chain::Ethereum,
			"0xabc",
			StatusObservation::failed("execution reverted"),
		);
		assert_eq!(record.state, TxState::Failed);
		assert_eq!(record.failure_reason.as_deref(), Some("execution reverted"));
		assert!(record.is_terminal());
		assert!(!record.stale);
	}
}
