//! Transaction status tracking
//!
//! One poll tick per call; the caller owns the loop and the cutoff. The
//! tracker guarantees three things on top of the raw chain clients: polls
//! for the same identifier are strictly sequential, terminal answers are
//! memoized so re-polling settled transactions never touches the network,
//! and a not-found answer is retried as pending within a budget instead of
//! being invented as failure.

use chainflow_chains::StatusProvider;
use chainflow_types::{
	Chain, ChainError, StatusObservation, TransactionStatusRecord, TxState,
};
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Not-found answers tolerated before the record is flagged stale
const DEFAULT_NOT_FOUND_BUDGET: u32 = 5;

pub struct StatusTracker {
	provider: Arc<dyn StatusProvider>,
	poll_locks: DashMap<String, Arc<Mutex<()>>>,
	terminal: DashMap<String, TransactionStatusRecord>,
	not_found_counts: DashMap<String, u32>,
	not_found_budget: u32,
}

impl StatusTracker {
	pub fn new(provider: Arc<dyn StatusProvider>) -> Self {
		Self::with_budget(provider, DEFAULT_NOT_FOUND_BUDGET)
	}

	pub fn with_budget(provider: Arc<dyn StatusProvider>, not_found_budget: u32) -> Self {
		Self {
			provider,
			poll_locks: DashMap::new(),
			terminal: DashMap::new(),
			not_found_counts: DashMap::new(),
			not_found_budget,
		}
	}

	fn record_key(chain: Chain, tx_identifier: &str) -> String {
		format!("{:?}:{}", chain, tx_identifier)
	}

	/// One poll tick for one transaction
	pub async fn poll(&self, chain: Chain, tx_identifier: &str) -> TransactionStatusRecord {
		let key = Self::record_key(chain, tx_identifier);

		// Terminal records never change; answer without a network call
		if let Some(record) = self.terminal.get(&key) {
			return record.clone();
		}

		let lock = self
			.poll_locks
			.entry(key.clone())
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.clone();
		let _guard = lock.lock().await;

		// A concurrent poll may have settled the transaction while this one
		// waited on the lock
		if let Some(record) = self.terminal.get(&key) {
			return record.clone();
		}

		let observation = match self.provider.check_status(chain, tx_identifier).await {
			Ok(observation) => observation,
			Err(ChainError::Protocol { detail }) => {
				// Contradictory endpoint answers favor availability over
				// precision
				warn!("{} status for {} inconsistent: {}", chain, tx_identifier, detail);
				StatusObservation::pending()
			},
			Err(err) => {
				warn!("{} status poll for {} failed: {}", chain, tx_identifier, err);
				StatusObservation::pending()
			},
		};

		let record = self.fold_observation(chain, tx_identifier, &key, observation);

		if record.is_terminal() {
			debug!(
				"{} transaction {} settled as {:?}",
				chain, tx_identifier, record.state
			);
			self.terminal.insert(key.clone(), record.clone());
			self.poll_locks.remove(&key);
			self.not_found_counts.remove(&key);
		}

		record
	}

	/// Fold one observation into the caller-facing record, applying the
	/// not-found budget
	fn fold_observation(
		&self,
		chain: Chain,
		tx_identifier: &str,
		key: &str,
		observation: StatusObservation,
	) -> TransactionStatusRecord {
		match observation.state {
			TxState::NotFound => {
				let mut seen = self.not_found_counts.entry(key.to_string()).or_insert(0);
				*seen += 1;

				// Absence of a record is not proof of failure; report
				// pending, flagged stale once the budget runs out
				let mut record = TransactionStatusRecord::from_observation(
					chain,
					tx_identifier,
					StatusObservation::pending(),
				);
				record.stale = *seen >= self.not_found_budget;
				record
			},
			_ => {
				self.not_found_counts.remove(key);
				TransactionStatusRecord::from_observation(chain, tx_identifier, observation)
			},
		}
	}
}
