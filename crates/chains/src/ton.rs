//! TON indexer client
//!
//! Transactions are located by the inbound message hash. An aborted
//! execution phase is the only failure signal the indexer exposes.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TonCenterClient {
	client: reqwest::Client,
	base: String,
}

#[derive(Debug, Deserialize)]
struct TransactionsResponse {
	#[serde(default)]
	transactions: Vec<TonTransaction>,
}

#[derive(Debug, Deserialize)]
struct TonTransaction {
	description: Option<TransactionDescription>,
}

#[derive(Debug, Deserialize)]
struct TransactionDescription {
	#[serde(default)]
	aborted: bool,
}

impl TonCenterClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			base: endpoints.toncenter_base.clone(),
		}
	}

	fn map_transactions(response: TransactionsResponse) -> StatusObservation {
		let Some(tx) = response.transactions.into_iter().next() else {
			return StatusObservation::not_found();
		};

		match tx.description {
			Some(description) if description.aborted => {
				StatusObservation::failed("transaction aborted")
			},
			_ => StatusObservation::confirmed(None),
		}
	}
}

#[async_trait]
impl StatusProvider for TonCenterClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let url = format!("{}/transactionsByMessage", self.base);
		debug!("Checking TON message {}", tx_identifier);

		let body: TransactionsResponse = self
			.client
			.get(&url)
			.query(&[("msg_hash", tx_identifier), ("direction", "in")])
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(Self::map_transactions(body))
	}
}

#[async_trait]
impl FlatFeeSource for TonCenterClient {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		// Forward fees vary per message; the conservative constant covers
		// a standard transfer with headroom
		chain.fallback_flat_fee().ok_or(ChainError::Protocol {
			detail: format!("{} has no flat fee", chain),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::TxState;

	#[test]
	fn test_executed_transaction_is_confirmed() {
		let raw = r#"{"transactions":[{"description":{"aborted":false}}]}"#;
		let response: TransactionsResponse = serde_json::from_str(raw).unwrap();

		assert_eq!(
			TonCenterClient::map_transactions(response).state,
			TxState::Confirmed
		);
	}

	#[test]
	fn test_aborted_transaction_is_failed() {
		let raw = r#"{"transactions":[{"description":{"aborted":true}}]}"#;
		let response: TransactionsResponse = serde_json::from_str(raw).unwrap();

		assert_eq!(
			TonCenterClient::map_transactions(response).state,
			TxState::Failed
		);
	}

	#[test]
	fn test_empty_list_is_not_found() {
		let response: TransactionsResponse = serde_json::from_str(r#"{"transactions":[]}"#).unwrap();

		assert_eq!(
			TonCenterClient::map_transactions(response).state,
			TxState::NotFound
		);
	}
}
