//! Blockchair client for the UTXO chains
//!
//! One explorer covers the whole family: transaction dossiers for status,
//! per-chain stats for the suggested byte-fee rate.

use crate::{ByteFeeSource, Endpoints, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use std::collections::HashMap;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct BlockchairClient {
	client: reqwest::Client,
	base: String,
}

#[derive(Debug, Deserialize)]
struct DashboardResponse {
	#[serde(default)]
	data: HashMap<String, DashboardEntry>,
	#[serde(default)]
	context: Option<DashboardContext>,
}

#[derive(Debug, Deserialize)]
struct DashboardContext {
	/// Best known block height
	state: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct DashboardEntry {
	transaction: Option<DashboardTransaction>,
}

#[derive(Debug, Deserialize)]
struct DashboardTransaction {
	/// -1 while the transaction sits in the mempool
	block_id: i64,
}

#[derive(Debug, Deserialize)]
struct StatsResponse {
	data: StatsData,
}

#[derive(Debug, Deserialize)]
struct StatsData {
	suggested_transaction_fee_per_byte_sat: u64,
}

impl BlockchairClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			base: endpoints.blockchair_base.clone(),
		}
	}

	/// Fold a transaction dossier into the canonical observation
	fn map_dashboard(tx_identifier: &str, response: DashboardResponse) -> StatusObservation {
		let transaction = response
			.data
			.get(tx_identifier)
			.and_then(|entry| entry.transaction.as_ref());

		match transaction {
			None => StatusObservation::not_found(),
			Some(tx) if tx.block_id <= 0 => StatusObservation::pending(),
			Some(tx) => {
				let confirmations = response
					.context
					.and_then(|ctx| ctx.state)
					.filter(|best| *best >= tx.block_id as u64)
					.map(|best| best - tx.block_id as u64 + 1);
				StatusObservation::confirmed(confirmations)
			},
		}
	}
}

#[async_trait]
impl StatusProvider for BlockchairClient {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let slug = Endpoints::blockchair_slug(chain)
			.ok_or_else(|| Endpoints::family_mismatch(chain, "UTXO"))?;
		let url = format!(
			"{}/{}/dashboards/transaction/{}",
			self.base, slug, tx_identifier
		);
		debug!("Checking {} transaction {}", chain, tx_identifier);

		let response = self.client.get(&url).send().await?;

		// Blockchair answers 404 with an empty data object for unknown hashes
		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(StatusObservation::not_found());
		}

		let body: DashboardResponse = response.error_for_status()?.json().await?;
		Ok(Self::map_dashboard(tx_identifier, body))
	}
}

#[async_trait]
impl ByteFeeSource for BlockchairClient {
	async fn byte_fee_rate(&self, chain: Chain) -> ChainResult<u64> {
		let slug = Endpoints::blockchair_slug(chain)
			.ok_or_else(|| Endpoints::family_mismatch(chain, "UTXO"))?;
		let url = format!("{}/{}/stats", self.base, slug);
		let body: StatsResponse = self
			.client
			.get(&url)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		let rate = body.data.suggested_transaction_fee_per_byte_sat;
		if rate == 0 {
			return Err(ChainError::Protocol {
				detail: format!("{} stats reported a zero byte-fee rate", chain),
			});
		}

		Ok(rate)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::TxState;

	const TXID: &str = "4410c8d14ff9f87ceeed1d65cb58e7c7b2422b2d7529afc675208ce2ce09ed7d";

	#[test]
	fn test_confirmed_transaction_maps_with_confirmations() {
		let raw = format!(
			r#"{{"data":{{"{}":{{"transaction":{{"block_id":840000}}}}}},"context":{{"state":840005}}}}"#,
			TXID
		);
		let response: DashboardResponse = serde_json::from_str(&raw).unwrap();

		let observation = BlockchairClient::map_dashboard(TXID, response);
		assert_eq!(observation.state, TxState::Confirmed);
		assert_eq!(observation.confirmations, Some(6));
	}

	#[test]
	fn test_mempool_transaction_is_pending() {
		let raw = format!(
			r#"{{"data":{{"{}":{{"transaction":{{"block_id":-1}}}}}},"context":{{"state":840005}}}}"#,
			TXID
		);
		let response: DashboardResponse = serde_json::from_str(&raw).unwrap();

		let observation = BlockchairClient::map_dashboard(TXID, response);
		assert_eq!(observation.state, TxState::Pending);
	}

	#[test]
	fn test_absent_record_is_not_found() {
		let response: DashboardResponse = serde_json::from_str(r#"{"data":{}}"#).unwrap();

		let observation = BlockchairClient::map_dashboard(TXID, response);
		assert_eq!(observation.state, TxState::NotFound);
	}
}
