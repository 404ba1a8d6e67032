//! Cardano transaction status via Koios
//!
//! Cardano validates transactions before admission, so a transaction that
//! reaches the chain cannot fail afterwards: presence with confirmations is
//! success, absence is not-found.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct KoiosClient {
	client: reqwest::Client,
	base: String,
}

#[derive(Debug, Deserialize)]
struct TxStatusEntry {
	num_confirmations: Option<u64>,
}

impl KoiosClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			base: endpoints.koios_base.clone(),
		}
	}

	fn map_entries(entries: Vec<TxStatusEntry>) -> StatusObservation {
		let Some(entry) = entries.into_iter().next() else {
			return StatusObservation::not_found();
		};

		match entry.num_confirmations {
			Some(confirmations) if confirmations > 0 => {
				StatusObservation::confirmed(Some(confirmations))
			},
			// Known to the node but not yet in a block
			_ => StatusObservation::pending(),
		}
	}
}

#[async_trait]
impl StatusProvider for KoiosClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let url = format!("{}/tx_status", self.base);
		debug!("Checking Cardano transaction {}", tx_identifier);

		let entries: Vec<TxStatusEntry> = self
			.client
			.post(&url)
			.json(&serde_json::json!({ "_tx_hashes": [tx_identifier] }))
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(Self::map_entries(entries))
	}
}

#[async_trait]
impl FlatFeeSource for KoiosClient {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		// min-fee coefficients barely move; the constant covers a typical
		// payment transaction
		chain.fallback_flat_fee().ok_or(ChainError::Protocol {
			detail: format!("{} has no flat fee", chain),
		})
	}
}
