//! LCD client for the Cosmos-SDK chains
//!
//! One REST lookup per poll: a 404 means the node has not indexed the hash,
//! `code == 0` means executed, anything else carries the failure log.

use crate::{Endpoints, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CosmosLcdClient {
	client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TxLookupResponse {
	tx_response: Option<TxResponse>,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
	#[serde(default)]
	code: u32,
	#[serde(default)]
	raw_log: String,
}

impl CosmosLcdClient {
	pub fn new(client: reqwest::Client) -> Self {
		Self { client }
	}

	fn map_lookup(response: TxLookupResponse) -> StatusObservation {
		match response.tx_response {
			None => StatusObservation::not_found(),
			Some(tx) if tx.code == 0 => {
				// Height 0 with code 0 would mean "accepted but not in a
				// block", which LCD nodes do not serve; treat any indexed
				// success as confirmed
				StatusObservation::confirmed(None)
			},
			Some(tx) => {
				let reason = if tx.raw_log.is_empty() {
					format!("transaction failed with code {}", tx.code)
				} else {
					tx.raw_log
				};
				StatusObservation::failed(reason)
			},
		}
	}
}

#[async_trait]
impl StatusProvider for CosmosLcdClient {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let lcd = Endpoints::cosmos_lcd(chain)
			.ok_or_else(|| Endpoints::family_mismatch(chain, "Cosmos-SDK"))?;
		let url = format!("{}/cosmos/tx/v1beta1/txs/{}", lcd, tx_identifier);
		debug!("Checking {} transaction {}", chain, tx_identifier);

		let response = self.client.get(&url).send().await?;

		if response.status() == reqwest::StatusCode::NOT_FOUND {
			return Ok(StatusObservation::not_found());
		}

		let body: TxLookupResponse = response.error_for_status()?.json().await?;
		Ok(Self::map_lookup(body))
	}
}
