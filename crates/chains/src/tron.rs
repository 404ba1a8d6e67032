//! Tron node client
//!
//! `gettransactioninfobyid` answers with an empty object until the
//! transaction reaches a block, which makes "unknown" and "unconfirmed"
//! indistinguishable; both map to pending rather than inventing a failure.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct TronGridClient {
	client: reqwest::Client,
	base: String,
}

#[derive(Debug, Default, Deserialize)]
struct TransactionInfo {
	#[serde(rename = "blockNumber")]
	block_number: Option<u64>,
	receipt: Option<TronReceipt>,
	result: Option<String>,
	#[serde(rename = "resMessage")]
	res_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TronReceipt {
	result: Option<String>,
}

impl TronGridClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			base: endpoints.trongrid_base.clone(),
		}
	}

	fn map_info(info: TransactionInfo) -> StatusObservation {
		let receipt_result = info.receipt.as_ref().and_then(|r| r.result.as_deref());

		let failed = info.result.as_deref() == Some("FAILED")
			|| matches!(
				receipt_result,
				Some("FAILED") | Some("OUT_OF_ENERGY") | Some("OUT_OF_TIME") | Some("REVERT")
			);

		if failed {
			let reason = info
				.res_message
				.or_else(|| receipt_result.map(str::to_string))
				.unwrap_or_else(|| "execution failed".to_string());
			return StatusObservation::failed(reason);
		}

		// TRX transfers carry no receipt result; landing in a block is
		// success for them. Contract calls confirm through receipt SUCCESS.
		match (info.block_number, receipt_result) {
			(Some(_), Some("SUCCESS")) | (Some(_), None) => StatusObservation::confirmed(None),
			_ => StatusObservation::pending(),
		}
	}
}

#[async_trait]
impl StatusProvider for TronGridClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let url = format!("{}/walletsolidity/gettransactioninfobyid", self.base);
		debug!("Checking Tron transaction {}", tx_identifier);

		let info: TransactionInfo = self
			.client
			.post(&url)
			.json(&serde_json::json!({ "value": tx_identifier }))
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(Self::map_info(info))
	}
}

#[async_trait]
impl FlatFeeSource for TronGridClient {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		// Bandwidth/energy pricing needs account state the engine does not
		// hold; the constant budgets a standard transfer burning bandwidth
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
	fn test_failed_receipt_is_failed() {
		let raw = r#"{"receipt":{"result":"FAILED"}}"#;
		let info: TransactionInfo = serde_json::from_str(raw).unwrap();

		assert_eq!(TronGridClient::map_info(info).state, TxState::Failed);
	}

	#[test]
	fn test_missing_receipt_is_pending() {
		let info: TransactionInfo = serde_json::from_str("{}").unwrap();

		assert_eq!(TronGridClient::map_info(info).state, TxState::Pending);
	}

	#[test]
	fn test_out_of_energy_carries_message() {
		let raw = r#"{"blockNumber":66000000,"receipt":{"result":"OUT_OF_ENERGY"},"resMessage":"Not enough energy"}"#;
		let info: TransactionInfo = serde_json::from_str(raw).unwrap();

		let observation = TronGridClient::map_info(info);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(observation.failure_reason.as_deref(), Some("Not enough energy"));
	}

	#[test]
	fn test_plain_transfer_in_block_is_confirmed() {
		let raw = r#"{"blockNumber":66000000}"#;
		let info: TransactionInfo = serde_json::from_str(raw).unwrap();

		assert_eq!(TronGridClient::map_info(info).state, TxState::Confirmed);
	}

	#[test]
	fn test_contract_call_success_is_confirmed() {
		let raw = r#"{"blockNumber":66000000,"receipt":{"result":"SUCCESS"}}"#;
		let info: TransactionInfo = serde_json::from_str(raw).unwrap();

		assert_eq!(TronGridClient::map_info(info).state, TxState::Confirmed);
	}
}
