//! XRP Ledger client
//!
//! The `tx` method answers with the transaction's metadata once validated;
//! `tesSUCCESS` is the only success code, every other `TransactionResult`
//! is a terminal failure.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct RippleRpcClient {
	client: reqwest::Client,
	rpc: String,
}

#[derive(Debug, Deserialize)]
struct TxResponse {
	result: TxResult,
}

#[derive(Debug, Deserialize)]
struct TxResult {
	error: Option<String>,
	#[serde(default)]
	validated: bool,
	meta: Option<TxMeta>,
}

#[derive(Debug, Deserialize)]
struct TxMeta {
	#[serde(rename = "TransactionResult")]
	transaction_result: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FeeResponse {
	result: FeeResult,
}

#[derive(Debug, Deserialize)]
struct FeeResult {
	drops: Option<FeeDrops>,
}

#[derive(Debug, Deserialize)]
struct FeeDrops {
	open_ledger_fee: Option<String>,
}

impl RippleRpcClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			rpc: endpoints.ripple_rpc.clone(),
		}
	}

	async fn call<T: serde::de::DeserializeOwned>(
		&self,
		method: &str,
		params: serde_json::Value,
	) -> ChainResult<T> {
		let request = serde_json::json!({ "method": method, "params": [params] });

		Ok(self
			.client
			.post(&self.rpc)
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?)
	}

	fn map_tx(result: TxResult) -> StatusObservation {
		if result.error.as_deref() == Some("txnNotFound") {
			return StatusObservation::not_found();
		}

		if !result.validated {
			return StatusObservation::pending();
		}

		match result.meta.and_then(|m| m.transaction_result) {
			Some(code) if code == "tesSUCCESS" => StatusObservation::confirmed(None),
			Some(code) => StatusObservation::failed(code),
			// Validated but no metadata is a node inconsistency
			None => StatusObservation::pending(),
		}
	}
}

#[async_trait]
impl StatusProvider for RippleRpcClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		debug!("Checking XRP Ledger transaction {}", tx_identifier);

		let response: TxResponse = self
			.call(
				"tx",
				serde_json::json!({ "transaction": tx_identifier, "binary": false }),
			)
			.await?;

		Ok(Self::map_tx(response.result))
	}
}

#[async_trait]
impl FlatFeeSource for RippleRpcClient {
	async fn flat_fee(&self, _chain: Chain) -> ChainResult<u128> {
		let response: FeeResponse = self.call("fee", serde_json::json!({})).await?;

		let drops = response
			.result
			.drops
			.and_then(|d| d.open_ledger_fee)
			.and_then(|fee| fee.parse::<u128>().ok())
			.ok_or_else(|| ChainError::Protocol {
				detail: "ripple fee response missing open_ledger_fee".to_string(),
			})?;

		Ok(drops)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::TxState;

	#[test]
	fn test_validated_success_is_confirmed() {
		let raw = r#"{"validated":true,"meta":{"TransactionResult":"tesSUCCESS"}}"#;
		let result: TxResult = serde_json::from_str(raw).unwrap();

		assert_eq!(RippleRpcClient::map_tx(result).state, TxState::Confirmed);
	}

	#[test]
	fn test_validated_failure_code_is_failed() {
		let raw = r#"{"validated":true,"meta":{"TransactionResult":"tecUNFUNDED_PAYMENT"}}"#;
		let result: TxResult = serde_json::from_str(raw).unwrap();

		let observation = RippleRpcClient::map_tx(result);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(
			observation.failure_reason.as_deref(),
			Some("tecUNFUNDED_PAYMENT")
		);
	}

	#[test]
	fn test_unvalidated_is_pending() {
		let raw = r#"{"validated":false}"#;
		let result: TxResult = serde_json::from_str(raw).unwrap();

		assert_eq!(RippleRpcClient::map_tx(result).state, TxState::Pending);
	}

	#[test]
	fn test_txn_not_found_maps_to_not_found() {
		let raw = r#"{"error":"txnNotFound","validated":false}"#;
		let result: TxResult = serde_json::from_str(raw).unwrap();

		assert_eq!(RippleRpcClient::map_tx(result).state, TxState::NotFound);
	}
}
