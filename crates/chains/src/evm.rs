//! JSON-RPC client for the EVM chains
//!
//! Receipts drive status: a mined receipt carries an explicit success bit,
//! no receipt plus a known transaction means pending, and neither means the
//! node has never seen the hash.

use crate::{Endpoints, GasPriceSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct EvmRpcClient {
	client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
	jsonrpc: &'static str,
	id: u32,
	method: &'a str,
	params: Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
	result: Option<Value>,
	error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
	message: String,
}

#[derive(Debug, Deserialize)]
struct Receipt {
	/// "0x1" on success, "0x0" on revert
	status: Option<String>,
	#[serde(rename = "revertReason")]
	revert_reason: Option<String>,
}

/// Parse a 0x-prefixed hex quantity
pub(crate) fn parse_hex_u128(value: &str) -> ChainResult<u128> {
	let digits = value.trim_start_matches("0x");
	u128::from_str_radix(digits, 16).map_err(|_| ChainError::Protocol {
		detail: format!("malformed hex quantity: {}", value),
	})
}

impl EvmRpcClient {
	pub fn new(client: reqwest::Client) -> Self {
		Self { client }
	}

	async fn call(&self, chain: Chain, method: &str, params: Value) -> ChainResult<Option<Value>> {
		let rpc = Endpoints::evm_rpc(chain)
			.ok_or_else(|| Endpoints::family_mismatch(chain, "EVM"))?;
		let request = RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		};

		let response: RpcResponse = self
			.client
			.post(rpc)
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if let Some(error) = response.error {
			return Err(ChainError::Protocol {
				detail: format!("{} rpc error: {}", chain, error.message),
			});
		}

		Ok(response.result)
	}

	/// Map a receipt lookup result; `tx_known` answers "has the node seen
	/// the hash at all" when no receipt exists yet
	fn map_receipt(receipt: Option<Receipt>, tx_known: bool) -> StatusObservation {
		match receipt {
			Some(receipt) => match receipt.status.as_deref() {
				Some("0x0") => {
					let reason = receipt
						.revert_reason
						.unwrap_or_else(|| "execution reverted".to_string());
					StatusObservation::failed(reason)
				},
				// A mined receipt without a status bit is pre-Byzantium
				// territory; the supported chains always set it
				_ => StatusObservation::confirmed(None),
			},
			None if tx_known => StatusObservation::pending(),
			None => StatusObservation::not_found(),
		}
	}
}

#[async_trait]
impl StatusProvider for EvmRpcClient {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		debug!("Checking {} receipt for {}", chain, tx_identifier);

		let receipt = self
			.call(
				chain,
				"eth_getTransactionReceipt",
				serde_json::json!([tx_identifier]),
			)
			.await?;

		let receipt: Option<Receipt> = match receipt {
			Some(Value::Null) | None => None,
			Some(value) => Some(serde_json::from_value(value)?),
		};

		if receipt.is_some() {
			return Ok(Self::map_receipt(receipt, true));
		}

		// No receipt yet: distinguish "in the mempool" from "never seen"
		let tx = self
			.call(
				chain,
				"eth_getTransactionByHash",
				serde_json::json!([tx_identifier]),
			)
			.await?;
		let tx_known = !matches!(tx, Some(Value::Null) | None);

		Ok(Self::map_receipt(None, tx_known))
	}
}

#[async_trait]
impl GasPriceSource for EvmRpcClient {
	async fn gas_price(&self, chain: Chain) -> ChainResult<u128> {
		let result = self
			.call(chain, "eth_gasPrice", serde_json::json!([]))
			.await?;

		match result {
			Some(Value::String(hex)) => parse_hex_u128(&hex),
			other => Err(ChainError::Protocol {
				detail: format!("{} eth_gasPrice returned {:?}", chain, other),
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::TxState;

	#[test]
	fn test_failed_receipt_maps_to_failed_with_reason() {
		let receipt: Receipt =
			serde_json::from_str(r#"{"status":"0x0","revertReason":"transfer amount exceeds balance"}"#)
				.unwrap();

		let observation = EvmRpcClient::map_receipt(Some(receipt), true);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(
			observation.failure_reason.as_deref(),
			Some("transfer amount exceeds balance")
		);
	}

	#[test]
	fn test_failed_receipt_without_reason_gets_default() {
		let receipt: Receipt = serde_json::from_str(r#"{"status":"0x0"}"#).unwrap();

		let observation = EvmRpcClient::map_receipt(Some(receipt), true);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(
			observation.failure_reason.as_deref(),
			Some("execution reverted")
		);
	}

	#[test]
	fn test_successful_receipt_maps_to_confirmed() {
		let receipt: Receipt = serde_json::from_str(r#"{"status":"0x1"}"#).unwrap();

		let observation = EvmRpcClient::map_receipt(Some(receipt), true);
		assert_eq!(observation.state, TxState::Confirmed);
	}

	#[test]
	fn test_no_receipt_for_known_transaction_is_pending() {
		let observation = EvmRpcClient::map_receipt(None, true);
		assert_eq!(observation.state, TxState::Pending);
	}

	#[test]
	fn test_no_receipt_for_unknown_transaction_is_not_found() {
		let observation = EvmRpcClient::map_receipt(None, false);
		assert_eq!(observation.state, TxState::NotFound);
	}

	#[test]
	fn test_parse_hex_quantities() {
		assert_eq!(parse_hex_u128("0x3b9aca00").unwrap(), 1_000_000_000);
		assert_eq!(parse_hex_u128("0x0").unwrap(), 0);
		assert!(parse_hex_u128("0xzz").is_err());
	}
}
