//! Sui fullnode client
//!
//! Transaction effects carry an explicit status object; the reference gas
//! price times a conservative budget doubles as the flat fee quote.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Gas units a typical transfer consumes, used to turn the reference gas
/// price into a flat fee figure
const REFERENCE_GAS_BUDGET_UNITS: u128 = 4_000;

#[derive(Debug, Clone)]
pub struct SuiRpcClient {
	client: reqwest::Client,
	rpc: String,
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
	code: i64,
	message: String,
}

#[derive(Debug, Deserialize)]
struct TransactionBlock {
	effects: Option<Effects>,
}

#[derive(Debug, Deserialize)]
struct Effects {
	status: EffectsStatus,
}

#[derive(Debug, Deserialize)]
struct EffectsStatus {
	status: String,
	error: Option<String>,
}

impl SuiRpcClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			rpc: endpoints.sui_rpc.clone(),
		}
	}

	async fn call(&self, method: &str, params: Value) -> ChainResult<RpcResponse> {
		let request = RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method,
			params,
		};

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

	fn map_block(block: TransactionBlock) -> StatusObservation {
		let Some(effects) = block.effects else {
			// Digest known but effects not yet available
			return StatusObservation::pending();
		};

		match effects.status.status.as_str() {
			"success" => StatusObservation::confirmed(None),
			_ => StatusObservation::failed(
				effects
					.status
					.error
					.unwrap_or_else(|| format!("effects status {}", effects.status.status)),
			),
		}
	}
}

#[async_trait]
impl StatusProvider for SuiRpcClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		debug!("Checking Sui transaction block {}", tx_identifier);

		let response = self
			.call(
				"sui_getTransactionBlock",
				serde_json::json!([tx_identifier, {"showEffects": true}]),
			)
			.await?;

		if let Some(error) = response.error {
			// The node answers with an invalid-params error for digests it
			// has never executed
			if error.message.contains("Could not find") || error.code == -32602 {
				return Ok(StatusObservation::not_found());
			}
			return Err(ChainError::Protocol {
				detail: format!("sui rpc error: {}", error.message),
			});
		}

		let result = response.result.ok_or_else(|| ChainError::Protocol {
			detail: "sui rpc answered without result or error".to_string(),
		})?;
		let block: TransactionBlock = serde_json::from_value(result)?;

		Ok(Self::map_block(block))
	}
}

#[async_trait]
impl FlatFeeSource for SuiRpcClient {
	async fn flat_fee(&self, _chain: Chain) -> ChainResult<u128> {
		let response = self
			.call("suix_getReferenceGasPrice", serde_json::json!([]))
			.await?;

		let price = match response.result {
			Some(Value::String(s)) => s.parse::<u128>().ok(),
			Some(Value::Number(n)) => n.as_u64().map(u128::from),
			_ => None,
		};

		let price = price.ok_or_else(|| ChainError::Protocol {
			detail: "sui reference gas price missing or malformed".to_string(),
		})?;

		Ok(price * REFERENCE_GAS_BUDGET_UNITS)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::TxState;

	#[test]
	fn test_success_effects_are_confirmed() {
		let raw = r#"{"effects":{"status":{"status":"success"}}}"#;
		let block: TransactionBlock = serde_json::from_str(raw).unwrap();

		assert_eq!(SuiRpcClient::map_block(block).state, TxState::Confirmed);
	}

	#[test]
	fn test_failure_effects_carry_error() {
		let raw = r#"{"effects":{"status":{"status":"failure","error":"InsufficientGas"}}}"#;
		let block: TransactionBlock = serde_json::from_str(raw).unwrap();

		let observation = SuiRpcClient::map_block(block);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(observation.failure_reason.as_deref(), Some("InsufficientGas"));
	}

	#[test]
	fn test_missing_effects_are_pending() {
		let block: TransactionBlock = serde_json::from_str("{}").unwrap();

		assert_eq!(SuiRpcClient::map_block(block).state, TxState::Pending);
	}
}
