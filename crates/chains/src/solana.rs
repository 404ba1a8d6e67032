//! Solana RPC client
//!
//! `getSignatureStatuses` answers with an array keyed by requested
//! signature: a null slot means the cluster has not indexed it yet, an
//! `err` object is an execution failure, anything confirmed or better is
//! settled.

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SolanaRpcClient {
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
struct SignatureStatusesResponse {
	result: Option<SignatureStatusesResult>,
	error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
	message: String,
}

#[derive(Debug, Deserialize)]
struct SignatureStatusesResult {
	value: Vec<Option<SignatureStatus>>,
}

#[derive(Debug, Deserialize)]
struct SignatureStatus {
	confirmations: Option<u64>,
	err: Option<Value>,
	#[serde(rename = "confirmationStatus")]
	confirmation_status: Option<String>,
}

impl SolanaRpcClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			rpc: endpoints.solana_rpc.clone(),
		}
	}

	fn map_statuses(result: SignatureStatusesResult) -> StatusObservation {
		let entry = result.value.into_iter().next().flatten();

		let Some(status) = entry else {
			// Absent entry: not yet indexed, not proof of failure
			return StatusObservation::pending();
		};

		if let Some(err) = status.err {
			return StatusObservation::failed(err.to_string());
		}

		match status.confirmation_status.as_deref() {
			Some("confirmed") | Some("finalized") => {
				StatusObservation::confirmed(status.confirmations)
			},
			_ => StatusObservation::pending(),
		}
	}
}

#[async_trait]
impl StatusProvider for SolanaRpcClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		debug!("Checking Solana signature {}", tx_identifier);

		let request = RpcRequest {
			jsonrpc: "2.0",
			id: 1,
			method: "getSignatureStatuses",
			params: serde_json::json!([[tx_identifier], {"searchTransactionHistory": true}]),
		};

		let response: SignatureStatusesResponse = self
			.client
			.post(&self.rpc)
			.json(&request)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		if let Some(error) = response.error {
			return Err(ChainError::Protocol {
				detail: format!("solana rpc error: {}", error.message),
			});
		}

		let result = response.result.ok_or_else(|| ChainError::Protocol {
			detail: "solana rpc answered without result or error".to_string(),
		})?;

		Ok(Self::map_statuses(result))
	}
}

#[async_trait]
impl FlatFeeSource for SolanaRpcClient {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		// Base fee is fixed per signature; the fallback constant already
		// budgets for a priority fee on top, so no live call is made
		chain.fallback_flat_fee().ok_or(ChainError::Protocol {
			detail: format!("{} has no flat fee", chain),
		})
	}
}
