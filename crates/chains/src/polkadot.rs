//! Polkadot extrinsic lookup via Subscan

use crate::{Endpoints, FlatFeeSource, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainError, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct SubscanClient {
	client: reqwest::Client,
	base: String,
}

#[derive(Debug, Deserialize)]
struct ExtrinsicResponse {
	data: Option<ExtrinsicData>,
}

#[derive(Debug, Deserialize)]
struct ExtrinsicData {
	#[serde(default)]
	success: bool,
	#[serde(default)]
	finalized: bool,
	error: Option<ExtrinsicError>,
}

#[derive(Debug, Deserialize)]
struct ExtrinsicError {
	name: Option<String>,
}

impl SubscanClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			base: endpoints.subscan_base.clone(),
		}
	}

	fn map_extrinsic(response: ExtrinsicResponse) -> StatusObservation {
		let Some(data) = response.data else {
			return StatusObservation::not_found();
		};

		if !data.finalized {
			return StatusObservation::pending();
		}

		if data.success {
			StatusObservation::confirmed(None)
		} else {
			let reason = data
				.error
				.and_then(|e| e.name)
				.unwrap_or_else(|| "extrinsic failed".to_string());
			StatusObservation::failed(reason)
		}
	}
}

#[async_trait]
impl StatusProvider for SubscanClient {
	async fn check_status(
		&self,
		_chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let url = format!("{}/api/scan/extrinsic", self.base);
		debug!("Checking Polkadot extrinsic {}", tx_identifier);

		let body: ExtrinsicResponse = self
			.client
			.post(&url)
			.json(&serde_json::json!({ "hash": tx_identifier }))
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(Self::map_extrinsic(body))
	}
}

#[async_trait]
impl FlatFeeSource for SubscanClient {
	async fn flat_fee(&self, chain: Chain) -> ChainResult<u128> {
		// Weight-based fees need a dry run the engine does not perform;
		// the constant covers a balance transfer with headroom
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
	fn test_finalized_success_is_confirmed() {
		let raw = r#"{"data":{"success":true,"finalized":true}}"#;
		let response: ExtrinsicResponse = serde_json::from_str(raw).unwrap();

		assert_eq!(
			SubscanClient::map_extrinsic(response).state,
			TxState::Confirmed
		);
	}

	#[test]
	fn test_finalized_failure_is_failed() {
		let raw = r#"{"data":{"success":false,"finalized":true,"error":{"name":"InsufficientBalance"}}}"#;
		let response: ExtrinsicResponse = serde_json::from_str(raw).unwrap();

		let observation = SubscanClient::map_extrinsic(response);
		assert_eq!(observation.state, TxState::Failed);
		assert_eq!(
			observation.failure_reason.as_deref(),
			Some("InsufficientBalance")
		);
	}

	#[test]
	fn test_unfinalized_is_pending() {
		let raw = r#"{"data":{"success":false,"finalized":false}}"#;
		let response: ExtrinsicResponse = serde_json::from_str(raw).unwrap();

		assert_eq!(SubscanClient::map_extrinsic(response).state, TxState::Pending);
	}

	#[test]
	fn test_null_data_is_not_found() {
		let response: ExtrinsicResponse = serde_json::from_str(r#"{"data":null}"#).unwrap();

		assert_eq!(
			SubscanClient::map_extrinsic(response).state,
			TxState::NotFound
		);
	}
}
