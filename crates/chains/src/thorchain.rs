//! Midgard actions client for THORChain and Maya
//!
//! Midgard indexes a swap as an action with inbound and outbound legs.
//! Canonical mapping: `success` confirms, `pending` stays pending, `refund`
//! failed and the refund metadata carries the reason. An empty action list
//! means the indexer has not caught up yet, which is pending, not absence.

use crate::{Endpoints, StatusProvider};
use async_trait::async_trait;
use chainflow_types::{Chain, ChainResult, StatusObservation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct MidgardClient {
	client: reqwest::Client,
	thorchain_base: String,
	maya_base: String,
}

#[derive(Debug, Deserialize)]
struct ActionsResponse {
	#[serde(default)]
	actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
struct Action {
	status: String,
	#[serde(default)]
	metadata: Option<ActionMetadata>,
}

#[derive(Debug, Deserialize)]
struct ActionMetadata {
	refund: Option<RefundMetadata>,
	failed: Option<RefundMetadata>,
}

#[derive(Debug, Deserialize)]
struct RefundMetadata {
	reason: Option<String>,
	code: Option<i64>,
}

impl MidgardClient {
	pub fn new(client: reqwest::Client, endpoints: &Endpoints) -> Self {
		Self {
			client,
			thorchain_base: endpoints.midgard_thorchain.clone(),
			maya_base: endpoints.midgard_maya.clone(),
		}
	}

	fn base_for(&self, chain: Chain) -> &str {
		match chain {
			Chain::MayaChain => &self.maya_base,
			_ => &self.thorchain_base,
		}
	}

	fn refund_reason(metadata: Option<ActionMetadata>) -> String {
		let refund = metadata.and_then(|m| m.refund.or(m.failed));
		match refund {
			Some(RefundMetadata {
				reason: Some(reason),
				code,
			}) => match code {
				Some(code) => format!("{} (code {})", reason, code),
				None => reason,
			},
			_ => "swap refunded".to_string(),
		}
	}

	fn map_actions(response: ActionsResponse) -> StatusObservation {
		let Some(action) = response.actions.into_iter().next() else {
			// Not yet indexed; Midgard lags the chain by design
			return StatusObservation::pending();
		};

		match action.status.to_lowercase().as_str() {
			"success" => StatusObservation::confirmed(None),
			"pending" => StatusObservation::pending(),
			"refund" => StatusObservation::failed(Self::refund_reason(action.metadata)),
			// Unknown status strings favor availability over precision
			_ => StatusObservation::pending(),
		}
	}
}

#[async_trait]
impl StatusProvider for MidgardClient {
	async fn check_status(
		&self,
		chain: Chain,
		tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let url = format!(
			"{}/v2/actions?txid={}",
			self.base_for(chain),
			tx_identifier.trim_start_matches("0x")
		);
		debug!("Checking {} action for {}", chain, tx_identifier);

		let body: ActionsResponse = self
			.client
			.get(&url)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(Self::map_actions(body))
	}
}
