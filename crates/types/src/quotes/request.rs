//! Quote request shape

use crate::assets::AssetRef;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user intent to swap, fanned out to every eligible provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRequest {
	/// Correlation id for logs; generated when the request is built
	pub request_id: String,

	pub source_asset: AssetRef,
	pub destination_asset: AssetRef,

	/// Input amount in the source asset's smallest unit
	pub amount: u128,

	/// Sender on the source chain
	pub from_address: String,

	/// Recipient on the destination chain
	pub to_address: String,
}

impl QuoteRequest {
	pub fn new(
		source_asset: AssetRef,
		destination_asset: AssetRef,
		amount: u128,
		from_address: impl Into<String>,
		to_address: impl Into<String>,
	) -> Self {
		Self {
			request_id: Uuid::new_v4().to_string(),
			source_asset,
			destination_asset,
			amount,
			from_address: from_address.into(),
			to_address: to_address.into(),
		}
	}
}
