//! Core Quote domain model

use crate::assets::AssetRef;
use crate::providers::SwapProvider;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod request;

pub use request::QuoteRequest;

/// A normalized, provider-agnostic description of one possible swap
///
/// Amounts are integers in each asset's smallest unit. Quotes are
/// short-lived: owned by the request that produced them, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
	/// Provider that produced this quote
	pub provider: SwapProvider,

	pub source_asset: AssetRef,
	pub destination_asset: AssetRef,

	/// Input amount in the source asset's smallest unit
	pub input_amount: u128,

	/// Expected output in the destination asset's smallest unit
	pub expected_output_amount: u128,

	/// Estimated network fee in the source chain's native fee unit
	pub estimated_network_fee: u128,

	/// Provider-reported fee already denominated in the output asset
	/// (THORChain-family quotes carry this as `fees.total`)
	pub fee_in_output: Option<u128>,

	/// Router contract to call, for EVM-style providers
	pub router_address: Option<String>,

	/// Opaque routing instructions: a memo for deposit-based providers,
	/// calldata for router-based ones
	pub memo: Option<String>,

	pub expires_at: Option<DateTime<Utc>>,
}

impl Quote {
	pub fn new(
		provider: SwapProvider,
		source_asset: AssetRef,
		destination_asset: AssetRef,
		input_amount: u128,
		expected_output_amount: u128,
	) -> Self {
		Self {
			provider,
			source_asset,
			destination_asset,
			input_amount,
			expected_output_amount,
			estimated_network_fee: 0,
			fee_in_output: None,
			router_address: None,
			memo: None,
			expires_at: None,
		}
	}

	pub fn with_network_fee(mut self, fee: u128) -> Self {
		self.estimated_network_fee = fee;
		self
	}

	pub fn with_fee_in_output(mut self, fee: u128) -> Self {
		self.fee_in_output = Some(fee);
		self
	}

	pub fn with_router_address(mut self, address: impl Into<String>) -> Self {
		self.router_address = Some(address.into());
		self
	}

	pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
		self.memo = Some(memo.into());
		self
	}

	pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
		self.expires_at = Some(expires_at);
		self
	}

	/// Whether the quote may enter the candidate set
	///
	/// Zero-output quotes are rejected at the aggregation boundary; they
	/// are a provider's way of saying "no route" without an error.
	pub fn is_executable(&self) -> bool {
		self.input_amount > 0 && self.expected_output_amount > 0
	}

	/// Whether the quote has expired
	pub fn is_expired(&self) -> bool {
		match self.expires_at {
			Some(expires_at) => Utc::now() > expires_at,
			None => false,
		}
	}

	/// Fee expressed in the destination asset's smallest unit
	///
	/// Prefers the provider's own output-denominated figure; otherwise
	/// converts the native-unit fee through the quote's implied price.
	/// The conversion is exact when the source asset is the chain's native
	/// asset (the only case where fee and input share a unit).
	pub fn fee_in_destination_units(&self) -> u128 {
		if let Some(fee) = self.fee_in_output {
			return fee;
		}

		if self.input_amount == 0 {
			return self.estimated_network_fee;
		}

		// Saturation on pathological magnitudes only deprioritizes the quote
		self.estimated_network_fee
			.saturating_mul(self.expected_output_amount)
			/ self.input_amount
	}

	/// Expected output net of the network fee, the ranking key
	pub fn net_output(&self) -> u128 {
		self.expected_output_amount
			.saturating_sub(self.fee_in_destination_units())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::chains::Chain;

	fn create_test_quote() -> Quote {
		Quote::new(
			SwapProvider::Thorchain,
			AssetRef::native(Chain::Bitcoin),
			AssetRef::native(Chain::Ethereum),
			100_000_000,
			1_500_000_000_000_000_000,
		)
	}

	#[test]
	fn test_executability() {
		assert!(create_test_quote().is_executable());

		let mut zero_out = create_test_quote();
		zero_out.expected_output_amount = 0;
		assert!(!zero_out.is_executable());
	}

	#[test]
	fn test_net_output_prefers_provider_fee() {
		let quote = create_test_quote()
			.with_network_fee(10_000)
			.with_fee_in_output(2_000_000_000_000_000);

		assert_eq!(
			quote.net_output(),
			1_500_000_000_000_000_000 - 2_000_000_000_000_000
		);
	}

	#[test]
	fn test_net_output_converts_native_fee_at_implied_rate() {
		// 1 BTC in, 1.5 ETH out; a 10_000 sat fee converts at the quote's
		// own rate: 10_000 * 1.5e18 / 1e8
		let quote = create_test_quote().with_network_fee(10_000);
		let expected_fee = 10_000u128 * 1_500_000_000_000_000_000 / 100_000_000;

		assert_eq!(quote.net_output(), 1_500_000_000_000_000_000 - expected_fee);
	}

	#[test]
	fn test_expiry() {
		let fresh = create_test_quote().with_expiry(Utc::now() + chrono::Duration::minutes(5));
		assert!(!fresh.is_expired());

		let expired = create_test_quote().with_expiry(Utc::now() - chrono::Duration::minutes(1));
		assert!(expired.is_expired());

		assert!(!create_test_quote().is_expired());
	}
}
