//! 1inch router adapter
//!
//! Same-chain EVM swaps only; the single swap call returns the expected
//! output together with ready-to-sign calldata and a gas estimate.

use crate::client_cache::{ClientCache, ClientConfig};
use crate::SwapAdapter;
use async_trait::async_trait;
use chainflow_types::{AdapterError, AdapterResult, Amount, Quote, QuoteRequest, SwapProvider};
use serde::Deserialize;
use tracing::debug;

/// Pseudo-address EVM aggregators use for a chain's native asset
pub(crate) const NATIVE_TOKEN_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Default slippage tolerance in percent
const SLIPPAGE_PERCENT: &str = "1";

#[derive(Debug)]
pub struct OneInchAdapter {
	base: String,
	cache: ClientCache,
}

#[derive(Debug, Deserialize)]
struct SwapResponse {
	#[serde(rename = "dstAmount")]
	dst_amount: Amount,
	tx: SwapTransaction,
}

#[derive(Debug, Deserialize)]
struct SwapTransaction {
	to: String,
	data: String,
	gas: u64,
	#[serde(rename = "gasPrice")]
	gas_price: String,
}

pub(crate) fn evm_token_address(asset: &chainflow_types::AssetRef) -> String {
	asset
		.contract
		.clone()
		.unwrap_or_else(|| NATIVE_TOKEN_ADDRESS.to_string())
}

impl OneInchAdapter {
	pub fn new(base: String, cache: ClientCache) -> Self {
		Self { base, cache }
	}

	fn map_response(request: &QuoteRequest, response: SwapResponse) -> AdapterResult<Quote> {
		let expected_out = response
			.dst_amount
			.as_u128()
			.map_err(|_| AdapterError::Provider {
				message: format!("dstAmount out of range: {}", response.dst_amount),
			})?;

		let gas_price = response.tx.gas_price.parse::<u128>().unwrap_or(0);
		let network_fee = u128::from(response.tx.gas).saturating_mul(gas_price);

		let chain = request.source_asset.chain;
		let quote = Quote::new(
			SwapProvider::OneInch(chain),
			request.source_asset.clone(),
			request.destination_asset.clone(),
			request.amount,
			expected_out,
		)
		.with_network_fee(network_fee)
		.with_router_address(response.tx.to)
		.with_memo(response.tx.data);

		Ok(quote)
	}
}

#[async_trait]
impl SwapAdapter for OneInchAdapter {
	fn id(&self) -> &'static str {
		"oneinch"
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		let source_chain = request.source_asset.chain;
		let chain_id = match (
			source_chain.evm_chain_id(),
			request.destination_asset.chain.evm_chain_id(),
		) {
			(Some(src), Some(dst)) if src == dst => src,
			_ => return Err(AdapterError::RouteUnavailable),
		};

		let config = ClientConfig::for_provider(self.id(), &self.base);
		let client = self.cache.get_client(&config)?;

		let url = format!("{}/swap/v6.0/{}/swap", self.base, chain_id);
		debug!("Requesting 1inch quote on {}", source_chain);

		let response = client
			.get(&url)
			.query(&[
				("src", evm_token_address(&request.source_asset)),
				("dst", evm_token_address(&request.destination_asset)),
				("amount", request.amount.to_string()),
				("from", request.from_address.clone()),
				("slippage", SLIPPAGE_PERCENT.to_string()),
				("disableEstimate", "true".to_string()),
			])
			.send()
			.await?;

		if !response.status().is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(AdapterError::Provider { message });
		}

		let body: SwapResponse = response.json().await?;
		Self::map_response(request, body)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::{AssetRef, Chain};

	fn create_request() -> QuoteRequest {
		QuoteRequest::new(
			AssetRef::native(Chain::Ethereum),
			AssetRef::token(
				Chain::Ethereum,
				"USDC",
				"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
				6,
			),
			1_000_000_000_000_000_000,
			"0xsender",
			"0xsender",
		)
	}

	#[test]
	fn test_swap_response_mapping() {
		let raw = r#"{
			"dstAmount": "2500000000",
			"tx": {
				"to": "0x1111111254eeb25477b68fb85ed929f73a960582",
				"data": "0xabcdef",
				"gas": 210000,
				"gasPrice": "20000000000"
			}
		}"#;
		let response: SwapResponse = serde_json::from_str(raw).unwrap();

		let quote = OneInchAdapter::map_response(&create_request(), response).unwrap();
		assert_eq!(quote.provider, SwapProvider::OneInch(Chain::Ethereum));
		assert_eq!(quote.expected_output_amount, 2_500_000_000);
		assert_eq!(quote.estimated_network_fee, 210_000 * 20_000_000_000);
		assert_eq!(
			quote.router_address.as_deref(),
			Some("0x1111111254eeb25477b68fb85ed929f73a960582")
		);
		assert_eq!(quote.memo.as_deref(), Some("0xabcdef"));
	}

	#[test]
	fn test_native_asset_uses_pseudo_address() {
		let request = create_request();
		assert_eq!(evm_token_address(&request.source_asset), NATIVE_TOKEN_ADDRESS);
		assert_eq!(
			evm_token_address(&request.destination_asset),
			"0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"
		);
	}
}
