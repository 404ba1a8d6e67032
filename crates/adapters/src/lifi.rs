//! LiFi bridge/aggregation adapter
//!
//! Cross-chain EVM routes in a single quote call; gas costs arrive already
//! summed per leg in the source chain's native unit.

use crate::client_cache::{ClientCache, ClientConfig};
use crate::oneinch::evm_token_address;
use crate::SwapAdapter;
use async_trait::async_trait;
use chainflow_types::{AdapterError, AdapterResult, Amount, Quote, QuoteRequest, SwapProvider};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug)]
pub struct LifiAdapter {
	base: String,
	cache: ClientCache,
}

#[derive(Debug, Deserialize)]
struct QuoteResponse {
	estimate: Option<Estimate>,
	#[serde(rename = "transactionRequest")]
	transaction_request: Option<TransactionRequest>,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Estimate {
	#[serde(rename = "toAmount")]
	to_amount: Amount,
	#[serde(rename = "gasCosts", default)]
	gas_costs: Vec<GasCost>,
}

#[derive(Debug, Deserialize)]
struct GasCost {
	amount: Option<Amount>,
}

#[derive(Debug, Deserialize)]
struct TransactionRequest {
	to: Option<String>,
	data: Option<String>,
}

impl LifiAdapter {
	pub fn new(base: String, cache: ClientCache) -> Self {
		Self { base, cache }
	}

	fn map_response(request: &QuoteRequest, response: QuoteResponse) -> AdapterResult<Quote> {
		let estimate = response.estimate.ok_or_else(|| AdapterError::Provider {
			message: response
				.message
				.unwrap_or_else(|| "quote missing estimate".to_string()),
		})?;

		let expected_out = estimate
			.to_amount
			.as_u128()
			.map_err(|_| AdapterError::Provider {
				message: format!("toAmount out of range: {}", estimate.to_amount),
			})?;

		let network_fee: u128 = estimate
			.gas_costs
			.iter()
			.filter_map(|cost| cost.amount.as_ref())
			.filter_map(|amount| amount.as_u128().ok())
			.sum();

		let mut quote = Quote::new(
			SwapProvider::Lifi,
			request.source_asset.clone(),
			request.destination_asset.clone(),
			request.amount,
			expected_out,
		)
		.with_network_fee(network_fee);

		if let Some(tx) = response.transaction_request {
			if let Some(to) = tx.to {
				quote = quote.with_router_address(to);
			}
			if let Some(data) = tx.data {
				quote = quote.with_memo(data);
			}
		}

		Ok(quote)
	}
}

#[async_trait]
impl SwapAdapter for LifiAdapter {
	fn id(&self) -> &'static str {
		"lifi"
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		let (Some(from_chain), Some(to_chain)) = (
			request.source_asset.chain.evm_chain_id(),
			request.destination_asset.chain.evm_chain_id(),
		) else {
			return Err(AdapterError::RouteUnavailable);
		};

		let config = ClientConfig::for_provider(self.id(), &self.base);
		let client = self.cache.get_client(&config)?;

		let url = format!("{}/quote", self.base);
		debug!(
			"Requesting LiFi quote {} -> {}",
			request.source_asset.chain, request.destination_asset.chain
		);

		let response = client
			.get(&url)
			.query(&[
				("fromChain", from_chain.to_string()),
				("toChain", to_chain.to_string()),
				("fromToken", evm_token_address(&request.source_asset)),
				("toToken", evm_token_address(&request.destination_asset)),
				("fromAmount", request.amount.to_string()),
				("fromAddress", request.from_address.clone()),
				("toAddress", request.to_address.clone()),
			])
			.send()
			.await?;

		if !response.status().is_success() {
			let message = response.text().await.unwrap_or_default();
			return Err(AdapterError::Provider { message });
		}

		let body: QuoteResponse = response.json().await?;
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
			AssetRef::native(Chain::Arbitrum),
			1_000_000_000_000_000_000,
			"0xsender",
			"0xrecipient",
		)
	}

	#[test]
	fn test_quote_mapping_sums_gas_legs() {
		let raw = r#"{
			"estimate": {
				"toAmount": "998000000000000000",
				"gasCosts": [
					{"amount": "3000000000000000"},
					{"amount": "1500000000000000"}
				]
			},
			"transactionRequest": {
				"to": "0x1231deb6f5749ef6ce6943a275a1d3e7486f4eae",
				"data": "0xcafebabe"
			}
		}"#;
		let response: QuoteResponse = serde_json::from_str(raw).unwrap();

		let quote = LifiAdapter::map_response(&create_request(), response).unwrap();
		assert_eq!(quote.provider, SwapProvider::Lifi);
		assert_eq!(quote.expected_output_amount, 998_000_000_000_000_000);
		assert_eq!(quote.estimated_network_fee, 4_500_000_000_000_000);
		assert_eq!(
			quote.router_address.as_deref(),
			Some("0x1231deb6f5749ef6ce6943a275a1d3e7486f4eae")
		);
	}

	#[test]
	fn test_missing_estimate_is_provider_error() {
		let raw = r#"{"message": "No available quotes for the requested transfer"}"#;
		let response: QuoteResponse = serde_json::from_str(raw).unwrap();

		let err = LifiAdapter::map_response(&create_request(), response).unwrap_err();
		assert!(matches!(err, AdapterError::Provider { .. }));
	}
}
