//! THORChain/Maya quote adapter
//!
//! Both networks expose the same node quote endpoint, so one adapter serves
//! either, parameterized by base URL and provider tag. Node amounts are
//! fixed 8-decimal integers regardless of the asset's own precision; the
//! adapter converts on both edges so only smallest-unit amounts escape.

use crate::client_cache::{ClientCache, ClientConfig};
use crate::SwapAdapter;
use async_trait::async_trait;
use chainflow_types::{AdapterError, AdapterResult, Amount, Quote, QuoteRequest, SwapProvider};
use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug)]
pub struct CrossChainAdapter {
	provider: SwapProvider,
	base: String,
	path_prefix: &'static str,
	cache: ClientCache,
}

#[derive(Debug, Deserialize)]
struct NodeQuoteResponse {
	#[serde(default)]
	expected_amount_out: Option<Amount>,
	#[serde(default)]
	recommended_min_amount_in: Option<Amount>,
	#[serde(default)]
	fees: Option<QuoteFees>,
	#[serde(default)]
	inbound_address: Option<String>,
	#[serde(default)]
	router: Option<String>,
	#[serde(default)]
	memo: Option<String>,
	/// Unix seconds after which the quoted route is void
	#[serde(default)]
	expiry: Option<i64>,
	/// Set instead of the quote fields when the node rejects the request
	#[serde(default)]
	error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QuoteFees {
	total: Option<Amount>,
}

/// Scale a fixed 8-decimal node amount into an asset's smallest unit
fn from_fixed8(value: u128, decimals: u8) -> u128 {
	if decimals >= 8 {
		value * 10u128.pow(u32::from(decimals) - 8)
	} else {
		value / 10u128.pow(8 - u32::from(decimals))
	}
}

/// Scale a smallest-unit amount into the node's fixed 8-decimal form
fn to_fixed8(value: u128, decimals: u8) -> u128 {
	if decimals >= 8 {
		value / 10u128.pow(u32::from(decimals) - 8)
	} else {
		value * 10u128.pow(8 - u32::from(decimals))
	}
}

fn node_amount(value: &Amount) -> AdapterResult<u128> {
	value.as_u128().map_err(|_| AdapterError::Provider {
		message: format!("node amount out of range: {}", value),
	})
}

impl CrossChainAdapter {
	pub fn thorchain(base: String, cache: ClientCache) -> Self {
		Self {
			provider: SwapProvider::Thorchain,
			base,
			path_prefix: "thorchain",
			cache,
		}
	}

	pub fn mayachain(base: String, cache: ClientCache) -> Self {
		Self {
			provider: SwapProvider::Mayachain,
			base,
			path_prefix: "mayachain",
			cache,
		}
	}

	fn map_response(
		&self,
		request: &QuoteRequest,
		response: NodeQuoteResponse,
	) -> AdapterResult<Quote> {
		if let Some(error) = response.error {
			return Err(AdapterError::Provider { message: error });
		}

		let amount_fixed8 = to_fixed8(request.amount, request.source_asset.decimals);

		if let Some(minimum) = &response.recommended_min_amount_in {
			let minimum_fixed8 = node_amount(minimum)?;
			if amount_fixed8 < minimum_fixed8 {
				return Err(AdapterError::AmountTooSmall {
					minimum: from_fixed8(minimum_fixed8, request.source_asset.decimals)
						.to_string(),
				});
			}
		}

		let expected_amount_out =
			response
				.expected_amount_out
				.ok_or_else(|| AdapterError::Provider {
					message: "quote missing expected_amount_out".to_string(),
				})?;
		let dest_decimals = request.destination_asset.decimals;
		let expected_out = from_fixed8(node_amount(&expected_amount_out)?, dest_decimals);

		let mut quote = Quote::new(
			self.provider,
			request.source_asset.clone(),
			request.destination_asset.clone(),
			request.amount,
			expected_out,
		);

		if let Some(total) = response.fees.and_then(|f| f.total) {
			quote = quote.with_fee_in_output(from_fixed8(node_amount(&total)?, dest_decimals));
		}

		// Router for EVM sources, inbound vault address otherwise; either
		// way the memo drives the swap
		if let Some(router) = response.router.or(response.inbound_address) {
			quote = quote.with_router_address(router);
		}
		if let Some(memo) = response.memo {
			quote = quote.with_memo(memo);
		}
		if let Some(expiry) = response.expiry {
			if let Some(expires_at) = Utc.timestamp_opt(expiry, 0).single() {
				quote = quote.with_expiry(expires_at);
			}
		}

		Ok(quote)
	}
}

#[async_trait]
impl SwapAdapter for CrossChainAdapter {
	fn id(&self) -> &'static str {
		self.provider.id()
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		let config = ClientConfig::for_provider(self.id(), &self.base);
		let client = self.cache.get_client(&config)?;

		let amount_fixed8 = to_fixed8(request.amount, request.source_asset.decimals);
		let url = format!("{}/{}/quote/swap", self.base, self.path_prefix);

		debug!(
			"Requesting {} quote: {} -> {}",
			self.provider,
			request.source_asset.swap_notation(),
			request.destination_asset.swap_notation()
		);

		let response: NodeQuoteResponse = client
			.get(&url)
			.query(&[
				("from_asset", request.source_asset.swap_notation()),
				("to_asset", request.destination_asset.swap_notation()),
				("amount", amount_fixed8.to_string()),
				("destination", request.to_address.clone()),
			])
			.send()
			.await?
			.json()
			.await?;

		self.map_response(request, response)
	}
}
