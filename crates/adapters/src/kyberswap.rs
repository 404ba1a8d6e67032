//! KyberSwap aggregator adapter
//!
//! Two calls per quote, the way the backend is shaped: find the best route
//! summary first, then build the transaction for it. Both stay inside this
//! adapter; callers see one quote.

use crate::client_cache::{ClientCache, ClientConfig};
use crate::oneinch::evm_token_address;
use crate::SwapAdapter;
use async_trait::async_trait;
use chainflow_types::{
	AdapterError, AdapterResult, Amount, Chain, Quote, QuoteRequest, SwapProvider,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Slippage tolerance in basis points
const SLIPPAGE_BPS: u32 = 100;

#[derive(Debug)]
pub struct KyberSwapAdapter {
	base: String,
	cache: ClientCache,
}

#[derive(Debug, Deserialize)]
struct RoutesResponse {
	data: Option<RoutesData>,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RoutesData {
	#[serde(rename = "routeSummary")]
	route_summary: Value,
	#[serde(rename = "routerAddress")]
	router_address: String,
}

#[derive(Debug, Deserialize)]
struct BuildResponse {
	data: Option<BuildData>,
	#[serde(default)]
	message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BuildData {
	#[serde(rename = "amountOut")]
	amount_out: Amount,
	data: String,
	#[serde(default)]
	gas: Option<String>,
}

impl KyberSwapAdapter {
	pub fn new(base: String, cache: ClientCache) -> Self {
		Self { base, cache }
	}

	/// KyberSwap addresses chains by name, not id
	fn chain_slug(chain: Chain) -> Option<&'static str> {
		match chain {
			Chain::Ethereum => Some("ethereum"),
			Chain::Avalanche => Some("avalanche"),
			Chain::BscChain => Some("bsc"),
			Chain::Arbitrum => Some("arbitrum"),
			Chain::Base => Some("base"),
			Chain::Optimism => Some("optimism"),
			Chain::Polygon => Some("polygon"),
			Chain::Zksync => Some("zksync"),
			_ => None,
		}
	}

	fn map_build(
		request: &QuoteRequest,
		router_address: String,
		route_summary: &Value,
		build: BuildData,
	) -> AdapterResult<Quote> {
		let expected_out = build
			.amount_out
			.as_u128()
			.map_err(|_| AdapterError::Provider {
				message: format!("amountOut out of range: {}", build.amount_out),
			})?;

		let gas = build
			.gas
			.as_deref()
			.and_then(|g| g.parse::<u128>().ok())
			.unwrap_or(0);
		let gas_price = route_summary
			.get("gasPrice")
			.and_then(Value::as_str)
			.and_then(|p| p.parse::<u128>().ok())
			.unwrap_or(0);

		let chain = request.source_asset.chain;
		let quote = Quote::new(
			SwapProvider::KyberSwap(chain),
			request.source_asset.clone(),
			request.destination_asset.clone(),
			request.amount,
			expected_out,
		)
		.with_network_fee(gas.saturating_mul(gas_price))
		.with_router_address(router_address)
		.with_memo(build.data);

		Ok(quote)
	}
}

#[async_trait]
impl SwapAdapter for KyberSwapAdapter {
	fn id(&self) -> &'static str {
		"kyberswap"
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		let source_chain = request.source_asset.chain;
		if request.destination_asset.chain != source_chain {
			return Err(AdapterError::RouteUnavailable);
		}
		let Some(slug) = Self::chain_slug(source_chain) else {
			return Err(AdapterError::RouteUnavailable);
		};

		let config = ClientConfig::for_provider(self.id(), &self.base);
		let client = self.cache.get_client(&config)?;

		debug!("Requesting KyberSwap route on {}", source_chain);

		// Step 1: find the best route
		let routes_url = format!("{}/{}/api/v1/routes", self.base, slug);
		let routes: RoutesResponse = client
			.get(&routes_url)
			.query(&[
				("tokenIn", evm_token_address(&request.source_asset)),
				("tokenOut", evm_token_address(&request.destination_asset)),
				("amountIn", request.amount.to_string()),
			])
			.send()
			.await?
			.json()
			.await?;

		let routes_data = routes.data.ok_or_else(|| AdapterError::Provider {
			message: routes
				.message
				.unwrap_or_else(|| "no route returned".to_string()),
		})?;

		// Step 2: build the transaction for the chosen route
		let build_url = format!("{}/{}/api/v1/route/build", self.base, slug);
		let build: BuildResponse = client
			.post(&build_url)
			.json(&serde_json::json!({
				"routeSummary": routes_data.route_summary,
				"sender": request.from_address,
				"recipient": request.to_address,
				"slippageTolerance": SLIPPAGE_BPS,
			}))
			.send()
			.await?
			.json()
			.await?;

		let build_data = build.data.ok_or_else(|| AdapterError::Provider {
			message: build
				.message
				.unwrap_or_else(|| "route build failed".to_string()),
		})?;

		Self::map_build(
			request,
			routes_data.router_address,
			&routes_data.route_summary,
			build_data,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chainflow_types::AssetRef;

	fn create_request() -> QuoteRequest {
		QuoteRequest::new(
			AssetRef::token(
				Chain::Polygon,
				"USDC",
				"0x3c499c542cef5e3811e1192ce70d8cc03d5c3359",
				6,
			),
			AssetRef::native(Chain::Polygon),
			500_000_000,
			"0xsender",
			"0xsender",
		)
	}

	#[test]
	fn test_build_mapping_combines_route_and_transaction() {
		let route_summary: Value =
			serde_json::from_str(r#"{"gasPrice":"30000000000"}"#).unwrap();
		let build: BuildData = serde_json::from_str(
			r#"{"amountOut":"1200000000000000000000","data":"0xdeadbeef","gas":"280000"}"#,
		)
		.unwrap();

		let quote = KyberSwapAdapter::map_build(
			&create_request(),
			"0x6131b5fae19ea4f9d964eac0408e4408b66337b5".to_string(),
			&route_summary,
			build,
		)
		.unwrap();

		assert_eq!(quote.provider, SwapProvider::KyberSwap(Chain::Polygon));
		assert_eq!(quote.expected_output_amount, 1_200_000_000_000_000_000_000);
		assert_eq!(quote.estimated_network_fee, 280_000 * 30_000_000_000);
		assert_eq!(quote.memo.as_deref(), Some("0xdeadbeef"));
	}

	#[test]
	fn test_unsupported_chain_has_no_slug() {
		assert!(KyberSwapAdapter::chain_slug(Chain::CronosChain).is_none());
		assert!(KyberSwapAdapter::chain_slug(Chain::Bitcoin).is_none());
		assert_eq!(KyberSwapAdapter::chain_slug(Chain::Base), Some("base"));
	}
}
