//! End-to-end quote aggregation and route selection

mod mocks;

use std::sync::Arc;
use std::time::Duration;

use chainflow::adapters::AdapterRegistry;
use chainflow::config::Settings;
use chainflow::service::{
	select_route, EligibilityResolver, FeatureGates, QuoteAggregator, RemoteGates,
};
use chainflow::{AssetRef, Chain, Engine, QuoteRequest, SwapProvider};
use mocks::MockSwapAdapter;

fn registry_of(adapters: Vec<MockSwapAdapter>) -> Arc<AdapterRegistry> {
	let mut registry = AdapterRegistry::new();
	for adapter in adapters {
		registry.register(Arc::new(adapter));
	}
	Arc::new(registry)
}

fn btc_to_eth_request() -> QuoteRequest {
	QuoteRequest::new(
		AssetRef::native(Chain::Bitcoin),
		AssetRef::native(Chain::Ethereum),
		100_000_000,
		"bc1qsender",
		"0xrecipient",
	)
}

#[tokio::test]
async fn three_providers_one_timeout_one_zero_yields_one_quote() {
	let registry = registry_of(vec![
		MockSwapAdapter::quoting(SwapProvider::Thorchain, 1_000_000)
			.with_delay(Duration::from_secs(10)),
		MockSwapAdapter::quoting(SwapProvider::Mayachain, 0),
		MockSwapAdapter::quoting(SwapProvider::Lifi, 900_000),
	]);
	let aggregator = QuoteAggregator::new(registry, Duration::from_millis(100));

	let quotes = aggregator
		.fetch_quotes(
			&btc_to_eth_request(),
			&[
				SwapProvider::Thorchain,
				SwapProvider::Mayachain,
				SwapProvider::Lifi,
			],
		)
		.await;

	assert_eq!(quotes.len(), 1);
	assert_eq!(quotes[0].provider, SwapProvider::Lifi);
}

#[tokio::test]
async fn engine_returns_best_net_output_route() {
	// THORChain quotes more gross but its fee erases the lead
	let engine = Engine::builder()
		.with_registry(registry_of(vec![
			MockSwapAdapter::quoting(SwapProvider::Thorchain, 1_000_000)
				.with_fee_in_output(400_000),
			MockSwapAdapter::quoting(SwapProvider::Mayachain, 800_000).with_fee_in_output(50_000),
		]))
		.build();

	let best = engine
		.find_best_route(
			AssetRef::native(Chain::Bitcoin),
			AssetRef::native(Chain::Ethereum),
			100_000_000,
			"bc1qsender",
			"0xrecipient",
		)
		.await
		.expect("a route should be found");

	assert_eq!(best.provider, SwapProvider::Mayachain);
	assert_eq!(best.net_output(), 750_000);
}

#[tokio::test]
async fn tie_breaks_follow_resolver_priority() {
	let resolver = EligibilityResolver::new(FeatureGates::default(), None, reqwest_client());
	let priority = resolver.resolve_with(&AssetRef::native(Chain::Bitcoin), &RemoteGates::default());

	let registry = registry_of(vec![
		MockSwapAdapter::quoting(SwapProvider::Thorchain, 500_000),
		MockSwapAdapter::quoting(SwapProvider::Mayachain, 500_000),
	]);
	let aggregator = QuoteAggregator::new(registry, Duration::from_millis(100));
	let quotes = aggregator.fetch_quotes(&btc_to_eth_request(), &priority).await;

	// Equal net outputs: the resolver lists THORChain first for Bitcoin
	let winner = select_route(&quotes, &priority).expect("tie must still select");
	assert_eq!(winner.provider, SwapProvider::Thorchain);
}

#[tokio::test]
async fn restricted_locale_returns_no_quotes_despite_live_adapters() {
	let mut settings = Settings::default();
	settings.gates.locale = Some("en-GB".to_string());

	let engine = Engine::builder()
		.with_resolver(EligibilityResolver::new(
			FeatureGates {
				swap_restricted: settings.gates.swap_restricted(),
			},
			None,
			reqwest_client(),
		))
		.with_registry(registry_of(vec![MockSwapAdapter::quoting(
			SwapProvider::Thorchain,
			1_000_000,
		)]))
		.build();

	let quotes = engine
		.get_quotes(
			AssetRef::native(Chain::Bitcoin),
			AssetRef::native(Chain::Ethereum),
			100_000_000,
			"bc1qsender",
			"0xrecipient",
		)
		.await;

	assert!(quotes.is_empty());
}

#[tokio::test]
async fn unrouted_chain_yields_no_route_not_error() {
	let engine = Engine::builder()
		.with_registry(registry_of(vec![]))
		.build();

	let best = engine
		.find_best_route(
			AssetRef::native(Chain::Solana),
			AssetRef::native(Chain::Ethereum),
			1_000_000_000,
			"solsender",
			"0xrecipient",
		)
		.await;

	assert!(best.is_none());
}

fn reqwest_client() -> reqwest::Client {
	reqwest::Client::new()
}
