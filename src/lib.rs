//! Chainflow Engine
//!
//! Transaction-economics engine for a multi-chain wallet: resolves which
//! swap providers may quote a pair, aggregates their quotes concurrently,
//! ranks routes by net output, computes protocol-correct fees per chain
//! family, and tracks broadcast transactions to a canonical terminal state.
//!
//! The [`Engine`] facade is the only surface upstream orchestration code
//! needs: `get_quotes`, `estimate_fee` and `poll_status`. Failures local to
//! one provider or one chain endpoint never escape those calls; the
//! caller-visible outcomes are an empty quote list or a still-pending
//! record, both ordinary values.

use std::sync::Arc;
use std::time::Duration;

use chainflow_adapters::AdapterRegistry;
use chainflow_chains::{ChainRouter, StatusProvider};
use chainflow_config::Settings;
use chainflow_service::{
	select_route, EligibilityResolver, FeatureGates, FeeEstimator, QuoteAggregator, RetryPolicy,
	StatusTracker,
};
use tracing::info;

// Core domain types, re-exported for callers
pub use chainflow_types::{
	Amount, AssetRef, Chain, ChainFamily, FeeEstimate, FeeUnit, PollConfig, Quote, QuoteRequest,
	SwapProvider, TransactionStatusRecord, TxState,
};

// Module aliases for direct access to the layers
pub mod adapters {
	pub use chainflow_adapters::*;
}

pub mod chains {
	pub use chainflow_chains::*;
}

pub mod config {
	pub use chainflow_config::*;
}

pub mod service {
	pub use chainflow_service::*;
}

pub mod types {
	pub use chainflow_types::*;
}

/// Parameters for a fee estimate, by chain family
#[derive(Debug, Clone, Copy)]
pub enum FeeParams {
	/// UTXO sizing; the byte-fee rate is looked up live when not supplied
	Utxo {
		input_count: u32,
		byte_fee_rate: Option<u64>,
	},
	/// EVM gas; the chain's safety multiplier pads the base units
	Evm { base_gas_units: u64 },
	/// Flat network fee for simple account chains
	Flat,
}

/// The engine facade
pub struct Engine {
	resolver: EligibilityResolver,
	aggregator: QuoteAggregator,
	estimator: FeeEstimator,
	tracker: StatusTracker,
}

impl Engine {
	/// Build an engine from settings with the built-in providers and chains
	pub fn new(settings: &Settings) -> Result<Self, reqwest::Error> {
		let client = reqwest::Client::builder()
			.timeout(Duration::from_millis(settings.timeouts.request_ms))
			.build()?;

		let router = Arc::new(ChainRouter::new(client.clone(), &settings.chain_endpoints));
		let registry = Arc::new(AdapterRegistry::with_defaults(&settings.provider_endpoints));

		Ok(EngineBuilder::new()
			.with_resolver(EligibilityResolver::new(
				FeatureGates {
					swap_restricted: settings.gates.swap_restricted(),
				},
				settings.gates.remote_gates_url.clone(),
				client,
			))
			.with_registry(registry)
			.with_status_provider(router.clone())
			.with_fee_sources(router.clone(), router.clone(), router)
			.with_settings(settings)
			.build())
	}

	/// Builder for tests and embedders that substitute components
	pub fn builder() -> EngineBuilder {
		EngineBuilder::new()
	}

	/// Quotes for a swap intent, best-effort across all eligible providers
	///
	/// Empty on total failure; "no route" is an answer, not an error.
	pub async fn get_quotes(
		&self,
		source_asset: AssetRef,
		destination_asset: AssetRef,
		amount: u128,
		from_address: impl Into<String>,
		to_address: impl Into<String>,
	) -> Vec<Quote> {
		let request = QuoteRequest::new(
			source_asset,
			destination_asset,
			amount,
			from_address,
			to_address,
		);

		let providers = self.resolver.resolve(&request.source_asset).await;
		if providers.is_empty() {
			info!(
				"No eligible providers for {}; no route available",
				request.source_asset
			);
			return Vec::new();
		}

		self.aggregator.fetch_quotes(&request, &providers).await
	}

	/// The winning route for a swap intent, if any provider can quote it
	pub async fn find_best_route(
		&self,
		source_asset: AssetRef,
		destination_asset: AssetRef,
		amount: u128,
		from_address: impl Into<String>,
		to_address: impl Into<String>,
	) -> Option<Quote> {
		let priority = self.resolver.resolve(&source_asset).await;
		let quotes = self
			.get_quotes(
				source_asset,
				destination_asset,
				amount,
				from_address,
				to_address,
			)
			.await;

		select_route(&quotes, &priority)
	}

	/// Fee estimate for a candidate transaction; always answers, at worst
	/// with the documented fallback constants
	pub async fn estimate_fee(&self, chain: Chain, params: FeeParams) -> FeeEstimate {
		match params {
			FeeParams::Utxo {
				input_count,
				byte_fee_rate,
			} => {
				let rate = match byte_fee_rate {
					Some(rate) => rate,
					None => self.estimator.utxo_byte_fee_rate(chain).await,
				};
				FeeEstimator::estimate_utxo_fee(chain, input_count, rate)
			},
			FeeParams::Evm { base_gas_units } => {
				self.estimator.estimate_evm_fee(base_gas_units, chain).await
			},
			FeeParams::Flat => self.estimator.estimate_flat_fee(chain).await,
		}
	}

	/// One status poll; the caller loops until terminal or its own cutoff,
	/// with [`Chain::poll_config`] as the suggested cadence
	pub async fn poll_status(&self, chain: Chain, tx_identifier: &str) -> TransactionStatusRecord {
		self.tracker.poll(chain, tx_identifier).await
	}
}

/// Step-wise construction of an [`Engine`] with substituted components
pub struct EngineBuilder {
	resolver: Option<EligibilityResolver>,
	registry: Option<Arc<AdapterRegistry>>,
	status_provider: Option<Arc<dyn StatusProvider>>,
	byte_fees: Option<Arc<dyn chainflow_chains::ByteFeeSource>>,
	gas_prices: Option<Arc<dyn chainflow_chains::GasPriceSource>>,
	flat_fees: Option<Arc<dyn chainflow_chains::FlatFeeSource>>,
	per_provider_timeout: Duration,
	fee_cache_ttl: Duration,
	retry: RetryPolicy,
	not_found_budget: u32,
}

impl Default for EngineBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl EngineBuilder {
	pub fn new() -> Self {
		Self {
			resolver: None,
			registry: None,
			status_provider: None,
			byte_fees: None,
			gas_prices: None,
			flat_fees: None,
			per_provider_timeout: Duration::from_secs(3),
			fee_cache_ttl: Duration::from_secs(120),
			retry: RetryPolicy::default(),
			not_found_budget: 5,
		}
	}

	pub fn with_resolver(mut self, resolver: EligibilityResolver) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn with_registry(mut self, registry: Arc<AdapterRegistry>) -> Self {
		self.registry = Some(registry);
		self
	}

	pub fn with_status_provider(mut self, provider: Arc<dyn StatusProvider>) -> Self {
		self.status_provider = Some(provider);
		self
	}

	pub fn with_fee_sources(
		mut self,
		byte_fees: Arc<dyn chainflow_chains::ByteFeeSource>,
		gas_prices: Arc<dyn chainflow_chains::GasPriceSource>,
		flat_fees: Arc<dyn chainflow_chains::FlatFeeSource>,
	) -> Self {
		self.byte_fees = Some(byte_fees);
		self.gas_prices = Some(gas_prices);
		self.flat_fees = Some(flat_fees);
		self
	}

	pub fn with_settings(mut self, settings: &Settings) -> Self {
		self.per_provider_timeout = Duration::from_millis(settings.timeouts.per_provider_ms);
		self.fee_cache_ttl = Duration::from_secs(settings.cache.fee_price_ttl_secs);
		self.retry = RetryPolicy {
			attempts: settings.retry.attempts,
			backoff: Duration::from_millis(settings.retry.backoff_ms),
		};
		self.not_found_budget = settings.tracking.not_found_budget;
		self
	}

	/// Assemble the engine; unset components fall back to defaults built
	/// from the default settings
	pub fn build(self) -> Engine {
		let default_client = reqwest::Client::new();

		let resolver = self.resolver.unwrap_or_else(|| {
			EligibilityResolver::new(FeatureGates::default(), None, default_client.clone())
		});

		let registry = self
			.registry
			.unwrap_or_else(|| Arc::new(AdapterRegistry::with_defaults(&Default::default())));

		let default_router = || {
			Arc::new(ChainRouter::new(
				default_client.clone(),
				&chainflow_chains::Endpoints::default(),
			))
		};

		let status_provider: Arc<dyn StatusProvider> =
			self.status_provider.unwrap_or_else(|| default_router());
		let byte_fees = self.byte_fees.unwrap_or_else(|| default_router());
		let gas_prices = self.gas_prices.unwrap_or_else(|| default_router());
		let flat_fees = self.flat_fees.unwrap_or_else(|| default_router());

		Engine {
			resolver,
			aggregator: QuoteAggregator::new(registry, self.per_provider_timeout),
			estimator: FeeEstimator::new(
				byte_fees,
				gas_prices,
				flat_fees,
				self.fee_cache_ttl,
				self.retry,
			),
			tracker: StatusTracker::with_budget(status_provider, self.not_found_budget),
		}
	}
}
