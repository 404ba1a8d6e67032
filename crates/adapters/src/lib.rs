//! Chainflow Adapters
//!
//! One adapter per swap provider, each translating its backend's request and
//! response shapes into the canonical [`Quote`]. Adapters are registered in
//! an [`AdapterRegistry`] keyed by provider identity: adding a provider means
//! implementing [`SwapAdapter`] and registering it, never editing a dispatch
//! switch elsewhere.

use async_trait::async_trait;
use chainflow_types::{AdapterResult, Quote, QuoteRequest, SwapProvider};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

pub mod client_cache;
pub mod kyberswap;
pub mod lifi;
pub mod oneinch;
pub mod thorchain;

pub use client_cache::ClientCache;
pub use kyberswap::KyberSwapAdapter;
pub use lifi::LifiAdapter;
pub use oneinch::OneInchAdapter;
pub use thorchain::CrossChainAdapter;

/// Core trait for swap-provider adapter implementations
///
/// One call produces one quote or one absorbed error; no provider schema
/// crosses this boundary in either direction.
#[async_trait]
pub trait SwapAdapter: Send + Sync + std::fmt::Debug {
	/// Stable provider identifier this adapter serves
	fn id(&self) -> &'static str;

	/// Fetch a quote for the request, normalized into the canonical shape
	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote>;
}

/// Endpoint table for the provider backends, all overridable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEndpoints {
	pub thornode_base: String,
	pub mayanode_base: String,
	pub oneinch_base: String,
	pub kyberswap_base: String,
	pub lifi_base: String,
}

impl Default for ProviderEndpoints {
	fn default() -> Self {
		Self {
			thornode_base: "https://thornode.ninerealms.com".to_string(),
			mayanode_base: "https://mayanode.mayachain.info".to_string(),
			oneinch_base: "https://api.1inch.dev".to_string(),
			kyberswap_base: "https://aggregator-api.kyberswap.com".to_string(),
			lifi_base: "https://li.quest/v1".to_string(),
		}
	}
}

/// Registry of adapters keyed by provider identity
#[derive(Debug, Default)]
pub struct AdapterRegistry {
	adapters: HashMap<&'static str, Arc<dyn SwapAdapter>>,
}

impl AdapterRegistry {
	pub fn new() -> Self {
		Self {
			adapters: HashMap::new(),
		}
	}

	/// Build a registry with every built-in provider adapter
	pub fn with_defaults(endpoints: &ProviderEndpoints) -> Self {
		let cache = ClientCache::for_adapter();
		let mut registry = Self::new();

		registry.register(Arc::new(CrossChainAdapter::thorchain(
			endpoints.thornode_base.clone(),
			cache.clone(),
		)));
		registry.register(Arc::new(CrossChainAdapter::mayachain(
			endpoints.mayanode_base.clone(),
			cache.clone(),
		)));
		registry.register(Arc::new(OneInchAdapter::new(
			endpoints.oneinch_base.clone(),
			cache.clone(),
		)));
		registry.register(Arc::new(KyberSwapAdapter::new(
			endpoints.kyberswap_base.clone(),
			cache.clone(),
		)));
		registry.register(Arc::new(LifiAdapter::new(endpoints.lifi_base.clone(), cache)));

		registry
	}

	pub fn register(&mut self, adapter: Arc<dyn SwapAdapter>) {
		self.adapters.insert(adapter.id(), adapter);
	}

	pub fn get(&self, provider: SwapProvider) -> Option<Arc<dyn SwapAdapter>> {
		self.adapters.get(provider.id()).cloned()
	}

	pub fn len(&self) -> usize {
		self.adapters.len()
	}

	pub fn is_empty(&self) -> bool {
		self.adapters.is_empty()
	}
}
