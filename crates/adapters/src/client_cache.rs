//! HTTP client cache for the provider adapters
//!
//! Provides per-provider client instances with connection pooling and
//! keep-alive, recreated on a TTL so long-lived processes pick up DNS and
//! TLS changes.

use chainflow_types::AdapterResult;
use dashmap::DashMap;
use reqwest::{Client, ClientBuilder};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Configuration for creating optimized HTTP clients
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientConfig {
	/// Provider identifier for cache differentiation
	pub provider_id: String,
	/// Base endpoint the client talks to
	pub base_url: String,
	/// Maximum number of idle connections per host
	pub max_idle_per_host: usize,
	/// Connection keep-alive timeout
	pub keep_alive_timeout_ms: u64,
}

impl ClientConfig {
	pub fn for_provider(provider_id: impl Into<String>, base_url: impl Into<String>) -> Self {
		Self {
			provider_id: provider_id.into(),
			base_url: base_url.into(),
			max_idle_per_host: 10,
			keep_alive_timeout_ms: 90_000,
		}
	}
}

/// Cached client with creation timestamp for TTL management
#[derive(Debug, Clone)]
struct CachedClient {
	client: Arc<Client>,
	created_at: Instant,
}

impl CachedClient {
	fn new(client: Client) -> Self {
		Self {
			client: Arc::new(client),
			created_at: Instant::now(),
		}
	}

	fn is_expired(&self, ttl: Duration) -> bool {
		self.created_at.elapsed() > ttl
	}
}

/// Thread-safe cache of HTTP clients keyed by provider configuration
#[derive(Clone, Debug)]
pub struct ClientCache {
	clients: Arc<DashMap<ClientConfig, CachedClient>>,
	ttl: Duration,
}

impl ClientCache {
	/// Create a new client cache with the default 30-minute TTL
	pub fn new() -> Self {
		Self::with_ttl(Duration::from_secs(30 * 60))
	}

	/// Create a new client cache with a custom TTL
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			clients: Arc::new(DashMap::new()),
			ttl,
		}
	}

	/// Get or create a pooled client for the given configuration
	pub fn get_client(&self, config: &ClientConfig) -> AdapterResult<Arc<Client>> {
		self.clients
			.remove_if(config, |_, cached| cached.is_expired(self.ttl));

		if let Some(cached) = self.clients.get(config) {
			return Ok(cached.client.clone());
		}

		debug!("Creating pooled client for {}", config.provider_id);
		let cached = CachedClient::new(Self::build_client(config)?);
		let client = cached.client.clone();

		// Entry API keeps concurrent creators from clobbering each other
		use dashmap::mapref::entry::Entry;
		match self.clients.entry(config.clone()) {
			Entry::Occupied(entry) => Ok(entry.get().client.clone()),
			Entry::Vacant(entry) => {
				entry.insert(cached);
				Ok(client)
			},
		}
	}

	fn build_client(config: &ClientConfig) -> AdapterResult<Client> {
		let client = ClientBuilder::new()
			.pool_max_idle_per_host(config.max_idle_per_host)
			.pool_idle_timeout(Duration::from_millis(config.keep_alive_timeout_ms))
			.tcp_keepalive(Duration::from_secs(60))
			.build()?;

		Ok(client)
	}

	/// Get the configured TTL duration
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// Convenience constructor handing adapters the shared process cache
	pub fn for_adapter() -> Self {
		global_client_cache().clone()
	}
}

impl Default for ClientCache {
	fn default() -> Self {
		Self::new()
	}
}

lazy_static::lazy_static! {
	static ref GLOBAL_CLIENT_CACHE: ClientCache = ClientCache::new();
}

/// Get the global client cache instance
pub fn global_client_cache() -> &'static ClientCache {
	&GLOBAL_CLIENT_CACHE
}
