//! Core quote aggregation logic

use chainflow_adapters::AdapterRegistry;
use chainflow_types::{Quote, QuoteRequest, SwapProvider};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Fans one request out to every eligible provider concurrently
///
/// Each provider runs under its own timeout so a hung backend cannot stall
/// the faster ones, and the fan-out is plain joined futures rather than
/// spawned tasks: dropping the aggregation future cancels every in-flight
/// request with it.
pub struct QuoteAggregator {
	registry: Arc<AdapterRegistry>,
	per_provider_timeout: Duration,
}

impl QuoteAggregator {
	pub fn new(registry: Arc<AdapterRegistry>, per_provider_timeout: Duration) -> Self {
		Self {
			registry,
			per_provider_timeout,
		}
	}

	/// Fetch quotes from the given providers; partial results are valid and
	/// an empty vector is the ordinary answer for total failure
	pub async fn fetch_quotes(
		&self,
		request: &QuoteRequest,
		providers: &[SwapProvider],
	) -> Vec<Quote> {
		info!(
			"Fetching quotes for request {} from {} providers",
			request.request_id,
			providers.len()
		);

		let fetches = providers.iter().map(|provider| {
			let provider = *provider;
			async move {
				let Some(adapter) = self.registry.get(provider) else {
					warn!("No adapter registered for provider {}", provider);
					return None;
				};

				debug!("Starting quote fetch from {}", provider);
				match timeout(self.per_provider_timeout, adapter.fetch_quote(request)).await {
					Err(_) => {
						warn!(
							"Provider {} timed out after {:?}",
							provider, self.per_provider_timeout
						);
						None
					},
					Ok(Err(err)) => {
						warn!("Provider {} excluded this round: {}", provider, err);
						None
					},
					Ok(Ok(quote)) if !quote.is_executable() => {
						warn!("Provider {} returned a non-positive quote", provider);
						None
					},
					Ok(Ok(quote)) => {
						debug!(
							"Provider {} quoted {} -> {}",
							provider, quote.input_amount, quote.expected_output_amount
						);
						Some(quote)
					},
				}
			}
		});

		let quotes: Vec<Quote> = join_all(fetches).await.into_iter().flatten().collect();

		info!(
			"Quote aggregation completed: {} quotes from {} providers",
			quotes.len(),
			providers.len()
		);

		quotes
	}
}
