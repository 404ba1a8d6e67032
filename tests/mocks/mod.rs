//! Mock adapters and chain clients for integration tests
//!
//! Simple, scriptable stand-ins so the whole engine can be exercised
//! without touching a network.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chainflow::adapters::SwapAdapter;
use chainflow::chains::{ByteFeeSource, FlatFeeSource, GasPriceSource, StatusProvider};
use chainflow::types::errors::{AdapterError, AdapterResult, ChainResult};
use chainflow::types::status::StatusObservation;
use chainflow::{Chain, Quote, QuoteRequest, SwapProvider};

/// Swap adapter replaying a configured outcome, with call tracking
#[derive(Debug)]
pub struct MockSwapAdapter {
	provider: SwapProvider,
	output_amount: u128,
	fee_in_output: u128,
	delay: Option<Duration>,
	fail: bool,
	calls: Arc<AtomicUsize>,
}

impl MockSwapAdapter {
	pub fn quoting(provider: SwapProvider, output_amount: u128) -> Self {
		Self {
			provider,
			output_amount,
			fee_in_output: 0,
			delay: None,
			fail: false,
			calls: Arc::new(AtomicUsize::new(0)),
		}
	}

	pub fn with_fee_in_output(mut self, fee: u128) -> Self {
		self.fee_in_output = fee;
		self
	}

	pub fn with_delay(mut self, delay: Duration) -> Self {
		self.delay = Some(delay);
		self
	}

	pub fn failing(provider: SwapProvider) -> Self {
		Self {
			fail: true,
			..Self::quoting(provider, 0)
		}
	}

	pub fn call_tracker(&self) -> Arc<AtomicUsize> {
		Arc::clone(&self.calls)
	}
}

#[async_trait]
impl SwapAdapter for MockSwapAdapter {
	fn id(&self) -> &'static str {
		self.provider.id()
	}

	async fn fetch_quote(&self, request: &QuoteRequest) -> AdapterResult<Quote> {
		self.calls.fetch_add(1, Ordering::SeqCst);

		if let Some(delay) = self.delay {
			tokio::time::sleep(delay).await;
		}
		if self.fail {
			return Err(AdapterError::Provider {
				message: "mock provider failure".to_string(),
			});
		}

		Ok(Quote::new(
			self.provider,
			request.source_asset.clone(),
			request.destination_asset.clone(),
			request.amount,
			self.output_amount,
		)
		.with_fee_in_output(self.fee_in_output))
	}
}

/// Status provider replaying a script of observations per poll
#[derive(Debug)]
pub struct MockStatusProvider {
	script: Vec<StatusObservation>,
	calls: AtomicUsize,
}

impl MockStatusProvider {
	pub fn new(script: Vec<StatusObservation>) -> Self {
		Self {
			script,
			calls: AtomicUsize::new(0),
		}
	}

	pub fn calls(&self) -> usize {
		self.calls.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl StatusProvider for MockStatusProvider {
	async fn check_status(
		&self,
		_chain: Chain,
		_tx_identifier: &str,
	) -> ChainResult<StatusObservation> {
		let index = self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(self
			.script
			.get(index)
			.cloned()
			.unwrap_or_else(|| self.script.last().cloned().expect("script is never empty")))
	}
}

/// Fee sources serving fixed values, or failing when unset
#[derive(Debug)]
pub struct MockFeeSources {
	pub byte_rate: Option<u64>,
	pub gas_price: Option<u128>,
	pub flat_fee: Option<u128>,
}

impl MockFeeSources {
	pub fn fixed(byte_rate: u64, gas_price: u128, flat_fee: u128) -> Self {
		Self {
			byte_rate: Some(byte_rate),
			gas_price: Some(gas_price),
			flat_fee: Some(flat_fee),
		}
	}

	pub fn unavailable() -> Self {
		Self {
			byte_rate: None,
			gas_price: None,
			flat_fee: None,
		}
	}

	fn down() -> chainflow::types::errors::ChainError {
		chainflow::types::errors::ChainError::Protocol {
			detail: "mock source down".to_string(),
		}
	}
}

#[async_trait]
impl ByteFeeSource for MockFeeSources {
	async fn byte_fee_rate(&self, _chain: Chain) -> ChainResult<u64> {
		self.byte_rate.ok_or_else(Self::down)
	}
}

#[async_trait]
impl GasPriceSource for MockFeeSources {
	async fn gas_price(&self, _chain: Chain) -> ChainResult<u128> {
		self.gas_price.ok_or_else(Self::down)
	}
}

#[async_trait]
impl FlatFeeSource for MockFeeSources {
	async fn flat_fee(&self, _chain: Chain) -> ChainResult<u128> {
		self.flat_fee.ok_or_else(Self::down)
	}
}
