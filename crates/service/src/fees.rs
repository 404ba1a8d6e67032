//! Fee and gas estimation across the chain families
//!
//! Estimators degrade instead of failing: a dead price endpoint means the
//! documented conservative constant, never an error, because a fee
//! under-estimate strands the transaction while an over-estimate only
//! overpays slightly.

use crate::cache::TtlCache;
use chainflow_chains::{ByteFeeSource, FlatFeeSource, GasPriceSource};
use chainflow_types::{Chain, ChainResult, FeeEstimate, FeeUnit, LEGACY_SIZING};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outputs are fixed at two (one payment, one change) regardless of the
/// intended output count
const UTXO_OUTPUT_COUNT: u64 = 2;

/// Low reference rate for the inputs-needed search, in sats per vbyte
const REFERENCE_BYTE_FEE_RATE: u64 = 10;

/// Inputs-needed search cap before the proportional fallback
const MAX_INPUT_SEARCH: u32 = 10;

/// Floor under any EVM gas price, 1 gwei in wei
const MIN_GAS_PRICE_WEI: u128 = 1_000_000_000;

/// Gas price used when every lookup attempt fails, 30 gwei in wei
const FALLBACK_GAS_PRICE_WEI: u128 = 30_000_000_000;

/// Retry behavior for price lookups, injected rather than buried per call
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
	pub attempts: u32,
	pub backoff: Duration,
}

impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			attempts: 3,
			backoff: Duration::from_millis(500),
		}
	}
}

/// Computes fees per chain family, caching rate lookups with short TTLs
pub struct FeeEstimator {
	byte_fees: Arc<dyn ByteFeeSource>,
	gas_prices: Arc<dyn GasPriceSource>,
	flat_fees: Arc<dyn FlatFeeSource>,
	byte_fee_cache: TtlCache<Chain, u64>,
	gas_price_cache: TtlCache<Chain, u128>,
	flat_fee_cache: TtlCache<Chain, u128>,
	retry: RetryPolicy,
}

/// UTXO byte-fee rates are padded x2.5 before use
fn normalize_byte_fee_rate(rate: u64) -> u64 {
	rate * 2 + rate / 2
}

/// EVM gas prices are padded x1.5 and floored to avoid zero-fee underpricing
fn normalize_gas_price(price: u128) -> u128 {
	let padded = price + price / 2;
	padded.max(MIN_GAS_PRICE_WEI)
}

/// Byte-fee rate used when the explorer is unreachable, in sats per vbyte
fn fallback_byte_fee_rate(chain: Chain) -> u64 {
	match chain {
		Chain::Bitcoin => 20,
		Chain::Dogecoin => 1_000,
		_ => 10,
	}
}

impl FeeEstimator {
	pub fn new(
		byte_fees: Arc<dyn ByteFeeSource>,
		gas_prices: Arc<dyn GasPriceSource>,
		flat_fees: Arc<dyn FlatFeeSource>,
		cache_ttl: Duration,
		retry: RetryPolicy,
	) -> Self {
		Self {
			byte_fees,
			gas_prices,
			flat_fees,
			byte_fee_cache: TtlCache::new(cache_ttl),
			gas_price_cache: TtlCache::new(cache_ttl),
			flat_fee_cache: TtlCache::new(cache_ttl),
			retry,
		}
	}

	/// Fee for a UTXO transaction with the given inputs at a byte-fee rate
	///
	/// Size is `inputs x bytes_per_input + 2 x bytes_per_output + base`,
	/// with segwit or legacy weights per chain; the fee charges the ceiling
	/// of the size in whole vbytes.
	pub fn estimate_utxo_fee(chain: Chain, input_count: u32, byte_fee_rate: u64) -> FeeEstimate {
		// Legacy weights are the conservative default if a non-UTXO chain
		// slips through
		let sizing = chain.utxo_sizing().unwrap_or(&LEGACY_SIZING);

		let size_quarter_vbytes = u64::from(input_count) * sizing.input_quarter_vbytes
			+ UTXO_OUTPUT_COUNT * sizing.output_quarter_vbytes
			+ sizing.base_quarter_vbytes;
		let vbytes = size_quarter_vbytes.div_ceil(4);

		FeeEstimate::new(
			u128::from(vbytes) * u128::from(byte_fee_rate),
			FeeUnit::PerByte,
			chain.family(),
		)
	}

	/// How many inputs a spend of `target_amount` will plausibly consume
	///
	/// Searches upward from one input until the accumulated reference value
	/// covers the target plus the fee those inputs cost; past the cap the
	/// estimate is proportional.
	pub fn estimate_utxo_inputs_needed(chain: Chain, target_amount: u128) -> u32 {
		let average = u128::from(chain.average_utxo_value().unwrap_or(1));

		for input_count in 1..=MAX_INPUT_SEARCH {
			let capacity = u128::from(input_count) * average;
			let fee =
				Self::estimate_utxo_fee(chain, input_count, REFERENCE_BYTE_FEE_RATE).amount;
			if capacity >= target_amount + fee {
				return input_count;
			}
		}

		target_amount.div_ceil(average).min(u128::from(u32::MAX)) as u32
	}

	/// Padded byte-fee rate for a UTXO chain, cached with a short TTL
	pub async fn utxo_byte_fee_rate(&self, chain: Chain) -> u64 {
		let source = Arc::clone(&self.byte_fees);
		let retry = self.retry;
		let fetched = self
			.byte_fee_cache
			.get_or_fetch(chain, || async move {
				with_retry(retry, || {
					let source = Arc::clone(&source);
					async move { source.byte_fee_rate(chain).await }
				})
				.await
			})
			.await;

		match fetched {
			Ok(rate) => normalize_byte_fee_rate(rate),
			Err(err) => {
				warn!("Byte-fee lookup for {} failed: {}; using fallback", chain, err);
				fallback_byte_fee_rate(chain)
			},
		}
	}

	/// Fee for an EVM call, padding the gas limit by the chain's multiplier
	pub async fn estimate_evm_fee(&self, base_gas_units: u64, chain: Chain) -> FeeEstimate {
		let multiplier_tenths = chain.gas_limit_multiplier_tenths().unwrap_or(16);
		let padded_gas = u128::from(base_gas_units) * u128::from(multiplier_tenths) / 10;

		let source = Arc::clone(&self.gas_prices);
		let retry = self.retry;
		let fetched = self
			.gas_price_cache
			.get_or_fetch(chain, || async move {
				with_retry(retry, || {
					let source = Arc::clone(&source);
					async move { source.gas_price(chain).await }
				})
				.await
			})
			.await;

		let gas_price = match fetched {
			Ok(price) => normalize_gas_price(price),
			Err(err) => {
				warn!("Gas-price lookup for {} failed: {}; using fallback", chain, err);
				FALLBACK_GAS_PRICE_WEI
			},
		};

		debug!(
			"EVM fee on {}: {} gas x {} wei",
			chain, padded_gas, gas_price
		);

		FeeEstimate::new(padded_gas * gas_price, FeeUnit::Gas, chain.family())
	}

	/// Flat network fee for a simple account-model chain
	pub async fn estimate_flat_fee(&self, chain: Chain) -> FeeEstimate {
		let source = Arc::clone(&self.flat_fees);
		let retry = self.retry;
		let fetched = self
			.flat_fee_cache
			.get_or_fetch(chain, || async move {
				with_retry(retry, || {
					let source = Arc::clone(&source);
					async move { source.flat_fee(chain).await }
				})
				.await
			})
			.await;

		let amount = match fetched {
			Ok(fee) => fee,
			Err(err) => {
				warn!("Flat-fee lookup for {} failed: {}; using fallback", chain, err);
				chain.fallback_flat_fee().unwrap_or(0)
			},
		};

		FeeEstimate::new(amount, FeeUnit::Flat, chain.family())
	}
}

/// Run a fallible lookup up to `policy.attempts` times with a fixed backoff
async fn with_retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> ChainResult<T>
where
	F: FnMut() -> Fut,
	Fut: Future<Output = ChainResult<T>>,
{
	let mut last_err = None;
	for attempt in 0..policy.attempts.max(1) {
		if attempt > 0 {
			tokio::time::sleep(policy.backoff).await;
		}
		match op().await {
			Ok(value) => return Ok(value),
			Err(err) => last_err = Some(err),
		}
	}
	Err(last_err.expect("at least one attempt runs"))
}
