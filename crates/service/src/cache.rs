//! Generic TTL cache with single-flight fetching
//!
//! One abstraction for every fee/price lookup: get the cached value if it is
//! fresh, otherwise run the supplied fetch while holding the key's slot so
//! concurrent misses for the same key share one upstream call instead of
//! fanning out. Different keys never contend.

use dashmap::DashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

#[derive(Debug)]
struct Slot<V> {
	value: Option<(V, Instant)>,
}

/// Process-wide cache keyed by `K`, refreshed at most once per TTL window
pub struct TtlCache<K, V> {
	slots: DashMap<K, Arc<Mutex<Slot<V>>>>,
	ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
	K: Eq + Hash + Clone,
	V: Clone,
{
	pub fn new(ttl: Duration) -> Self {
		Self {
			slots: DashMap::new(),
			ttl,
		}
	}

	fn slot(&self, key: K) -> Arc<Mutex<Slot<V>>> {
		self.slots
			.entry(key)
			.or_insert_with(|| Arc::new(Mutex::new(Slot { value: None })))
			.clone()
	}

	/// Return the fresh cached value or fetch and store a new one
	///
	/// The slot stays locked for the duration of the fetch: that is the
	/// single-flight guarantee. A failed fetch caches nothing, so the next
	/// caller retries upstream.
	pub async fn get_or_fetch<E, F, Fut>(&self, key: K, fetch: F) -> Result<V, E>
	where
		F: FnOnce() -> Fut,
		Fut: Future<Output = Result<V, E>>,
	{
		let slot = self.slot(key);
		let mut guard = slot.lock().await;

		if let Some((value, stored_at)) = &guard.value {
			if stored_at.elapsed() < self.ttl {
				return Ok(value.clone());
			}
		}

		let value = fetch().await?;
		guard.value = Some((value.clone(), Instant::now()));
		Ok(value)
	}

	/// Drop one key's cached value
	pub fn invalidate(&self, key: &K) {
		self.slots.remove(key);
	}

	pub fn ttl(&self) -> Duration {
		self.ttl
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[tokio::test]
	async fn test_fresh_value_is_served_from_cache() {
		let cache: TtlCache<&str, u64> = TtlCache::new(Duration::from_secs(60));
		let fetches = AtomicUsize::new(0);

		for _ in 0..3 {
			let value: Result<u64, ()> = cache
				.get_or_fetch("gas", || async {
					fetches.fetch_add(1, Ordering::SeqCst);
					Ok(42)
				})
				.await;
			assert_eq!(value.unwrap(), 42);
		}

		assert_eq!(fetches.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_expired_value_triggers_refetch() {
		let cache: TtlCache<&str, u64> = TtlCache::new(Duration::from_millis(20));
		let fetches = AtomicUsize::new(0);

		let fetch = || async {
			fetches.fetch_add(1, Ordering::SeqCst);
			Ok::<u64, ()>(7)
		};

		cache.get_or_fetch("fee", fetch).await.unwrap();
		tokio::time::sleep(Duration::from_millis(50)).await;
		cache.get_or_fetch("fee", fetch).await.unwrap();

		assert_eq!(fetches.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_concurrent_misses_share_one_fetch() {
		let cache: Arc<TtlCache<&str, u64>> = Arc::new(TtlCache::new(Duration::from_secs(60)));
		let fetches = Arc::new(AtomicUsize::new(0));

		let mut handles = Vec::new();
		for _ in 0..8 {
			let cache = Arc::clone(&cache);
			let fetches = Arc::clone(&fetches);
			handles.push(tokio::spawn(async move {
				cache
					.get_or_fetch("rate", || async move {
						fetches.fetch_add(1, Ordering::SeqCst);
						tokio::time::sleep(Duration::from_millis(20)).await;
						Ok::<u64, ()>(99)
					})
					.await
					.unwrap()
			}));
		}

		for handle in handles {
			assert_eq!(handle.await.unwrap(), 99);
		}

		// All eight callers observed the one in-flight fetch
		assert_eq!(fetches.load(Ordering::SeqCst), 1);
	}

	#[tokio::test]
	async fn test_failed_fetch_is_not_cached() {
		let cache: TtlCache<&str, u64> = TtlCache::new(Duration::from_secs(60));
		let fetches = AtomicUsize::new(0);

		let failed: Result<u64, &str> = cache
			.get_or_fetch("flaky", || async {
				fetches.fetch_add(1, Ordering::SeqCst);
				Err("upstream down")
			})
			.await;
		assert!(failed.is_err());

		let recovered: Result<u64, &str> = cache
			.get_or_fetch("flaky", || async {
				fetches.fetch_add(1, Ordering::SeqCst);
				Ok(5)
			})
			.await;
		assert_eq!(recovered.unwrap(), 5);
		assert_eq!(fetches.load(Ordering::SeqCst), 2);
	}

	#[tokio::test]
	async fn test_distinct_keys_do_not_share_values() {
		let cache: TtlCache<&str, u64> = TtlCache::new(Duration::from_secs(60));

		let a: Result<u64, ()> = cache.get_or_fetch("a", || async { Ok(1) }).await;
		let b: Result<u64, ()> = cache.get_or_fetch("b", || async { Ok(2) }).await;

		assert_eq!(a.unwrap(), 1);
		assert_eq!(b.unwrap(), 2);
	}
}
