use crate::core::cache::Cache;
use crate::core::currency::{CurrencyRateProvider, RateError};
use crate::store::MemoryCache;
use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::debug;

/// Memoizes successful rates for a fixed window. Failures are never cached,
/// so the next caller retries the inner provider.
pub struct CachingCurrencyRateProvider<T: CurrencyRateProvider> {
    inner: T,
    cache: MemoryCache<String, f64>,
    ttl: Duration,
    fetch_lock: Mutex<()>,
}

impl<T: CurrencyRateProvider> CachingCurrencyRateProvider<T> {
    pub fn new(inner: T, ttl: Duration) -> Self {
        Self {
            inner,
            cache: MemoryCache::new(),
            ttl,
            fetch_lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl<T: CurrencyRateProvider> CurrencyRateProvider for CachingCurrencyRateProvider<T> {
    async fn get_rate(&self, from: &str, to: &str) -> Result<f64, RateError> {
        let key = format!("{from}-{to}");
        if let Some(rate) = self.cache.get(&key).await {
            return Ok(rate);
        }

        // Concurrent misses wait here and pick up the first caller's result
        let _guard = self.fetch_lock.lock().await;
        if let Some(rate) = self.cache.get(&key).await {
            return Ok(rate);
        }

        debug!("Fetching currency rate for {} (ttl {:?})", key, self.ttl);
        let rate = self.inner.get_rate(from, to).await?;
        self.cache.put(key, rate, Some(self.ttl)).await;
        Ok(rate)
    }
}
