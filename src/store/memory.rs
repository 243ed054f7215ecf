use crate::core::cache::Cache;
use async_trait::async_trait;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

struct CacheValue<V> {
    value: V,
    expires_at: Option<Instant>,
}

impl<V> CacheValue<V> {
    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expiry| expiry <= now)
    }
}

/// In-memory cache backed by a HashMap behind an async mutex
pub struct MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    inner: Arc<Mutex<HashMap<K, CacheValue<V>>>>,
}

impl<K, V> MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K, V> Default for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync,
    V: Clone + Send + Sync,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K, V> Cache<K, V> for MemoryCache<K, V>
where
    K: Eq + Hash + Send + Sync + std::fmt::Debug + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Option<V> {
        let mut cache = self.inner.lock().await;
        match cache.get(key) {
            Some(entry) if entry.is_expired(Instant::now()) => {
                debug!("Cache entry expired for key: {:?}", key);
                cache.remove(key);
                None
            }
            Some(entry) => {
                debug!("Cache HIT for key: {:?}", key);
                Some(entry.value.clone())
            }
            None => {
                debug!("Cache MISS for key: {:?}", key);
                None
            }
        }
    }

    async fn put(&self, key: K, value: V, ttl: Option<Duration>) {
        let expires_at = ttl.map(|duration| Instant::now() + duration);
        let cache_value = CacheValue { value, expires_at };

        let mut cache = self.inner.lock().await;
        debug!("Cache PUT for key: {:?}", key);
        cache.insert(key, cache_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::sleep;

    #[tokio::test]
    async fn test_cache_get_put() {
        let cache = MemoryCache::<String, f64>::new();

        assert!(cache.get(&"USD-INR".to_string()).await.is_none());

        cache.put("USD-INR".to_string(), 83.25, None).await;
        assert_eq!(cache.get(&"USD-INR".to_string()).await, Some(83.25));

        assert!(cache.get(&"USD-EUR".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_ttl_expiration() {
        let cache = MemoryCache::<String, f64>::new();

        cache
            .put("USD-INR".to_string(), 83.25, Some(Duration::from_millis(10)))
            .await;
        assert_eq!(cache.get(&"USD-INR".to_string()).await, Some(83.25));

        sleep(Duration::from_millis(20)).await;
        assert!(cache.get(&"USD-INR".to_string()).await.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_expired_entry() {
        let cache = MemoryCache::<String, f64>::new();

        cache
            .put("USD-INR".to_string(), 82.0, Some(Duration::from_millis(5)))
            .await;
        sleep(Duration::from_millis(10)).await;
        cache.put("USD-INR".to_string(), 84.0, None).await;

        assert_eq!(cache.get(&"USD-INR".to_string()).await, Some(84.0));
    }
}
