use std::borrow::Borrow;
use std::collections::{HashMap, VecDeque};
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::models::SuggestionList;

/// Generic cache with a fixed TTL and a maximum entry count.
///
/// Age is measured from insertion; reads never extend it. When full, expired
/// entries are purged first and then the oldest-inserted entry is evicted.
#[derive(Debug)]
pub struct Cache<K, V> {
    data: HashMap<K, (V, Instant)>,
    order: VecDeque<K>,
    ttl: Duration,
    capacity: usize,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            data: HashMap::new(),
            order: VecDeque::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.data.get(key).and_then(|(value, timestamp)| {
            if timestamp.elapsed() < self.ttl {
                Some(value.clone())
            } else {
                None
            }
        })
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.data.contains_key(&key) {
            self.order.retain(|k| k != &key);
        } else if self.data.len() >= self.capacity {
            self.purge_expired();
            while self.data.len() >= self.capacity {
                match self.order.pop_front() {
                    Some(oldest) => {
                        self.data.remove(&oldest);
                    }
                    None => break,
                }
            }
        }

        self.order.push_back(key.clone());
        self.data.insert(key, (value, Instant::now()));
    }

    /// Drop every entry whose TTL has elapsed. Returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let ttl = self.ttl;
        let before = self.data.len();
        self.data.retain(|_, (_, timestamp)| timestamp.elapsed() < ttl);
        let data = &self.data;
        self.order.retain(|k| data.contains_key(k));
        before - self.data.len()
    }

    /// Stored entries, including ones that expired but were not purged yet
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Prefix -> suggestions cache shared between request handlers
#[derive(Debug, Clone)]
pub struct SuggestionCache {
    inner: Arc<RwLock<Cache<String, SuggestionList>>>,
}

impl SuggestionCache {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Cache::new(ttl, capacity))),
        }
    }

    pub async fn get(&self, prefix: &str) -> Option<SuggestionList> {
        self.inner.read().await.get(prefix)
    }

    /// Store a resolved list. Empty lists are ignored so the next request retries upstream.
    pub async fn put(&self, prefix: &str, suggestions: SuggestionList) {
        if suggestions.is_empty() {
            return;
        }
        self.inner.write().await.insert(prefix.to_string(), suggestions);
    }

    pub async fn purge_expired(&self) -> usize {
        self.inner.write().await.purge_expired()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test(start_paused = true)]
    async fn test_entry_expires_after_ttl() {
        let mut cache = Cache::new(HOUR, 10);
        cache.insert("ap", 1);
        assert_eq!(cache.get(&"ap"), Some(1));

        tokio::time::advance(Duration::from_secs(3599)).await;
        assert_eq!(cache.get(&"ap"), Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"ap"), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reads_do_not_extend_ttl() {
        let mut cache = Cache::new(Duration::from_secs(10), 10);
        cache.insert("ca", 1);
        for _ in 0..9 {
            tokio::time::advance(Duration::from_secs(1)).await;
            assert!(cache.get(&"ca").is_some());
        }
        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(cache.get(&"ca").is_none());
    }

    #[test]
    fn test_evicts_oldest_when_full() {
        let mut cache = Cache::new(HOUR, 3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("c", 3);
        cache.insert("d", 4);

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.get(&"a"), None);
        assert_eq!(cache.get(&"d"), Some(4));
    }

    #[test]
    fn test_reinsert_refreshes_position() {
        let mut cache = Cache::new(HOUR, 2);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.insert("a", 10);
        cache.insert("c", 3);

        assert_eq!(cache.get(&"a"), Some(10));
        assert_eq!(cache.get(&"b"), None);
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entries_purged_before_eviction() {
        let mut cache = Cache::new(Duration::from_secs(5), 2);
        cache.insert("old", 1);
        tokio::time::advance(Duration::from_secs(3)).await;
        cache.insert("fresh", 2);
        tokio::time::advance(Duration::from_secs(3)).await;

        cache.insert("new", 3);
        assert_eq!(cache.get(&"fresh"), Some(2));
        assert_eq!(cache.get(&"new"), Some(3));
        assert_eq!(cache.len(), 2);
    }

    #[tokio::test]
    async fn test_suggestion_cache_skips_empty_lists() {
        let cache = SuggestionCache::new(HOUR, 10);
        cache.put("xy", Vec::new()).await;
        assert!(cache.is_empty().await);
        assert_eq!(cache.get("xy").await, None);

        cache.put("ap", vec!["apple".to_string()]).await;
        assert_eq!(cache.get("ap").await, Some(vec!["apple".to_string()]));
        assert_eq!(cache.len().await, 1);
    }
}
