use log::{debug, warn};
use std::sync::Arc;

use crate::cache::SuggestionCache;
use crate::fetcher::SuggestionFetcher;
use crate::metrics::RelayMetrics;
use crate::models::{Prefix, SuggestionList};

/// Default minimum prefix length (in chars) before upstream is consulted
pub const DEFAULT_MIN_PREFIX_LEN: usize = 2;

/// Cache-fronted suggestion lookup behind `/api/suggestions`
#[derive(Debug, Clone)]
pub struct SuggestionService {
    fetcher: SuggestionFetcher,
    cache: SuggestionCache,
    metrics: Arc<RelayMetrics>,
    min_prefix_len: usize,
}

impl SuggestionService {
    pub fn new(
        fetcher: SuggestionFetcher,
        cache: SuggestionCache,
        metrics: Arc<RelayMetrics>,
        min_prefix_len: usize,
    ) -> Self {
        Self {
            fetcher,
            cache,
            metrics,
            min_prefix_len,
        }
    }

    pub fn cache(&self) -> &SuggestionCache {
        &self.cache
    }

    pub fn metrics(&self) -> &Arc<RelayMetrics> {
        &self.metrics
    }

    /// Suggestions for a raw query value. Never fails: short prefixes and
    /// upstream failures both yield an empty list, and only non-empty
    /// results are cached.
    pub async fn suggestions(&self, raw_prefix: Option<&str>) -> SuggestionList {
        self.metrics.record_request();

        let Some(prefix) = Prefix::parse(raw_prefix, self.min_prefix_len) else {
            debug!("Ignoring prefix shorter than {} chars", self.min_prefix_len);
            self.metrics.record_rejected_prefix();
            return Vec::new();
        };

        if let Some(cached) = self.cache.get(prefix.as_str()).await {
            debug!("Cache hit for {:?} ({} suggestions)", prefix.as_str(), cached.len());
            self.metrics.record_cache_hit();
            return cached;
        }

        debug!("Cache miss for {:?}", prefix.as_str());
        self.metrics.record_cache_miss();

        match self.fetcher.fetch(&prefix).await {
            Ok(suggestions) if suggestions.is_empty() => {
                debug!("No suggestions for {:?}", prefix.as_str());
                self.metrics.record_empty_result();
                suggestions
            }
            Ok(suggestions) => {
                self.cache.put(prefix.as_str(), suggestions.clone()).await;
                suggestions
            }
            Err(e) => {
                warn!("Error fetching suggestions for {:?}: {}", prefix.as_str(), e);
                self.metrics.record_fetch_failure();
                Vec::new()
            }
        }
    }
}
