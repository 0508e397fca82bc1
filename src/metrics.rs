use log::info;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Request counters shared by every handler
#[derive(Debug)]
pub struct RelayMetrics {
    started: Instant,
    requests: AtomicU64,
    rejected_prefixes: AtomicU64,
    cache_hits: AtomicU64,
    cache_misses: AtomicU64,
    fetch_failures: AtomicU64,
    empty_results: AtomicU64,
}

/// Point-in-time copy of [`RelayMetrics`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub requests: u64,
    pub rejected_prefixes: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub fetch_failures: u64,
    pub empty_results: u64,
}

impl MetricsSnapshot {
    /// Share of cache lookups that hit, in percent
    pub fn hit_rate(&self) -> f64 {
        let lookups = self.cache_hits + self.cache_misses;
        if lookups == 0 {
            0.0
        } else {
            self.cache_hits as f64 * 100.0 / lookups as f64
        }
    }
}

impl Default for RelayMetrics {
    fn default() -> Self {
        Self {
            started: Instant::now(),
            requests: AtomicU64::new(0),
            rejected_prefixes: AtomicU64::new(0),
            cache_hits: AtomicU64::new(0),
            cache_misses: AtomicU64::new(0),
            fetch_failures: AtomicU64::new(0),
            empty_results: AtomicU64::new(0),
        }
    }
}

impl RelayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejected_prefix(&self) {
        self.rejected_prefixes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_cache_miss(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failure(&self) {
        self.fetch_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_result(&self) {
        self.empty_results.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            rejected_prefixes: self.rejected_prefixes.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            fetch_failures: self.fetch_failures.load(Ordering::Relaxed),
            empty_results: self.empty_results.load(Ordering::Relaxed),
        }
    }

    pub fn log_summary(&self, cached_entries: usize) {
        let snapshot = self.snapshot();
        info!("Relay Summary (uptime {}s):", self.started.elapsed().as_secs());
        info!("  Requests:          {}", snapshot.requests);
        info!("  Rejected Prefixes: {}", snapshot.rejected_prefixes);
        info!(
            "  Cache:             {} hits, {} misses ({:.1}% hit rate), {} entries",
            snapshot.cache_hits,
            snapshot.cache_misses,
            snapshot.hit_rate(),
            cached_entries
        );
        info!(
            "  Upstream:          {} failures, {} empty results",
            snapshot.fetch_failures, snapshot.empty_results
        );
    }
}
