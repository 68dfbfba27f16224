//! Counters for the shared choices cache and the requests behind it.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Resolver/cache counters (thread-safe, cheap to clone).
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    /// Runs answered from the cache
    pub hits: Arc<AtomicU64>,
    /// Cache lookups that found nothing
    pub misses: Arc<AtomicU64>,
    /// Requests sent to the transport
    pub requests: Arc<AtomicU64>,
    /// Requests that failed or returned no usable list
    pub failures: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            requests: self.requests.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters.
    pub fn reset(&self) {
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
        self.requests.store(0, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }
}

/// Snapshot of metrics (for reporting).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub hits: u64,
    pub misses: u64,
    pub requests: u64,
    pub failures: u64,
}

impl MetricsSnapshot {
    pub fn total_lookups(&self) -> u64 {
        self.hits + self.misses
    }

    pub fn hit_rate(&self) -> f64 {
        let total = self.total_lookups();
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }

    /// Format a human-readable report.
    pub fn format_report(&self) -> String {
        let mut lines = Vec::new();
        lines.push("Choices Cache Report".to_string());
        lines.push("=".repeat(40));
        lines.push(format!("  Hits:            {}", self.hits));
        lines.push(format!("  Misses:          {}", self.misses));
        lines.push(format!("  Hit Rate:        {:.1}%", self.hit_rate() * 100.0));
        lines.push(format!("  Requests:        {}", self.requests));
        lines.push(format!("  Failures:        {}", self.failures));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_and_snapshot() {
        let metrics = CacheMetrics::default();
        let shared = metrics.clone();
        metrics.record_hit();
        metrics.record_hit();
        shared.record_miss();
        shared.record_request();
        shared.record_failure();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.total_lookups(), 3);
        assert!((snapshot.hit_rate() - 2.0 / 3.0).abs() < 1e-9);
        assert!(snapshot.format_report().contains("Failures:        1"));

        metrics.reset();
        assert_eq!(metrics.snapshot().hit_rate(), 0.0);
    }
}
