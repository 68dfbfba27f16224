//! Shared result cache for remote choice lists.
//!
//! Keyed by request fingerprint. Entries are never evicted: fingerprints are
//! bounded by how many distinct choice sources a survey configures, not by
//! traffic. One cache is meant to be shared (behind an `Arc`) by every
//! resolver in the process; tests create their own.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::trace;

use survey_types::ChoiceItem;

use crate::metrics::CacheMetrics;

#[derive(Debug, Default)]
pub struct ChoicesCache {
    entries: RwLock<HashMap<String, Vec<ChoiceItem>>>,
    metrics: CacheMetrics,
}

impl ChoicesCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached list for `fingerprint`; counts a hit or a miss.
    pub fn get(&self, fingerprint: &str) -> Option<Vec<ChoiceItem>> {
        let found = self.entries.read().get(fingerprint).cloned();
        match found {
            Some(items) => {
                self.metrics.record_hit();
                Some(items)
            }
            None => {
                self.metrics.record_miss();
                None
            }
        }
    }

    /// Store `items`, replacing any previous entry (last writer wins).
    pub fn put(&self, fingerprint: &str, items: Vec<ChoiceItem>) {
        trace!(items = items.len(), "caching choices");
        self.entries.write().insert(fingerprint.to_string(), items);
    }

    pub fn contains(&self, fingerprint: &str) -> bool {
        self.entries.read().contains_key(fingerprint)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn metrics(&self) -> &CacheMetrics {
        &self.metrics
    }
}
