//! In-process result cache
//!
//! Maps (presentation, options) fingerprints to previously produced export
//! results. Bounded by TTL, byte budget, and entry count; eviction order is
//! delegated to the configured [`EvictionStrategy`]. All entry bookkeeping
//! happens under one async mutex so concurrent exports cannot lose updates.

use crate::core::cache::entry::{CacheEntry, PresentationSnapshot};
use crate::core::cache::strategy::EvictionStrategy;
use crate::domain::artifact::ExportResult;
use crate::domain::errors::SprintdeckError;
use crate::domain::options::ExportOptions;
use crate::domain::presentation::Presentation;
use crate::domain::Result;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Number of recent utilization samples kept for the adaptive strategy
const PRESSURE_SAMPLE_WINDOW: usize = 16;

/// Cache sizing and expiry configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Time-to-live for entries
    pub ttl: Duration,

    /// Total byte budget
    pub max_bytes: u64,

    /// Maximum number of entries
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_bytes: 100 * 1024 * 1024,
            max_entries: 50,
        }
    }
}

/// Cumulative cache statistics
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CacheStats {
    /// Lookups served from the cache
    pub hits: u64,

    /// Lookups that found nothing (or an expired entry)
    pub misses: u64,

    /// Entries removed under capacity pressure
    pub evictions: u64,

    /// Entries removed because their TTL elapsed
    pub expirations: u64,

    /// Live entries at sample time
    pub entry_count: usize,

    /// Live bytes at sample time
    pub total_bytes: u64,
}

impl CacheStats {
    /// Hit rate over the cache's lifetime, in [0, 1]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            return 0.0;
        }
        self.hits as f64 / total as f64
    }
}

struct CacheInner {
    entries: HashMap<String, CacheEntry>,
    strategy: EvictionStrategy,
    insert_seq: u64,
    hits: u64,
    misses: u64,
    evictions: u64,
    expirations: u64,
    pressure_samples: VecDeque<f64>,
}

impl CacheInner {
    fn total_bytes(&self) -> u64 {
        self.entries.values().map(|entry| entry.size_bytes).sum()
    }

    fn average_pressure(&self) -> f64 {
        if self.pressure_samples.is_empty() {
            return 0.0;
        }
        self.pressure_samples.iter().sum::<f64>() / self.pressure_samples.len() as f64
    }

    fn record_pressure(&mut self, max_bytes: u64) {
        let utilization = if max_bytes == 0 {
            1.0
        } else {
            self.total_bytes() as f64 / max_bytes as f64
        };
        self.pressure_samples.push_back(utilization.min(1.0));
        while self.pressure_samples.len() > PRESSURE_SAMPLE_WINDOW {
            self.pressure_samples.pop_front();
        }
    }

    fn remove_expired(&mut self, ttl: Duration) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(ttl))
            .map(|(key, _)| key.clone())
            .collect();
        for key in &expired {
            self.entries.remove(key);
        }
        self.expirations += expired.len() as u64;
        expired.len()
    }
}

/// In-process, fingerprint-keyed export result cache
///
/// # Examples
///
/// ```
/// use sprintdeck::core::cache::{CacheConfig, ResultCache};
///
/// # async fn example() {
/// let cache = ResultCache::new(CacheConfig::default());
/// assert!(cache.get("missing").await.is_none());
/// # }
/// ```
pub struct ResultCache {
    config: CacheConfig,
    inner: Mutex<CacheInner>,
}

impl ResultCache {
    /// Creates a cache with the default LRU strategy
    pub fn new(config: CacheConfig) -> Self {
        Self::with_strategy(config, EvictionStrategy::default())
    }

    /// Creates a cache with an explicit eviction strategy
    pub fn with_strategy(config: CacheConfig, strategy: EvictionStrategy) -> Self {
        Self {
            config,
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                strategy,
                insert_seq: 0,
                hits: 0,
                misses: 0,
                evictions: 0,
                expirations: 0,
                pressure_samples: VecDeque::new(),
            }),
        }
    }

    /// Look up a stored result, counting a hit or miss
    ///
    /// An entry past its TTL is removed lazily and reported as a miss.
    pub async fn get(&self, key: &str) -> Option<ExportResult> {
        let mut inner = self.inner.lock().await;
        let ttl = self.config.ttl;

        match inner.entries.get(key).map(|entry| entry.is_expired(ttl)) {
            None => {
                inner.misses += 1;
                None
            }
            Some(true) => {
                inner.entries.remove(key);
                inner.expirations += 1;
                inner.misses += 1;
                tracing::debug!(key = key, "Cache entry expired on access");
                None
            }
            Some(false) => {
                inner.hits += 1;
                let entry = inner.entries.get_mut(key).expect("entry present");
                entry.touch();
                let access_count = entry.access_count;
                let result = entry.result.clone();
                tracing::debug!(key = key, access_count = access_count, "Cache hit");
                Some(result)
            }
        }
    }

    /// Store a result under its fingerprint
    ///
    /// Evicts entries (strategy order) until the new entry fits within the
    /// byte and entry budgets.
    ///
    /// # Errors
    ///
    /// Returns a cache error if the entry alone exceeds the byte budget.
    pub async fn set(
        &self,
        key: &str,
        result: ExportResult,
        presentation: &Presentation,
        options: &ExportOptions,
    ) -> Result<()> {
        let size = result.size_bytes;
        if size > self.config.max_bytes {
            return Err(SprintdeckError::Cache(format!(
                "Entry of {size} bytes exceeds the cache budget of {} bytes",
                self.config.max_bytes
            )));
        }

        let mut inner = self.inner.lock().await;
        inner.remove_expired(self.config.ttl);

        // Replacing an existing entry frees its bytes first
        inner.entries.remove(key);

        let pressure = inner.average_pressure();
        while inner.entries.len() + 1 > self.config.max_entries
            || inner.total_bytes() + size > self.config.max_bytes
        {
            let order = inner.strategy.eviction_order(&inner.entries, pressure);
            let Some(victim) = order.into_iter().next() else {
                break;
            };
            inner.entries.remove(&victim);
            inner.evictions += 1;
            tracing::debug!(key = %victim, "Evicted cache entry under capacity pressure");
        }

        inner.insert_seq += 1;
        let seq = inner.insert_seq;
        let entry = CacheEntry::new(
            result,
            key.to_string(),
            PresentationSnapshot::capture(presentation),
            options.clone(),
            seq,
        );
        inner.entries.insert(key.to_string(), entry);
        inner.record_pressure(self.config.max_bytes);

        tracing::debug!(
            key = key,
            size_bytes = size,
            entry_count = inner.entries.len(),
            "Stored export result in cache"
        );
        Ok(())
    }

    /// Whether a live (non-expired) entry exists for the key
    ///
    /// Does not count towards hit/miss statistics or touch the entry.
    pub async fn has(&self, key: &str) -> bool {
        let inner = self.inner.lock().await;
        inner
            .entries
            .get(key)
            .map(|entry| !entry.is_expired(self.config.ttl))
            .unwrap_or(false)
    }

    /// Remove an entry, returning whether it existed
    pub async fn delete(&self, key: &str) -> bool {
        let mut inner = self.inner.lock().await;
        inner.entries.remove(key).is_some()
    }

    /// Remove all entries
    pub async fn clear(&self) {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
    }

    /// Proactive sweep: drop expired entries and re-enforce budgets
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup(&self) -> usize {
        let mut inner = self.inner.lock().await;
        let mut removed = inner.remove_expired(self.config.ttl);

        let pressure = inner.average_pressure();
        while inner.entries.len() > self.config.max_entries
            || inner.total_bytes() > self.config.max_bytes
        {
            let order = inner.strategy.eviction_order(&inner.entries, pressure);
            let Some(victim) = order.into_iter().next() else {
                break;
            };
            inner.entries.remove(&victim);
            inner.evictions += 1;
            removed += 1;
        }

        if removed > 0 {
            tracing::info!(removed = removed, "Cache cleanup removed entries");
        }
        removed
    }

    /// Spawn a background task that sweeps the cache on an interval
    ///
    /// Complements the lazy on-access expiry. The task runs until the
    /// returned handle is aborted or the runtime shuts down.
    pub fn spawn_cleanup(self: &Arc<Self>, every: Duration) -> tokio::task::JoinHandle<()> {
        let cache = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                cache.cleanup().await;
            }
        })
    }

    /// Swap the eviction strategy without touching stored entries
    pub async fn set_strategy(&self, strategy: EvictionStrategy) {
        let mut inner = self.inner.lock().await;
        tracing::info!(
            from = %inner.strategy,
            to = %strategy,
            "Switching cache eviction strategy"
        );
        inner.strategy = strategy;
    }

    /// Current eviction strategy
    pub async fn strategy(&self) -> EvictionStrategy {
        self.inner.lock().await.strategy
    }

    /// Cumulative statistics snapshot
    pub async fn stats(&self) -> CacheStats {
        let inner = self.inner.lock().await;
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            expirations: inner.expirations,
            entry_count: inner.entries.len(),
            total_bytes: inner.total_bytes(),
        }
    }
}
