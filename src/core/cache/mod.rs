//! Fingerprint-keyed export result cache
//!
//! This module provides the in-process cache the export orchestrator consults
//! before invoking a renderer:
//!
//! - [`ResultCache`] - bounded store with TTL expiry and capacity eviction
//! - [`CacheEntry`] - stored result plus access bookkeeping
//! - [`EvictionStrategy`] - pluggable eviction ordering (LRU/FIFO/adaptive)

pub mod entry;
pub mod store;
pub mod strategy;

pub use entry::{CacheEntry, PresentationSnapshot};
pub use store::{CacheConfig, CacheStats, ResultCache};
pub use strategy::EvictionStrategy;
