//! Pluggable eviction strategies
//!
//! The strategy decides eviction *order*; the store decides *how many*
//! entries go. Strategies are stateless, so swapping one at runtime keeps all
//! existing entries intact.

use crate::core::cache::entry::CacheEntry;
use crate::domain::errors::SprintdeckError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Memory-pressure ratio above which the adaptive strategy behaves like LRU
const ADAPTIVE_PRESSURE_THRESHOLD: f64 = 0.75;

/// Eviction ordering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EvictionStrategy {
    /// Least-recently-accessed entries go first
    #[default]
    Lru,
    /// Oldest-inserted entries go first
    Fifo,
    /// LRU under memory pressure, FIFO otherwise
    Adaptive,
}

impl EvictionStrategy {
    /// Stable lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionStrategy::Lru => "lru",
            EvictionStrategy::Fifo => "fifo",
            EvictionStrategy::Adaptive => "adaptive",
        }
    }

    /// Keys in eviction order (first victim first)
    ///
    /// `pressure` is the recent average byte-budget utilization in [0, 1];
    /// only the adaptive strategy consults it.
    pub fn eviction_order(
        &self,
        entries: &HashMap<String, CacheEntry>,
        pressure: f64,
    ) -> Vec<String> {
        let effective = match self {
            EvictionStrategy::Lru => EvictionStrategy::Lru,
            EvictionStrategy::Fifo => EvictionStrategy::Fifo,
            EvictionStrategy::Adaptive => {
                if pressure >= ADAPTIVE_PRESSURE_THRESHOLD {
                    EvictionStrategy::Lru
                } else {
                    EvictionStrategy::Fifo
                }
            }
        };

        let mut keyed: Vec<(&String, &CacheEntry)> = entries.iter().collect();
        match effective {
            EvictionStrategy::Lru => {
                keyed.sort_by_key(|(_, entry)| entry.last_accessed);
            }
            // Fifo covers the adaptive low-pressure branch too
            _ => {
                keyed.sort_by_key(|(_, entry)| entry.insert_seq);
            }
        }
        keyed.into_iter().map(|(key, _)| key.clone()).collect()
    }
}

impl fmt::Display for EvictionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EvictionStrategy {
    type Err = SprintdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lru" => Ok(EvictionStrategy::Lru),
            "fifo" => Ok(EvictionStrategy::Fifo),
            "adaptive" => Ok(EvictionStrategy::Adaptive),
            other => Err(SprintdeckError::Configuration(format!(
                "Unknown eviction strategy '{other}'. Supported: lru, fifo, adaptive"
            ))),
        }
    }
}
