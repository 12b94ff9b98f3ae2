//! Configuration schema
//!
//! The typed shape of `sprintdeck.toml`. Each section validates itself;
//! `validate()` on the root walks all of them, and the pipeline-facing
//! sections convert into their runtime config structs.

use crate::config::SecretString;
use crate::core::cache::{CacheConfig, EvictionStrategy};
use crate::core::export::{OrchestratorConfig, RetryPolicy};
use crate::core::quality::QualityGateConfig;
use crate::domain::options::{ExportFormat, QualityTier};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Root of `sprintdeck.toml`
///
/// Only `[tracker]` is required; every other section has workable defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprintdeckConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Issue tracker connection
    pub tracker: TrackerConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Result cache settings
    #[serde(default)]
    pub cache: CacheSettings,

    /// Quality gate thresholds
    #[serde(default)]
    pub quality: QualityGateConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl SprintdeckConfig {
    /// Walk every section's validation
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range or malformed value found.
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.tracker.validate()?;
        self.export.validate()?;
        self.cache.validate()?;
        self.quality_validate()?;
        self.logging.validate()?;
        Ok(())
    }

    fn quality_validate(&self) -> Result<(), String> {
        let q = &self.quality;
        if q.critical_weight <= 0.0 || q.warning_weight <= 0.0 || q.info_weight <= 0.0 {
            return Err("quality weights must all be positive".to_string());
        }
        if !(0.0..=100.0).contains(&q.pass_threshold) {
            return Err(format!(
                "quality.pass_threshold must be in 0..=100, got {}",
                q.pass_threshold
            ));
        }
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory exported artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_dir: default_output_dir(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => {
                return Err(format!(
                    "application.log_level '{other}' is not a level \
                     (trace, debug, info, warn, error)"
                ))
            }
        }
        if self.output_dir.is_empty() {
            return Err("application.output_dir cannot be empty".to_string());
        }
        Ok(())
    }
}

/// Issue tracker connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker REST API
    pub base_url: String,

    /// Vendor implementation (currently "jira")
    #[serde(default = "default_vendor")]
    pub vendor_type: String,

    /// Username for basic authentication
    #[serde(default)]
    pub username: Option<String>,

    /// API token; held in a [`SecretString`], zeroized on drop
    #[serde(default)]
    pub api_token: Option<SecretString>,

    /// Board whose sprints are reported on
    #[serde(default)]
    pub board_id: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TrackerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("tracker.base_url cannot be empty".to_string());
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!(
                "tracker.base_url must start with http:// or https://, got '{}'",
                self.base_url
            ));
        }
        url::Url::parse(&self.base_url)
            .map_err(|e| format!("tracker.base_url is not a valid URL: {e}"))?;
        if self.timeout_seconds == 0 {
            return Err("tracker.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Retry policy for recoverable render failures
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Wall-clock budget per render attempt, in seconds
    #[serde(default = "default_attempt_timeout_seconds")]
    pub attempt_timeout_seconds: u64,

    /// Format used when the CLI does not specify one
    #[serde(default = "default_format")]
    pub default_format: String,

    /// Quality tier used when the CLI does not specify one
    #[serde(default = "default_quality")]
    pub default_quality: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            retry: RetryPolicy::default(),
            attempt_timeout_seconds: default_attempt_timeout_seconds(),
            default_format: default_format(),
            default_quality: default_quality(),
        }
    }
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.retry.max_retries == 0 || self.retry.max_retries > 10 {
            return Err(format!(
                "export.retry.max_retries must be in 1..=10, got {}",
                self.retry.max_retries
            ));
        }
        if self.retry.backoff_multiplier < 1.0 {
            return Err(format!(
                "export.retry.backoff_multiplier must be at least 1.0, got {}",
                self.retry.backoff_multiplier
            ));
        }
        if self.attempt_timeout_seconds == 0 {
            return Err("export.attempt_timeout_seconds must be greater than zero".to_string());
        }
        ExportFormat::from_str(&self.default_format)
            .map_err(|e| format!("export.default_format: {e}"))?;
        QualityTier::from_str(&self.default_quality)
            .map_err(|e| format!("export.default_quality: {e}"))?;
        Ok(())
    }

    /// Orchestrator configuration derived from this section
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            retry: self.retry.clone(),
            attempt_timeout: Duration::from_secs(self.attempt_timeout_seconds),
        }
    }
}

/// Result cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Entry time-to-live in hours
    #[serde(default = "default_ttl_hours")]
    pub ttl_hours: u64,

    /// Total byte budget in megabytes
    #[serde(default = "default_max_size_mb")]
    pub max_size_mb: u64,

    /// Maximum number of entries
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Eviction strategy (lru, fifo, adaptive)
    #[serde(default = "default_strategy")]
    pub strategy: String,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_hours: default_ttl_hours(),
            max_size_mb: default_max_size_mb(),
            max_entries: default_max_entries(),
            strategy: default_strategy(),
        }
    }
}

impl CacheSettings {
    fn validate(&self) -> Result<(), String> {
        if self.ttl_hours == 0 {
            return Err("cache.ttl_hours must be greater than zero".to_string());
        }
        if self.max_size_mb == 0 {
            return Err("cache.max_size_mb must be greater than zero".to_string());
        }
        if self.max_entries == 0 {
            return Err("cache.max_entries must be greater than zero".to_string());
        }
        EvictionStrategy::from_str(&self.strategy).map_err(|e| format!("cache.strategy: {e}"))?;
        Ok(())
    }

    /// Cache configuration derived from this section
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_secs(self.ttl_hours * 60 * 60),
            max_bytes: self.max_size_mb * 1024 * 1024,
            max_entries: self.max_entries,
        }
    }

    /// Parsed eviction strategy
    pub fn eviction_strategy(&self) -> EvictionStrategy {
        EvictionStrategy::from_str(&self.strategy).unwrap_or_default()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Write JSON logs to a rolling file
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Rotation cadence (daily, hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when logging.local_enabled".to_string());
        }
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_output_dir() -> String {
    ".".to_string()
}

fn default_vendor() -> String {
    "jira".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_attempt_timeout_seconds() -> u64 {
    30
}

fn default_format() -> String {
    "pdf".to_string()
}

fn default_quality() -> String {
    "medium".to_string()
}

fn default_ttl_hours() -> u64 {
    24
}

fn default_max_size_mb() -> u64 {
    100
}

fn default_max_entries() -> usize {
    50
}

fn default_strategy() -> String {
    "lru".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
