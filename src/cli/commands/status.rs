//! Status command implementation
//!
//! Shows the effective pipeline configuration and probes tracker
//! connectivity.

use crate::adapters::renderers::RendererRegistry;
use crate::adapters::tracker::TrackerClient;
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Skip the tracker connectivity probe
    #[arg(long)]
    pub offline: bool,
}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let registry = RendererRegistry::with_default_renderers();
        let mut formats: Vec<String> = registry
            .formats()
            .iter()
            .map(|format| format.to_string())
            .collect();
        formats.sort();

        println!("Sprintdeck status");
        println!("  Registered formats: {}", formats.join(", "));
        println!(
            "  Cache: {} MB / {} entries / {}h TTL / {} eviction",
            config.cache.max_size_mb,
            config.cache.max_entries,
            config.cache.ttl_hours,
            config.cache.strategy
        );
        println!(
            "  Retry: {} attempts, base {} ms, multiplier {}",
            config.export.retry.max_retries,
            config.export.retry.base_delay_ms,
            config.export.retry.backoff_multiplier
        );
        println!(
            "  Quality gate: pass threshold {}",
            config.quality.pass_threshold
        );

        if self.offline {
            println!("  Tracker: skipped (--offline)");
            return Ok(0);
        }

        let tracker = TrackerClient::new(config.tracker.clone())?;
        match tracker.health_check().await {
            Ok(()) => {
                println!("  Tracker: reachable at {}", config.tracker.base_url);
                Ok(0)
            }
            Err(e) => {
                println!("  Tracker: UNREACHABLE ({e})");
                Ok(1)
            }
        }
    }
}
