//! Validate-config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Print the effective configuration after validation
    #[arg(long)]
    pub show: bool,
}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(path = config_path, "Validating configuration");

        match load_config(config_path) {
            Ok(config) => {
                println!("Configuration is valid: {config_path}");
                if self.show {
                    println!("  tracker.base_url: {}", config.tracker.base_url);
                    println!("  tracker.vendor_type: {}", config.tracker.vendor_type);
                    println!("  export.default_format: {}", config.export.default_format);
                    println!(
                        "  export.retry.max_retries: {}",
                        config.export.retry.max_retries
                    );
                    println!("  cache.strategy: {}", config.cache.strategy);
                    println!("  quality.pass_threshold: {}", config.quality.pass_threshold);
                }
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Configuration validation failed");
                eprintln!("Configuration validation failed: {e}");
                Ok(2)
            }
        }
    }
}
