//! Init command implementation
//!
//! Writes a commented sample configuration file.

use clap::Args;
use std::path::Path;

const SAMPLE_CONFIG: &str = r#"# Sprintdeck configuration

[application]
log_level = "info"
output_dir = "reports"

[tracker]
base_url = "https://your-domain.atlassian.net"
vendor_type = "jira"
username = "reporter@example.com"
# Keep the token out of the file; it is substituted from the environment
api_token = "${SPRINTDECK_API_TOKEN}"
board_id = "1"
timeout_seconds = 30

[export]
default_format = "pdf"
default_quality = "medium"
attempt_timeout_seconds = 30

[export.retry]
max_retries = 3
base_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

[cache]
ttl_hours = 24
max_size_mb = 100
max_entries = 50
strategy = "lru"

[quality]
pass_threshold = 80.0

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,

    /// Target path for the configuration file
    #[arg(long, default_value = "sprintdeck.toml")]
    pub path: String,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        let path = Path::new(&self.path);

        if path.exists() && !self.force {
            eprintln!(
                "{} already exists; pass --force to overwrite",
                path.display()
            );
            return Ok(2);
        }

        tokio::fs::write(path, SAMPLE_CONFIG).await?;
        println!("Wrote sample configuration to {}", path.display());
        println!("Set SPRINTDECK_API_TOKEN in your environment before exporting.");
        Ok(0)
    }
}
