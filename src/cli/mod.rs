//! Command-line interface
//!
//! clap derive definitions for the `sprintdeck` binary. Each subcommand's
//! behavior lives in [`commands`]; this module only parses.

pub mod commands;

use clap::{Parser, Subcommand};

/// Sprintdeck - Sprint report export tool
#[derive(Parser, Debug)]
#[command(name = "sprintdeck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "sprintdeck.toml", env = "SPRINTDECK_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SPRINTDECK_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a sprint report in the requested format
    Export(commands::export::ExportArgs),

    /// Validate the configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Show pipeline configuration and tracker connectivity
    Status(commands::status::StatusArgs),

    /// Write a sample configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_subcommand_selection() {
        let cli = Cli::parse_from(["sprintdeck", "export"]);
        assert_eq!(cli.config, "sprintdeck.toml");
        assert!(cli.log_level.is_none());
        assert!(matches!(cli.command, Commands::Export(_)));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "sprintdeck",
            "--config",
            "custom.toml",
            "--log-level",
            "debug",
            "status",
        ]);
        assert_eq!(cli.config, "custom.toml");
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert!(matches!(cli.command, Commands::Status(_)));
    }

    #[test]
    fn test_export_flags_reach_args() {
        let cli = Cli::parse_from(["sprintdeck", "export", "--format", "markdown", "--no-images"]);
        let Commands::Export(args) = cli.command else {
            panic!("expected export");
        };
        assert_eq!(args.format.as_deref(), Some("markdown"));
        assert!(args.no_images);
    }

    #[test]
    fn test_each_subcommand_parses() {
        for name in ["export", "validate-config", "status", "init"] {
            assert!(Cli::try_parse_from(["sprintdeck", name]).is_ok(), "{name}");
        }
    }
}
