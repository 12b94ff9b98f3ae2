//! Configuration management
//!
//! Configuration comes from `sprintdeck.toml` with `${VAR}` substitution and
//! `SPRINTDECK_*` environment overrides. Credentials are held in
//! [`SecretString`]s that zero their memory on drop.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CacheSettings, ExportConfig, LoggingConfig, SprintdeckConfig, TrackerConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
