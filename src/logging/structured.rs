//! Tracing subscriber setup
//!
//! Console output is always on; a JSON rolling-file layer is added when the
//! configuration enables it. The returned [`LoggingGuard`] owns the file
//! writer's background worker and must outlive all logging.

use crate::config::LoggingConfig;
use crate::domain::{Result, SprintdeckError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

const VALID_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Keeps the non-blocking file writer flushing until dropped
#[derive(Debug)]
pub struct LoggingGuard(Option<WorkerGuard>);

/// Install the global tracing subscriber
///
/// `level` applies to this crate's spans unless `RUST_LOG` overrides the
/// filter entirely.
///
/// # Errors
///
/// Fails on an unknown level name, or when the log directory for the file
/// layer cannot be created.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let level = level.to_lowercase();
    if !VALID_LEVELS.contains(&level.as_str()) {
        return Err(SprintdeckError::Configuration(format!(
            "Invalid log level '{level}'. Must be one of: {}",
            VALID_LEVELS.join(", ")
        )));
    }

    let console = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_filter(crate_filter(&level));

    // Boxed so the file layer can be absent without changing the stack type
    let mut layers: Vec<BoxedLayer> = vec![console.boxed()];
    let guard = match file_layer(config, &level)? {
        Some((layer, guard)) => {
            layers.push(layer);
            Some(guard)
        }
        None => None,
    };

    tracing_subscriber::registry().with(layers).init();

    tracing::debug!(
        level = %level,
        file_logging = config.local_enabled,
        "Logging initialized"
    );
    Ok(LoggingGuard(guard))
}

type BoxedLayer = Box<dyn Layer<tracing_subscriber::Registry> + Send + Sync>;

/// This crate's spans at `level`, unless `RUST_LOG` takes over
fn crate_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("sprintdeck={level}")))
}

/// JSON rolling-file layer, when enabled
fn file_layer(config: &LoggingConfig, level: &str) -> Result<Option<(BoxedLayer, WorkerGuard)>> {
    if !config.local_enabled {
        return Ok(None);
    }

    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        SprintdeckError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let rotation = match config.local_rotation.as_str() {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    };
    let appender = RollingFileAppender::new(rotation, &config.local_path, "sprintdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_target(true)
        .with_writer(writer)
        .with_filter(crate_filter(level))
        .boxed();
    Ok(Some((layer, guard)))
}
