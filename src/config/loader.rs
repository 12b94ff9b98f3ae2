//! Configuration loading
//!
//! `sprintdeck.toml` is read, `${VAR}` placeholders are substituted from the
//! environment, `SPRINTDECK_*` variables override individual keys, and the
//! result is validated before anything uses it.

use super::schema::SprintdeckConfig;
use crate::config::secret_string;
use crate::domain::errors::SprintdeckError;
use crate::domain::result::Result;
use regex::{Captures, Regex};
use std::path::Path;

/// Load, substitute, override, and validate a configuration file
///
/// # Errors
///
/// Fails when the file is missing or unreadable, a `${VAR}` placeholder names
/// an unset variable, the TOML does not parse, or validation rejects a value.
///
/// ```no_run
/// let config = sprintdeck::config::load_config("sprintdeck.toml")?;
/// # Ok::<(), sprintdeck::domain::SprintdeckError>(())
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<SprintdeckConfig> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|e| {
        SprintdeckError::Configuration(format!("Cannot read {}: {e}", path.display()))
    })?;

    let substituted = substitute_env_vars(&raw)?;
    let mut config: SprintdeckConfig = toml::from_str(&substituted)
        .map_err(|e| SprintdeckError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        SprintdeckError::Configuration(format!("Configuration validation failed: {e}"))
    })?;
    Ok(config)
}

/// Replace `${VAR}` placeholders with environment values
///
/// Commented-out lines keep their placeholders. Every unresolvable variable
/// is collected so the error names all of them at once.
fn substitute_env_vars(input: &str) -> Result<String> {
    let placeholder = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern");
    let mut missing: Vec<String> = Vec::new();

    let lines: Vec<String> = input
        .lines()
        .map(|line| {
            if line.trim_start().starts_with('#') {
                return line.to_string();
            }
            placeholder
                .replace_all(line, |caps: &Captures<'_>| {
                    let name = &caps[1];
                    std::env::var(name).unwrap_or_else(|_| {
                        if !missing.iter().any(|m| m == name) {
                            missing.push(name.to_string());
                        }
                        caps[0].to_string()
                    })
                })
                .into_owned()
        })
        .collect();

    if !missing.is_empty() {
        return Err(SprintdeckError::Configuration(format!(
            "Missing required environment variables: {}",
            missing.join(", ")
        )));
    }
    Ok(lines.join("\n") + "\n")
}

fn env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Apply `SPRINTDECK_<SECTION>_<KEY>` overrides on top of the parsed file
fn apply_env_overrides(config: &mut SprintdeckConfig) {
    if let Some(v) = env("SPRINTDECK_APPLICATION_LOG_LEVEL") {
        config.application.log_level = v;
    }
    if let Some(v) = env("SPRINTDECK_APPLICATION_OUTPUT_DIR") {
        config.application.output_dir = v;
    }

    if let Some(v) = env("SPRINTDECK_TRACKER_BASE_URL") {
        config.tracker.base_url = v;
    }
    if let Some(v) = env("SPRINTDECK_TRACKER_USERNAME") {
        config.tracker.username = Some(v);
    }
    if let Some(v) = env("SPRINTDECK_TRACKER_API_TOKEN") {
        config.tracker.api_token = Some(secret_string(v));
    }
    if let Some(v) = env("SPRINTDECK_TRACKER_BOARD_ID") {
        config.tracker.board_id = Some(v);
    }
    if let Some(v) = env("SPRINTDECK_TRACKER_TIMEOUT_SECONDS").and_then(|v| v.parse().ok()) {
        config.tracker.timeout_seconds = v;
    }

    if let Some(v) = env("SPRINTDECK_EXPORT_MAX_RETRIES").and_then(|v| v.parse().ok()) {
        config.export.retry.max_retries = v;
    }
    if let Some(v) = env("SPRINTDECK_EXPORT_DEFAULT_FORMAT") {
        config.export.default_format = v;
    }
    if let Some(v) = env("SPRINTDECK_EXPORT_DEFAULT_QUALITY") {
        config.export.default_quality = v;
    }

    if let Some(v) = env("SPRINTDECK_CACHE_MAX_SIZE_MB").and_then(|v| v.parse().ok()) {
        config.cache.max_size_mb = v;
    }
    if let Some(v) = env("SPRINTDECK_CACHE_MAX_ENTRIES").and_then(|v| v.parse().ok()) {
        config.cache.max_entries = v;
    }
    if let Some(v) = env("SPRINTDECK_CACHE_STRATEGY") {
        config.cache.strategy = v;
    }

    if let Some(v) = env("SPRINTDECK_LOGGING_LOCAL_ENABLED").and_then(|v| v.parse().ok()) {
        config.logging.local_enabled = v;
    }
    if let Some(v) = env("SPRINTDECK_LOGGING_LOCAL_PATH") {
        config.logging.local_path = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_placeholder_substitution() {
        std::env::set_var("SPRINTDECK_TEST_VAR", "swapped-in");
        let out = substitute_env_vars("api_token = \"${SPRINTDECK_TEST_VAR}\"").unwrap();
        assert_eq!(out, "api_token = \"swapped-in\"\n");
        std::env::remove_var("SPRINTDECK_TEST_VAR");
    }

    #[test]
    fn test_all_missing_variables_reported() {
        std::env::remove_var("SPRINTDECK_MISSING_A");
        std::env::remove_var("SPRINTDECK_MISSING_B");
        let err = substitute_env_vars(
            "a = \"${SPRINTDECK_MISSING_A}\"\nb = \"${SPRINTDECK_MISSING_B}\"",
        )
        .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("SPRINTDECK_MISSING_A"));
        assert!(message.contains("SPRINTDECK_MISSING_B"));
    }

    #[test]
    fn test_commented_placeholders_left_alone() {
        std::env::remove_var("SPRINTDECK_COMMENTED");
        let out = substitute_env_vars("# token = \"${SPRINTDECK_COMMENTED}\"").unwrap();
        assert!(out.contains("${SPRINTDECK_COMMENTED}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        assert!(load_config("does-not-exist.toml").is_err());
    }

    #[test]
    fn test_load_config_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[tracker]
base_url = "https://jira.example.com"
username = "reporter"
api_token = "token-123"

[export]
default_format = "markdown"
"#
        )
        .unwrap();
        file.flush().unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.tracker.base_url, "https://jira.example.com");
        assert_eq!(config.export.default_format, "markdown");
    }

    #[test]
    fn test_load_config_rejects_invalid_url() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[tracker]\nbase_url = \"not-a-url\"\n").unwrap();
        file.flush().unwrap();

        assert!(load_config(file.path()).is_err());
    }
}
