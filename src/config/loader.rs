//! Configuration file loading.
//!
//! ## Responsibility
//! Read a TOML file from disk, parse it into a [`DexConfig`], and run
//! validation before returning.
//!
//! ## Guarantees
//! - A successfully loaded config is always validated
//! - I/O errors and parse errors are distinguished in the error type
//! - File path is included in every error message
//!
//! ## NOT Responsible For
//! - Defining the config schema (that belongs to `mod.rs`)

use std::path::Path;

use super::validation::{self, ConfigError};
use super::DexConfig;

/// Load a [`DexConfig`] from a TOML file.
///
/// # Returns
///
/// - `Ok(DexConfig)` if the file is readable, well-formed, and valid.
/// - `Err(ConfigError::Io)` if the file cannot be read.
/// - `Err(ConfigError::Parse)` if the TOML is malformed.
/// - `Err(ConfigError::Validation)` if semantic constraints are violated.
///
/// # Example
///
/// ```rust,ignore
/// use dexstream::config::loader::load_from_file;
/// use std::path::Path;
///
/// let config = load_from_file(Path::new("dexstream.toml"))?;
/// println!("relay topic: {}", config.relay.topic);
/// ```
pub fn load_from_file(path: &Path) -> Result<DexConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        file: path.display().to_string(),
        source: e,
    })?;

    load_from_str(&content, &path.display().to_string())
}

/// Load a [`DexConfig`] from a TOML string.
///
/// # Returns
///
/// - `Ok(DexConfig)` if the TOML is well-formed and valid.
/// - `Err(ConfigError::Parse)` if the TOML is malformed.
/// - `Err(ConfigError::Validation)` if semantic constraints are violated.
pub fn load_from_str(content: &str, source_name: &str) -> Result<DexConfig, ConfigError> {
    let config: DexConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
        file: source_name.to_string(),
        source: e,
    })?;

    validate_joined(&config)?;
    Ok(config)
}

/// Resolve the effective configuration for a binary.
///
/// Loads `path` when given, otherwise starts from defaults; then applies
/// environment overrides and validates the result.
///
/// # Errors
///
/// Any error from [`load_from_file`], or a validation error introduced by
/// an environment override.
pub fn resolve(path: Option<&Path>) -> Result<DexConfig, ConfigError> {
    let config = match path {
        Some(p) => load_from_file(p)?,
        None => DexConfig::default(),
    }
    .with_env_overrides();

    validate_joined(&config)?;
    Ok(config)
}

fn validate_joined(config: &DexConfig) -> Result<(), ConfigError> {
    validation::validate(config).map_err(|errors| {
        ConfigError::Validation(
            errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("\n"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const VALID_TOML: &str = r##"
[relay]
broker_url = "nats://localhost:4222"
topic = "processed-data-topic"
trigger_interval_ms = 500

[dashboard]
data_path = "data/pokemonSet.csv"
grid_columns = 4
histogram_bins = 10

[palette]
fallback = "#101010"

[palette.colors]
Fire = "#FF4500"

[observability]
log_format = "json"
"##;

    #[test]
    fn test_load_from_str_valid_toml_succeeds() {
        let config = load_from_str(VALID_TOML, "test").expect("test: valid config");
        assert_eq!(config.relay.trigger_interval_ms, 500);
        assert_eq!(config.dashboard.grid_columns, 4);
        assert_eq!(config.dashboard.data_path, PathBuf::from("data/pokemonSet.csv"));
        assert_eq!(
            config.palette.colors.get("Fire").map(String::as_str),
            Some("#FF4500")
        );
        assert_eq!(config.observability.log_format.as_str(), "json");
    }

    #[test]
    fn test_load_from_str_empty_uses_defaults() {
        let config = load_from_str("", "empty").expect("test: empty config");
        assert_eq!(config, DexConfig::default());
    }

    #[test]
    fn test_load_from_str_partial_section_fills_defaults() {
        let config = load_from_str("[relay]\ntopic = \"other\"\n", "partial")
            .expect("test: partial config");
        assert_eq!(config.relay.topic, "other");
        assert_eq!(config.relay.trigger_interval_ms, 1000);
        assert_eq!(config.dashboard.histogram_bins, 20);
    }

    #[test]
    fn test_load_from_str_invalid_toml_returns_parse_error() {
        let result = load_from_str("not valid [[[", "bad");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_str_validation_failure_returns_validation_error() {
        let result = load_from_str("[relay]\ntrigger_interval_ms = 0\n", "zero");
        let err = result.expect_err("test: must fail");
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("relay.trigger_interval_ms"));
    }

    #[test]
    fn test_load_from_str_unknown_log_format_fails() {
        let result = load_from_str("[observability]\nlog_format = \"xml\"\n", "fmt");
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_load_from_str_source_name_appears_in_error() {
        let err = load_from_str("[[[", "my-config.toml").expect_err("test: must fail");
        assert!(err.to_string().contains("my-config.toml"));
    }

    #[test]
    fn test_load_from_file_valid_toml_succeeds() {
        let dir = tempfile::tempdir().expect("test: create tempdir");
        let path = dir.path().join("test.toml");
        let mut f = std::fs::File::create(&path).expect("test: create file");
        f.write_all(VALID_TOML.as_bytes()).expect("test: write");
        drop(f);

        let config = load_from_file(&path).expect("test: load from file");
        assert_eq!(config.relay.topic, "processed-data-topic");
    }

    #[test]
    fn test_load_from_file_missing_file_returns_io_error() {
        let result = load_from_file(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_resolve_without_file_is_valid() {
        let config = resolve(None).expect("test: defaults resolve");
        assert!(!config.relay.broker_url.is_empty());
    }
}
