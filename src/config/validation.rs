//! Configuration validation engine.
//!
//! ## Responsibility
//! Validate semantic constraints on a parsed [`DexConfig`] that cannot be
//! expressed through the type system alone (ranges, colour syntax).
//!
//! ## Guarantees
//! - Every validation rule has at least one test that triggers it
//! - Validation collects *all* errors before returning (no short-circuit)
//! - Error messages include the field path and the invalid value
//!
//! ## NOT Responsible For
//! - Parsing TOML (that belongs to `loader`)
//! - File I/O (that belongs to `loader`)

use super::DexConfig;
use crate::palette::Rgb;

/// Maximum distribution grid width.
pub const MAX_GRID_COLUMNS: usize = 8;

/// Errors arising from configuration parsing, validation, or I/O.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parsing failed.
    #[error("Parse error in {file}: {source}")]
    Parse {
        /// Path of the file that failed to parse.
        file: String,
        /// Underlying TOML deserialization error.
        #[source]
        source: toml::de::Error,
    },

    /// One or more semantic validation rules failed.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// A specific field has an out-of-range or malformed value.
    #[error("Field '{field}' has invalid value {value}: {reason}")]
    InvalidField {
        /// Dot-separated field path (e.g., "relay.trigger_interval_ms").
        field: String,
        /// String representation of the invalid value.
        value: String,
        /// Human-readable explanation of the constraint.
        reason: String,
    },

    /// File I/O error.
    #[error("IO error reading {file}: {source}")]
    Io {
        /// Path of the file that could not be read.
        file: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Validate all semantic constraints on a [`DexConfig`].
///
/// # Returns
///
/// - `Ok(())` if all constraints pass.
/// - `Err(Vec<ConfigError>)` with every violation found.
pub fn validate(config: &DexConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    // ── Relay ────────────────────────────────────────────────────────
    if config.relay.broker_url.trim().is_empty() {
        errors.push(ConfigError::InvalidField {
            field: "relay.broker_url".into(),
            value: String::new(),
            reason: "broker address must not be empty".into(),
        });
    }

    if config.relay.topic.trim().is_empty() {
        errors.push(ConfigError::InvalidField {
            field: "relay.topic".into(),
            value: String::new(),
            reason: "topic must not be empty".into(),
        });
    }

    if config.relay.trigger_interval_ms == 0 {
        errors.push(ConfigError::InvalidField {
            field: "relay.trigger_interval_ms".into(),
            value: "0".into(),
            reason: "must be at least 1ms".into(),
        });
    }

    // ── Dashboard ────────────────────────────────────────────────────
    let cols = config.dashboard.grid_columns;
    if !(1..=MAX_GRID_COLUMNS).contains(&cols) {
        errors.push(ConfigError::InvalidField {
            field: "dashboard.grid_columns".into(),
            value: cols.to_string(),
            reason: format!("must be between 1 and {MAX_GRID_COLUMNS}"),
        });
    }

    if config.dashboard.histogram_bins == 0 {
        errors.push(ConfigError::InvalidField {
            field: "dashboard.histogram_bins".into(),
            value: "0".into(),
            reason: "must be at least 1".into(),
        });
    }

    if config.dashboard.data_path.as_os_str().is_empty() {
        errors.push(ConfigError::InvalidField {
            field: "dashboard.data_path".into(),
            value: String::new(),
            reason: "dataset path must not be empty".into(),
        });
    }

    // ── Palette ──────────────────────────────────────────────────────
    if let Err(e) = config.palette.fallback.parse::<Rgb>() {
        errors.push(ConfigError::InvalidField {
            field: "palette.fallback".into(),
            value: config.palette.fallback.clone(),
            reason: e.to_string(),
        });
    }

    for (name, hex) in &config.palette.colors {
        if let Err(e) = hex.parse::<Rgb>() {
            errors.push(ConfigError::InvalidField {
                field: format!("palette.colors.{name}"),
                value: hex.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
