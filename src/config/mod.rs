//! # Stage: Declarative Configuration
//!
//! ## Responsibility
//! Parse and validate the optional TOML file shared by both binaries:
//! ```text
//! dexstream-relay --config dexstream.toml
//! dexstream-dash  --config dexstream.toml
//! ```
//!
//! ## Guarantees
//! - Deterministic: same TOML input always produces the same `DexConfig`
//! - Complete defaults: an empty file is a valid configuration
//! - Validated: all semantic constraints are checked before a config is accepted
//! - Schema-exportable: JSON Schema output enables IDE autocomplete
//!
//! ## NOT Responsible For
//! - Connecting to the broker (that belongs to `relay`)
//! - Reading the dataset (that belongs to `dataset`)

pub mod loader;
pub mod validation;

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dataset::DEFAULT_DATASET_PATH;
use crate::palette::{CategoryColorTable, Rgb, FALLBACK_HEX};

/// Environment variable overriding `relay.broker_url`.
pub const BROKER_URL_ENV: &str = "DEXSTREAM_BROKER_URL";

/// Topic the relay subscribes to.
pub const DEFAULT_TOPIC: &str = "processed-data-topic";

// ── Default value functions ──────────────────────────────────────────────

/// Default broker address, matching the compose service name.
fn default_broker_url() -> String {
    "nats://nats:4222".to_string()
}

fn default_topic() -> String {
    DEFAULT_TOPIC.to_string()
}

/// Default sink trigger interval: 1000ms.
fn default_trigger_interval_ms() -> u64 {
    1000
}

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATASET_PATH)
}

/// Default distribution grid width: 3 columns.
fn default_grid_columns() -> usize {
    crate::layout::DEFAULT_COLUMNS
}

/// Default histogram bin count: 20.
fn default_histogram_bins() -> usize {
    crate::stats::DEFAULT_BINS
}

/// Default preview length: 5 rows.
fn default_preview_rows() -> usize {
    5
}

fn default_fallback() -> String {
    FALLBACK_HEX.to_string()
}

// ── Top-level config ─────────────────────────────────────────────────────

/// Root configuration.
///
/// Every section and field has a default, so any subset may be given.
///
/// # Example
///
/// ```toml
/// [relay]
/// broker_url = "nats://localhost:4222"
/// trigger_interval_ms = 500
///
/// [dashboard]
/// data_path = "data/pokemonSet.csv"
/// grid_columns = 4
///
/// [palette.colors]
/// Fire = "#FF4500"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(default)]
pub struct DexConfig {
    /// Stream relay settings.
    pub relay: RelayConfig,
    /// Dashboard settings.
    pub dashboard: DashboardConfig,
    /// Category colour overrides.
    pub palette: PaletteConfig,
    /// Logging settings.
    pub observability: ObservabilityConfig,
}

impl DexConfig {
    /// Applies environment overrides (currently `DEXSTREAM_BROKER_URL`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(BROKER_URL_ENV) {
            if !url.trim().is_empty() {
                self.relay.broker_url = url;
            }
        }
        self
    }
}

// ── Relay ────────────────────────────────────────────────────────────────

/// Stream relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct RelayConfig {
    /// Broker address, e.g. `nats://localhost:4222`.
    #[serde(default = "default_broker_url")]
    pub broker_url: String,
    /// Topic (subject) to subscribe to.
    #[serde(default = "default_topic")]
    pub topic: String,
    /// How often buffered records are delivered to the sink.
    #[serde(default = "default_trigger_interval_ms")]
    pub trigger_interval_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            broker_url: default_broker_url(),
            topic: default_topic(),
            trigger_interval_ms: default_trigger_interval_ms(),
        }
    }
}

impl RelayConfig {
    /// The trigger interval as a `Duration`.
    pub fn trigger_interval(&self) -> Duration {
        Duration::from_millis(self.trigger_interval_ms)
    }
}

// ── Dashboard ────────────────────────────────────────────────────────────

/// Dashboard configuration.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct DashboardConfig {
    /// Path of the dataset CSV.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Columns of the distribution grid (1–8).
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
    /// Bins per histogram.
    #[serde(default = "default_histogram_bins")]
    pub histogram_bins: usize,
    /// Rows shown in the preview table.
    #[serde(default = "default_preview_rows")]
    pub preview_rows: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            grid_columns: default_grid_columns(),
            histogram_bins: default_histogram_bins(),
            preview_rows: default_preview_rows(),
        }
    }
}

// ── Palette ──────────────────────────────────────────────────────────────

/// Colour overrides layered over the built-in type colours.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct PaletteConfig {
    /// Colour for missing or unknown categories (`#rrggbb`).
    #[serde(default = "default_fallback")]
    pub fallback: String,
    /// Per-category colours (`name = "#rrggbb"`).
    #[serde(default)]
    pub colors: BTreeMap<String, String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            fallback: default_fallback(),
            colors: BTreeMap::new(),
        }
    }
}

impl PaletteConfig {
    /// Builds the colour table. Entries that fail to parse are skipped;
    /// [`validation::validate`] reports them before this is reached.
    pub fn to_table(&self) -> CategoryColorTable {
        let overrides: BTreeMap<String, Rgb> = self
            .colors
            .iter()
            .filter_map(|(name, hex)| hex.parse().ok().map(|rgb| (name.clone(), rgb)))
            .collect();
        let table = CategoryColorTable::default().with_overrides(&overrides);
        match self.fallback.parse() {
            Ok(fallback) => table.with_fallback(fallback),
            Err(_) => table,
        }
    }
}

// ── Observability ────────────────────────────────────────────────────────

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ObservabilityConfig {
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable log output.
    #[default]
    Pretty,
    /// Structured JSON log output for machine consumption.
    Json,
}

impl LogFormat {
    /// Name accepted by [`crate::init_tracing_with`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

/// Export the JSON Schema for `DexConfig`.
///
/// # Errors
///
/// Returns `serde_json::Error` if schema serialization fails.
pub fn export_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(DexConfig);
    serde_json::to_string_pretty(&schema)
}
