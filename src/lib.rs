//! # dexstream
//!
//! Two small flows sharing one crate:
//!
//! - **Stream relay**: subscribe to a broker topic, decode each payload as
//!   text and print it to the console in numbered batches.
//! - **Dataset dashboard**: load a character-statistics CSV once, colour its
//!   categories and render histogram, scatter and bar panels in a terminal.
//!
//! ## Architecture
//!
//! ```text
//! broker ── NatsSource ──▶ Relay (trigger ticker) ──▶ RecordSink (console)
//!
//! CSV ── DatasetCache ──▶ Dataset ──▶ layout / stats / palette ──▶ dash::ui
//! ```

// ── Lint policy ───────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(missing_docs)]

use thiserror::Error;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod dataset;
pub mod layout;
pub mod metrics;
pub mod palette;
pub mod relay;
pub mod stats;

#[cfg(feature = "tui")]
pub mod dash;

// Re-exports for convenience
pub use config::DexConfig;
pub use dataset::{clean_name, Dataset, DatasetCache, DatasetError, LoadedDataset, Record};
pub use layout::{layout, Grid, GridCell};
pub use palette::{cell_style, CategoryColorTable, CellStyle, Rgb};
pub use relay::{
    CollectingSink, ConsoleSink, RecordSink, Relay, RelayError, RelayStats, StreamRecord,
};

#[cfg(feature = "nats")]
pub use relay::NatsSource;
pub use stats::{categorical_counts, NumericField};

/// Initialise the global tracing subscriber.
///
/// Reads the `LOG_FORMAT` environment variable to choose output format:
/// - `"json"`: structured JSON output for log aggregators
/// - anything else (including unset): human-readable pretty output
///
/// Filter level is controlled by `RUST_LOG` (e.g. `RUST_LOG=info`).
///
/// # Errors
///
/// Returns [`DexError::Other`] if the global subscriber has already been set
/// (e.g. by a previous call or a test harness).
///
/// # Example
///
/// ```no_run
/// # use dexstream::{init_tracing, DexError};
/// # fn example() -> Result<(), DexError> {
/// init_tracing()?;
/// # Ok(()) }
/// ```
pub fn init_tracing() -> Result<(), DexError> {
    let format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());
    init_tracing_with(&format, false)
}

/// Initialise tracing with an explicit format, optionally writing to stderr.
///
/// The dashboard uses `to_stderr = true` so log lines never land on the
/// alternate screen that ratatui draws into.
///
/// # Errors
///
/// Returns [`DexError::Other`] if a global subscriber is already installed.
pub fn init_tracing_with(format: &str, to_stderr: bool) -> Result<(), DexError> {
    let result = match (format, to_stderr) {
        ("json", false) => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_current_span(true)
            .with_span_list(true)
            .try_init(),
        ("json", true) => tracing_subscriber::fmt()
            .json()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init(),
        (_, false) => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init(),
        (_, true) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init(),
    };

    result.map_err(|e| DexError::Other(format!("tracing init failed: {e}")))
}

/// Top-level errors.
///
/// Each module owns a specific error enum; this type wraps them so binaries
/// can use a single `Result` alias.
#[derive(Error, Debug)]
pub enum DexError {
    /// The dataset could not be loaded.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// The stream relay failed to connect, subscribe or deliver.
    #[error(transparent)]
    Relay(#[from] RelayError),

    /// Configuration is missing, malformed or invalid.
    #[error(transparent)]
    Config(#[from] config::validation::ConfigError),

    /// Catch-all for errors that do not fit a specific variant.
    #[error("{0}")]
    Other(String),
}
