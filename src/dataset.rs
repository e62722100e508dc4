//! # Module: Dataset Loader
//!
//! ## Responsibility
//! Read the character-statistics CSV into typed [`Record`]s, derive the
//! clean display name for every row, and memoize the result for the life of
//! the process.
//!
//! ## Guarantees
//! - `clean_name` is computed once per record at load time and never mutated
//! - A missing file is reported as [`DatasetError::NotFound`], which callers
//!   recover from via [`LoadedDataset::load_or_empty`]
//! - The cached dataset is read-only and shared as `Arc<Dataset>`
//!
//! ## NOT Responsible For
//! - Rendering (see: `dash`)
//! - Aggregation (see: `stats`, `layout`)

use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Deserializer};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::metrics;
use crate::stats::NumericField;

/// Default location of the dataset inside the deployment container.
pub const DEFAULT_DATASET_PATH: &str = "/app/data/pokemonSet.csv";

/// Substring marking alternate forms; everything from it onwards is dropped
/// from the display name.
pub const NAME_MARKER: &str = "Mega";

/// Column holding the row index. Numeric, but never plotted.
pub const ROW_INDEX_FIELD: &str = "#";

/// Numeric columns in file order.
pub const NUMERIC_COLUMNS: [&str; 9] = [
    ROW_INDEX_FIELD,
    "Total",
    "HP",
    "Attack",
    "Defense",
    "Sp. Atk",
    "Sp. Def",
    "Speed",
    "Generation",
];

/// Errors arising while loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The file does not exist.
    #[error("dataset not found at {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The file exists but could not be read.
    #[error("IO error reading {path}: {source}")]
    Io {
        /// Path of the file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A row could not be parsed.
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        /// Path (or source name) of the data.
        path: String,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },
}

/// Derives the display name from a raw name.
///
/// Splits on the first occurrence of [`NAME_MARKER`], keeps the left-hand
/// part and trims it. Without the marker the trimmed raw name is returned.
/// A name that starts with the marker cleans to the empty string.
///
/// # Example
///
/// ```rust
/// use dexstream::clean_name;
///
/// assert_eq!(clean_name("VenusaurMega Venusaur"), "Venusaur");
/// assert_eq!(clean_name("  Pikachu "), "Pikachu");
/// ```
pub fn clean_name(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed
        .split_once(NAME_MARKER)
        .map_or(trimmed, |(left, _)| left)
        .trim()
        .to_string()
}

/// Row shape as stored in the CSV.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "#")]
    index: u32,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Type 1")]
    type_1: Option<String>,
    #[serde(rename = "Type 2")]
    type_2: Option<String>,
    #[serde(rename = "Total")]
    total: u32,
    #[serde(rename = "HP")]
    hp: u32,
    #[serde(rename = "Attack")]
    attack: u32,
    #[serde(rename = "Defense")]
    defense: u32,
    #[serde(rename = "Sp. Atk")]
    sp_atk: u32,
    #[serde(rename = "Sp. Def")]
    sp_def: u32,
    #[serde(rename = "Speed")]
    speed: u32,
    #[serde(rename = "Generation")]
    generation: u32,
    #[serde(rename = "Legendary", deserialize_with = "deserialize_flag")]
    legendary: bool,
}

/// Accepts `True`/`False` as written by dataframe exports, plus `1`/`0`.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(serde::de::Error::custom(format!(
            "invalid boolean flag '{other}'"
        ))),
    }
}

/// One character row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Row index (`#`). Alternate forms share their base form's index.
    pub index: u32,
    /// Raw name as stored in the file.
    pub name: String,
    /// Primary type label.
    pub type_1: Option<String>,
    /// Secondary type label, absent for single-type characters.
    pub type_2: Option<String>,
    /// Sum of the six base stats.
    pub total: u32,
    /// Hit points.
    pub hp: u32,
    /// Attack stat.
    pub attack: u32,
    /// Defense stat.
    pub defense: u32,
    /// Special attack stat.
    pub sp_atk: u32,
    /// Special defense stat.
    pub sp_def: u32,
    /// Speed stat.
    pub speed: u32,
    /// Generation the character was introduced in.
    pub generation: u32,
    /// Legendary flag.
    pub legendary: bool,
    clean_name: String,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        let clean_name = clean_name(&raw.name);
        Self {
            index: raw.index,
            name: raw.name,
            type_1: raw.type_1,
            type_2: raw.type_2,
            total: raw.total,
            hp: raw.hp,
            attack: raw.attack,
            defense: raw.defense,
            sp_atk: raw.sp_atk,
            sp_def: raw.sp_def,
            speed: raw.speed,
            generation: raw.generation,
            legendary: raw.legendary,
            clean_name,
        }
    }
}

impl Record {
    /// Display name derived at load time.
    pub fn clean_name(&self) -> &str {
        &self.clean_name
    }

    /// Value of the numeric column `column`, or `None` for unknown columns.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        let v = match column {
            ROW_INDEX_FIELD => self.index,
            "Total" => self.total,
            "HP" => self.hp,
            "Attack" => self.attack,
            "Defense" => self.defense,
            "Sp. Atk" => self.sp_atk,
            "Sp. Def" => self.sp_def,
            "Speed" => self.speed,
            "Generation" => self.generation,
            _ => return None,
        };
        Some(f64::from(v))
    }
}

/// The full, read-only dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// An empty dataset, substituted when the file is missing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses CSV data with a header row.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError::Csv`] on the first malformed row.
    pub fn from_reader<R: Read>(reader: R, source_name: &str) -> Result<Self, DatasetError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let records = rdr
            .deserialize::<RawRecord>()
            .map(|row| row.map(Record::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DatasetError::Csv {
                path: source_name.to_string(),
                source: e,
            })?;

        debug!(source = source_name, rows = records.len(), "parsed dataset");
        Ok(Self { records })
    }

    /// All records in file order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First `n` records (fewer if the dataset is shorter).
    pub fn head(&self, n: usize) -> &[Record] {
        &self.records[..n.min(self.records.len())]
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when no records were loaded.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Every numeric column, in file order, including the row index.
    /// An empty dataset has no fields.
    pub fn numeric_fields(&self) -> Vec<NumericField> {
        if self.records.is_empty() {
            return Vec::new();
        }
        NUMERIC_COLUMNS
            .iter()
            .map(|&column| NumericField {
                name: column.to_string(),
                values: self
                    .records
                    .iter()
                    .filter_map(|r| r.numeric(column))
                    .collect(),
            })
            .collect()
    }

    /// Primary type labels in row order.
    pub fn primary_types(&self) -> impl Iterator<Item = Option<&str>> {
        self.records.iter().map(|r| r.type_1.as_deref())
    }
}

/// Reads and parses the dataset at `path`.
///
/// # Errors
///
/// - [`DatasetError::NotFound`] if the file does not exist
/// - [`DatasetError::Io`] if it cannot be opened for another reason
/// - [`DatasetError::Csv`] if a row is malformed
pub fn load(path: &Path) -> Result<Dataset, DatasetError> {
    let display = path.display().to_string();
    let file = std::fs::File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DatasetError::NotFound {
            path: display.clone(),
        },
        _ => DatasetError::Io {
            path: display.clone(),
            source: e,
        },
    })?;

    let dataset = Dataset::from_reader(io::BufReader::new(file), &display)?;
    metrics::record_dataset_loaded(&display, dataset.len());
    Ok(dataset)
}

/// A dataset plus the user-visible notice produced while loading it.
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    /// The shared dataset (empty if the file was missing).
    pub dataset: Arc<Dataset>,
    /// Message to surface when the dataset had to be substituted.
    pub notice: Option<String>,
}

impl LoadedDataset {
    /// Loads `path`, substituting an empty dataset if the file is missing.
    ///
    /// # Errors
    ///
    /// Only I/O and parse failures propagate; a missing file does not.
    pub fn load_or_empty(path: &Path) -> Result<Self, DatasetError> {
        match load(path) {
            Ok(dataset) => Ok(Self {
                dataset: Arc::new(dataset),
                notice: None,
            }),
            Err(DatasetError::NotFound { path }) => {
                let notice = format!(
                    "Error: dataset not found at {path}. Check the data volume mount."
                );
                warn!(path = %path, "dataset missing, continuing with empty dataset");
                Ok(Self {
                    dataset: Arc::new(Dataset::empty()),
                    notice: Some(notice),
                })
            }
            Err(e) => Err(e),
        }
    }
}

/// Lazily-initialised, read-only slot holding the dataset for one path.
#[derive(Debug)]
pub struct DatasetCache {
    path: PathBuf,
    slot: OnceLock<LoadedDataset>,
}

impl DatasetCache {
    /// Creates an empty cache bound to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: OnceLock::new(),
        }
    }

    /// The path this cache is keyed on.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the dataset has been loaded already.
    pub fn is_loaded(&self) -> bool {
        self.slot.get().is_some()
    }

    /// Returns the cached dataset, loading it on first use.
    ///
    /// Failed loads are not cached; the next call retries.
    ///
    /// # Errors
    ///
    /// See [`LoadedDataset::load_or_empty`].
    pub fn get(&self) -> Result<LoadedDataset, DatasetError> {
        if let Some(loaded) = self.slot.get() {
            return Ok(loaded.clone());
        }
        let loaded = LoadedDataset::load_or_empty(&self.path)?;
        info!(
            path = %self.path.display(),
            rows = loaded.dataset.len(),
            "dataset cached"
        );
        // A concurrent first load may have won; either value is equivalent.
        Ok(self.slot.get_or_init(|| loaded).clone())
    }
}

static SHARED: OnceLock<DatasetCache> = OnceLock::new();

/// Process-wide accessor for the dataset at `path`.
///
/// The first call fixes the cached path. Calls for a different path bypass
/// the cache and read the file directly.
///
/// # Errors
///
/// See [`LoadedDataset::load_or_empty`].
pub fn shared_dataset(path: &Path) -> Result<LoadedDataset, DatasetError> {
    let cache = SHARED.get_or_init(|| DatasetCache::new(path));
    if cache.path() == path {
        cache.get()
    } else {
        debug!(
            cached = %cache.path().display(),
            requested = %path.display(),
            "path differs from cached dataset, reading uncached"
        );
        LoadedDataset::load_or_empty(path)
    }
}
