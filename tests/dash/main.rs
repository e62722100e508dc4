//! Integration tests for the terminal dashboard.
//!
//! These tests drive the app through key events and render whole frames into
//! a ratatui `TestBackend`, checking which panels appear.

#[cfg(feature = "tui")]
mod navigation;
#[cfg(feature = "tui")]
mod render;

#[cfg(feature = "tui")]
pub(crate) mod fixtures {
    use std::path::Path;

    use dexstream::dash::app::App;
    use dexstream::{DexConfig, LoadedDataset};

    /// App over the bundled sample dataset.
    pub fn sample_app() -> App {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/pokemonSet.csv");
        let loaded = LoadedDataset::load_or_empty(&path).expect("test: load sample");
        App::new(loaded, &DexConfig::default())
    }

    /// App over a path that does not exist.
    pub fn missing_app() -> App {
        let loaded = LoadedDataset::load_or_empty(Path::new("/no/such/dir/pokemonSet.csv"))
            .expect("test: missing file is recovered");
        App::new(loaded, &DexConfig::default())
    }
}
