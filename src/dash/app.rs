//! # Module: Dashboard App State
//!
//! ## Responsibility
//! Owns the loaded dataset, the panel data derived from it, and the
//! navigation state. `App` is the single source of truth for every widget.
//!
//! ## Guarantees
//! - Panel data is derived once in [`App::new`]
//! - `table_scroll` never points past the last record
//! - Navigation methods never panic

use std::sync::Arc;

use crate::config::DexConfig;
use crate::dataset::{Dataset, LoadedDataset};
use crate::layout::{layout, Grid};
use crate::palette::CategoryColorTable;
use crate::stats::{
    categorical_counts, category_bars, density_overlay, histogram, CategoryBar, HistogramBin,
    NumericField, DENSITY_POINTS,
};

/// Minimum terminal width for the dashboard to render.
pub const MIN_COLS: u16 = 80;

/// Minimum terminal height for the dashboard to render.
pub const MIN_ROWS: u16 = 24;

/// Field shown in the overview distribution panel.
pub const TOTAL_FIELD: &str = "Total";

/// Dashboard tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// Preview table, total-stat distribution and attack-vs-defense scatter.
    Overview,
    /// One distribution panel per numeric field.
    Distributions,
    /// Primary type bar chart.
    Types,
    /// Full type-coloured table.
    Table,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Distributions, Tab::Types, Tab::Table];

    /// Tab label.
    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Distributions => "Distributions",
            Tab::Types => "Types",
            Tab::Table => "Table",
        }
    }

    /// Position in [`Tab::ALL`].
    pub fn index(self) -> usize {
        match self {
            Tab::Overview => 0,
            Tab::Distributions => 1,
            Tab::Types => 2,
            Tab::Table => 3,
        }
    }

    /// The tab to the right, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tab to the left, wrapping around.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Histogram and density overlay for one numeric field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPanel {
    /// Field name, also the x-axis label.
    pub field: String,
    /// Histogram bins.
    pub bins: Vec<HistogramBin>,
    /// `(bin centre, count)` points drawn as bars.
    pub bar_points: Vec<(f64, f64)>,
    /// Smoothed density scaled to counts.
    pub density: Vec<(f64, f64)>,
}

impl FieldPanel {
    /// Bins `field` into `bins` bins and fits the density overlay.
    pub fn from_field(field: &NumericField, bins: usize) -> Self {
        let histogram = histogram(&field.values, bins);
        let density = density_overlay(&field.values, &histogram, DENSITY_POINTS);
        let bar_points = histogram.iter().map(|b| (b.mid(), b.count as f64)).collect();
        Self {
            field: field.name.clone(),
            bins: histogram,
            bar_points,
            density,
        }
    }

    /// Panel title.
    pub fn title(&self) -> String {
        format!("Distribution of {}", self.field)
    }

    /// Horizontal extent covered by the bins.
    pub fn x_bounds(&self) -> [f64; 2] {
        match (self.bins.first(), self.bins.last()) {
            (Some(first), Some(last)) => [first.start, last.end],
            _ => [0.0, 1.0],
        }
    }

    /// Largest plotted value, bars or density.
    pub fn y_max(&self) -> f64 {
        self.bar_points
            .iter()
            .chain(self.density.iter())
            .map(|&(_, y)| y)
            .fold(0.0, f64::max)
    }
}

/// Attack/defense points split by the legendary flag.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScatterData {
    /// Points for non-legendary records.
    pub regular: Vec<(f64, f64)>,
    /// Points for legendary records.
    pub legendary: Vec<(f64, f64)>,
}

impl ScatterData {
    fn from_dataset(dataset: &Dataset) -> Self {
        let mut data = Self::default();
        for record in dataset.records() {
            let point = (f64::from(record.attack), f64::from(record.defense));
            if record.legendary {
                data.legendary.push(point);
            } else {
                data.regular.push(point);
            }
        }
        data
    }

    /// Upper bound shared by both axes.
    pub fn max(&self) -> f64 {
        self.regular
            .iter()
            .chain(self.legendary.iter())
            .map(|&(x, y)| x.max(y))
            .fold(0.0, f64::max)
    }
}

/// Everything the panels draw, derived from the dataset once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PanelData {
    /// Grid placement of the distribution panels.
    pub grid: Grid,
    /// One panel per plottable field, in grid order.
    pub fields: Vec<FieldPanel>,
    /// The overview total-stat panel.
    pub total: Option<FieldPanel>,
    /// Attack vs defense scatter.
    pub scatter: ScatterData,
    /// Primary type bars, most frequent first.
    pub types: Vec<CategoryBar>,
}

impl PanelData {
    /// Derives all panel data from `dataset`.
    pub fn build(
        dataset: &Dataset,
        palette: &CategoryColorTable,
        columns: usize,
        bins: usize,
    ) -> Self {
        if dataset.is_empty() {
            return Self::default();
        }

        let numeric = dataset.numeric_fields();
        let grid = layout(&numeric, columns);
        let fields = grid
            .visible()
            .filter_map(|cell| {
                let name = cell.field.as_deref()?;
                numeric.iter().find(|f| f.name == name)
            })
            .map(|f| FieldPanel::from_field(f, bins))
            .collect();

        let total = numeric
            .iter()
            .find(|f| f.name == TOTAL_FIELD)
            .map(|f| FieldPanel::from_field(f, bins));

        let counts = categorical_counts(dataset.primary_types());

        Self {
            grid,
            fields,
            total,
            scatter: ScatterData::from_dataset(dataset),
            types: category_bars(&counts, palette),
        }
    }

    /// Panel for `field`, if plotted.
    pub fn field(&self, field: &str) -> Option<&FieldPanel> {
        self.fields.iter().find(|p| p.field == field)
    }
}

/// Primary application state for the dashboard.
#[derive(Debug)]
pub struct App {
    /// Whether the application should exit.
    pub should_quit: bool,
    /// Whether the help overlay is visible.
    pub show_help: bool,
    /// Selected tab.
    pub tab: Tab,
    /// First record shown in the full table.
    pub table_scroll: usize,
    /// The dataset (empty when the file was missing).
    pub dataset: Arc<Dataset>,
    /// Notice recorded while loading, shown instead of the panels.
    pub notice: Option<String>,
    /// Category colours.
    pub palette: CategoryColorTable,
    /// Rows in the preview table.
    pub preview_rows: usize,
    /// Derived panel data.
    pub panels: PanelData,
}

impl App {
    /// Builds the app state and derives all panel data.
    pub fn new(loaded: LoadedDataset, config: &DexConfig) -> Self {
        let palette = config.palette.to_table();
        let panels = PanelData::build(
            &loaded.dataset,
            &palette,
            config.dashboard.grid_columns,
            config.dashboard.histogram_bins,
        );
        Self {
            should_quit: false,
            show_help: false,
            tab: Tab::Overview,
            table_scroll: 0,
            dataset: loaded.dataset,
            notice: loaded.notice,
            palette,
            preview_rows: config.dashboard.preview_rows,
            panels,
        }
    }

    /// Whether any panel should be rendered.
    pub fn has_panels(&self) -> bool {
        !self.dataset.is_empty()
    }

    /// Number of panels the current tab draws.
    pub fn panel_count(&self) -> usize {
        if !self.has_panels() {
            return 0;
        }
        match self.tab {
            Tab::Overview => 4 + self.panels.fields.len(),
            Tab::Distributions => self.panels.fields.len(),
            Tab::Types | Tab::Table => 1,
        }
    }

    /// Message shown in place of the panels when there is nothing to draw.
    pub fn empty_message(&self) -> String {
        self.notice
            .clone()
            .unwrap_or_else(|| "The dataset has no rows.".to_string())
    }

    /// Switches to the next tab.
    pub fn next_tab(&mut self) {
        self.tab = self.tab.next();
    }

    /// Switches to the previous tab.
    pub fn previous_tab(&mut self) {
        self.tab = self.tab.previous();
    }

    /// Scrolls the full table up by one row.
    pub fn scroll_up(&mut self) {
        self.table_scroll = self.table_scroll.saturating_sub(1);
    }

    /// Scrolls the full table down by one row, stopping at the last record.
    pub fn scroll_down(&mut self) {
        let last = self.dataset.len().saturating_sub(1);
        if self.table_scroll < last {
            self.table_scroll += 1;
        }
    }
}
