//! # Module: Panel Layout Engine
//!
//! ## Responsibility
//! Place one distribution panel per plottable numeric field on a grid with a
//! fixed column count.
//!
//! ## Guarantees
//! - `rows == ceil(n / columns)` for `n` plottable fields
//! - Exactly `n` visible cells, assigned in row-major order
//! - The remaining `rows * columns - n` cells are hidden and never drawn
//! - The row-index field is never plotted
//!
//! ## NOT Responsible For
//! - Computing bins or densities (see: `stats`)
//! - Drawing the panels (see: `dash::widgets::distributions`)

use crate::dataset::ROW_INDEX_FIELD;
use crate::stats::NumericField;

/// Default number of grid columns.
pub const DEFAULT_COLUMNS: usize = 3;

/// One cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    /// Zero-based row.
    pub row: usize,
    /// Zero-based column.
    pub col: usize,
    /// Field drawn in this cell; `None` marks a hidden trailing cell.
    pub field: Option<String>,
}

impl GridCell {
    /// Whether the cell is drawn.
    pub fn is_visible(&self) -> bool {
        self.field.is_some()
    }
}

/// Grid shape plus the row-major cell assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Grid {
    /// Number of rows.
    pub rows: usize,
    /// Number of columns.
    pub columns: usize,
    /// All `rows * columns` cells in row-major order.
    pub cells: Vec<GridCell>,
}

impl Grid {
    /// Cells that hold a field.
    pub fn visible(&self) -> impl Iterator<Item = &GridCell> {
        self.cells.iter().filter(|c| c.is_visible())
    }

    /// Number of cells that hold a field.
    pub fn visible_count(&self) -> usize {
        self.visible().count()
    }

    /// Number of trailing cells left empty.
    pub fn hidden_count(&self) -> usize {
        self.cells.len() - self.visible_count()
    }

    /// Returns true when no field is plotted.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Splits `area` into `rows * columns` equal rectangles, row-major, so
    /// `areas(area)[i]` belongs to `cells[i]`.
    #[cfg(feature = "tui")]
    pub fn areas(&self, area: ratatui::layout::Rect) -> Vec<ratatui::layout::Rect> {
        use ratatui::layout::{Constraint, Direction, Layout};

        if self.is_empty() {
            return Vec::new();
        }

        let row_constraints = vec![Constraint::Ratio(1, self.rows as u32); self.rows];
        let col_constraints = vec![Constraint::Ratio(1, self.columns as u32); self.columns];

        Layout::default()
            .direction(Direction::Vertical)
            .constraints(row_constraints)
            .split(area)
            .iter()
            .flat_map(|row| {
                Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints(col_constraints.clone())
                    .split(*row)
                    .to_vec()
            })
            .collect()
    }
}

/// Lays out `fields` on a grid with `columns` columns.
///
/// The row-index field is skipped. `columns` is clamped to at least one.
///
/// # Example
///
/// ```rust
/// use dexstream::{layout, NumericField};
///
/// let fields: Vec<NumericField> = ["#", "HP", "Attack", "Defense", "Speed"]
///     .iter()
///     .map(|n| NumericField::new(*n, vec![]))
///     .collect();
/// let grid = layout(&fields, 3);
/// assert_eq!(grid.rows, 2);
/// assert_eq!(grid.visible_count(), 4);
/// assert_eq!(grid.hidden_count(), 2);
/// ```
pub fn layout(fields: &[NumericField], columns: usize) -> Grid {
    let columns = columns.max(1);
    let plottable: Vec<&str> = fields
        .iter()
        .map(|f| f.name.as_str())
        .filter(|name| *name != ROW_INDEX_FIELD)
        .collect();

    let rows = plottable.len().div_ceil(columns);
    let cells = (0..rows * columns)
        .map(|i| GridCell {
            row: i / columns,
            col: i % columns,
            field: plottable.get(i).map(|name| name.to_string()),
        })
        .collect();

    Grid {
        rows,
        columns,
        cells,
    }
}
