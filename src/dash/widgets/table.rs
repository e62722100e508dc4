//! # Widget: Record Tables
//!
//! ## Responsibility
//! Renders the plain preview of the first rows and the full table whose
//! type cells are coloured through [`cell_style`].
//!
//! ## Guarantees
//! - Every cell is shown untruncated up to its column width
//! - Type cell styling depends only on the cell value
//! - Scrolling never indexes past the last record

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Cell, Row, Table};
use ratatui::Frame;

use super::panel_block;
use crate::dash::app::App;
use crate::dataset::Record;
use crate::palette::{cell_style, CategoryColorTable};

/// Column headers, in file order plus the derived display name.
pub const HEADERS: [&str; 14] = [
    "#",
    "Name",
    "Clean Name",
    "Type 1",
    "Type 2",
    "Total",
    "HP",
    "Attack",
    "Defense",
    "Sp. Atk",
    "Sp. Def",
    "Speed",
    "Generation",
    "Legendary",
];

const WIDTHS: [Constraint; 14] = [
    Constraint::Length(4),
    Constraint::Min(16),
    Constraint::Min(12),
    Constraint::Length(9),
    Constraint::Length(9),
    Constraint::Length(5),
    Constraint::Length(4),
    Constraint::Length(6),
    Constraint::Length(7),
    Constraint::Length(7),
    Constraint::Length(7),
    Constraint::Length(5),
    Constraint::Length(10),
    Constraint::Length(9),
];

fn header_row() -> Row<'static> {
    Row::new(HEADERS)
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .bottom_margin(0)
}

fn type_cell(value: Option<&str>, palette: Option<&CategoryColorTable>) -> Cell<'static> {
    let text = value.unwrap_or_default().to_string();
    match palette {
        Some(table) => {
            let style = cell_style(table, value);
            Cell::from(Line::from(text).alignment(style.alignment())).style(style.to_style())
        }
        None => Cell::from(text),
    }
}

/// Builds one table row; type cells are styled when `palette` is given.
pub fn record_row(record: &Record, palette: Option<&CategoryColorTable>) -> Row<'static> {
    Row::new(vec![
        Cell::from(record.index.to_string()),
        Cell::from(record.name.clone()),
        Cell::from(record.clean_name().to_string()),
        type_cell(record.type_1.as_deref(), palette),
        type_cell(record.type_2.as_deref(), palette),
        Cell::from(record.total.to_string()),
        Cell::from(record.hp.to_string()),
        Cell::from(record.attack.to_string()),
        Cell::from(record.defense.to_string()),
        Cell::from(record.sp_atk.to_string()),
        Cell::from(record.sp_def.to_string()),
        Cell::from(record.speed.to_string()),
        Cell::from(record.generation.to_string()),
        Cell::from(if record.legendary { "True" } else { "False" }),
    ])
}

/// Renders the first `app.preview_rows` records unstyled.
pub fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let rows: Vec<Row> = app
        .dataset
        .head(app.preview_rows)
        .iter()
        .map(|r| record_row(r, None))
        .collect();

    let table = Table::new(rows, WIDTHS)
        .header(header_row())
        .block(panel_block("Data Preview".to_string()));
    f.render_widget(table, area);
}

/// Rows of the full table visible in an area `height` cells tall.
pub fn visible_rows(height: u16) -> usize {
    // Two border rows plus the header.
    usize::from(height.saturating_sub(3))
}

/// Renders the full table starting at `app.table_scroll`.
pub fn render_full(f: &mut Frame, area: Rect, app: &App) {
    let records = app.dataset.records();
    let start = app.table_scroll.min(records.len());
    let rows: Vec<Row> = records[start..]
        .iter()
        .take(visible_rows(area.height))
        .map(|r| record_row(r, Some(&app.palette)))
        .collect();

    let title = format!(
        "Styled Table ({}-{} of {})",
        (start + 1).min(records.len()),
        (start + rows.len()).min(records.len()),
        records.len()
    );
    let table = Table::new(rows, WIDTHS)
        .header(header_row())
        .block(panel_block(title));
    f.render_widget(table, area);
}
