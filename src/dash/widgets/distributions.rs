//! # Widget: Numeric Distributions
//!
//! ## Responsibility
//! Draws one histogram with its density overlay per panel, either singly
//! (the overview total-stat panel) or as the full grid laid out by
//! [`crate::layout`].
//!
//! ## Guarantees
//! - Hidden grid cells are never drawn
//! - Titles read `Distribution of {field}`; axes are the field name and `Count`
//! - Never panics on empty or constant columns

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType};
use ratatui::Frame;

use super::{axis_label, panel_block};
use crate::dash::app::{App, FieldPanel};

/// Fill colour for the overview total-stat panel (sky blue).
pub const TOTAL_COLOR: Color = Color::Rgb(0x87, 0xCE, 0xEB);

/// Fill colour for grid panels.
pub const GRID_COLOR: Color = Color::Rgb(0x1F, 0x77, 0xB4);

/// Colour of the density overlay.
pub const DENSITY_COLOR: Color = Color::Rgb(0xFF, 0x7F, 0x0E);

/// Renders one histogram panel with its density overlay.
pub fn render_panel(f: &mut Frame, area: Rect, panel: &FieldPanel, color: Color) {
    let mut datasets = vec![Dataset::default()
        .name("count")
        .graph_type(GraphType::Bar)
        .marker(symbols::Marker::HalfBlock)
        .style(Style::default().fg(color))
        .data(&panel.bar_points)];

    if !panel.density.is_empty() {
        datasets.push(
            Dataset::default()
                .name("density")
                .graph_type(GraphType::Line)
                .marker(symbols::Marker::Braille)
                .style(Style::default().fg(DENSITY_COLOR))
                .data(&panel.density),
        );
    }

    let [x_min, x_max] = panel.x_bounds();
    let y_max = (panel.y_max() * 1.1).max(1.0);

    let chart = Chart::new(datasets)
        .block(panel_block(panel.title()))
        .x_axis(
            Axis::default()
                .title(panel.field.clone())
                .style(Style::default().fg(Color::DarkGray))
                .bounds([x_min, x_max])
                .labels(vec![axis_label(x_min), axis_label(x_max)]),
        )
        .y_axis(
            Axis::default()
                .title("Count")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, y_max])
                .labels(vec!["0".to_string(), axis_label(y_max.round())]),
        );

    f.render_widget(chart, area);
}

/// Renders the overview total-stat distribution.
pub fn render_total(f: &mut Frame, area: Rect, app: &App) {
    if let Some(panel) = &app.panels.total {
        render_panel(f, area, panel, TOTAL_COLOR);
    }
}

/// Renders every visible grid cell. Returns the number of panels drawn.
pub fn render_grid(f: &mut Frame, area: Rect, app: &App) -> usize {
    let grid = &app.panels.grid;
    let mut drawn = 0;
    for (cell, cell_area) in grid.cells.iter().zip(grid.areas(area)) {
        let Some(panel) = cell.field.as_deref().and_then(|name| app.panels.field(name)) else {
            continue;
        };
        render_panel(f, cell_area, panel, GRID_COLOR);
        drawn += 1;
    }
    drawn
}
