//! # Widget: Attack vs Defense Scatter
//!
//! Plots every record's attack against its defense, legendary records in a
//! separate series.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, LegendPosition};
use ratatui::Frame;

use super::{axis_label, panel_block};
use crate::dash::app::App;

/// Colour of non-legendary points (viridis low end).
pub const REGULAR_COLOR: Color = Color::Rgb(0x44, 0x01, 0x54);

/// Colour of legendary points (viridis high end).
pub const LEGENDARY_COLOR: Color = Color::Rgb(0xFD, 0xE7, 0x25);

/// Renders the scatter panel.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let scatter = &app.panels.scatter;
    let datasets = vec![
        Dataset::default()
            .name("Legendary: False")
            .graph_type(GraphType::Scatter)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(REGULAR_COLOR))
            .data(&scatter.regular),
        Dataset::default()
            .name("Legendary: True")
            .graph_type(GraphType::Scatter)
            .marker(symbols::Marker::Dot)
            .style(Style::default().fg(LEGENDARY_COLOR))
            .data(&scatter.legendary),
    ];

    let max = (scatter.max() * 1.05).max(1.0).round();

    let chart = Chart::new(datasets)
        .block(panel_block("Attack vs Defense".to_string()))
        .legend_position(Some(LegendPosition::TopLeft))
        .x_axis(
            Axis::default()
                .title("Attack")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max])
                .labels(vec!["0".to_string(), axis_label(max)]),
        )
        .y_axis(
            Axis::default()
                .title("Defense")
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, max])
                .labels(vec!["0".to_string(), axis_label(max)]),
        );

    f.render_widget(chart, area);
}
