//! # Module: Dashboard Widgets
//!
//! ## Responsibility
//! Individual rendering widgets for each dashboard panel. Each widget is a pure
//! function that takes app state and a layout rect, and renders into a frame.
//!
//! ## Guarantees
//! - Widgets draw only precomputed data from `App::panels`
//! - No widget panics on any input range, including zero-sized areas

pub mod distributions;
pub mod scatter;
pub mod table;
pub mod types;

use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

/// Bordered panel block with a bold title.
pub(crate) fn panel_block(title: String) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
}

/// Axis label text for a value.
pub(crate) fn axis_label(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}
