//! # Widget: Type Distribution Bars
//!
//! ## Responsibility
//! Renders the primary-type counts as a bar chart, most frequent first,
//! each bar filled with the category colour of its label.
//!
//! ## Guarantees
//! - Bar order and colours come straight from `App::panels.types`
//! - Bar width shrinks to fit; never panics on narrow areas

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup};
use ratatui::Frame;

use super::panel_block;
use crate::dash::app::App;

/// Widest a single bar is drawn.
const MAX_BAR_WIDTH: u16 = 9;

/// Width of each bar so `bars` bars with one-cell gaps fit in `inner_width`.
pub fn bar_width(inner_width: u16, bars: usize) -> u16 {
    if bars == 0 {
        return 1;
    }
    let bars = u16::try_from(bars).unwrap_or(u16::MAX);
    let per_bar = inner_width / bars;
    per_bar.saturating_sub(1).clamp(1, MAX_BAR_WIDTH)
}

/// Renders the type bar chart.
pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let bars: Vec<Bar> = app
        .panels
        .types
        .iter()
        .map(|bar| {
            let style = Style::default().fg(bar.color.into());
            Bar::default()
                .value(bar.count as u64)
                .label(Line::from(bar.label.clone()))
                .text_value(bar.count.to_string())
                .style(style)
        })
        .collect();

    let width = bar_width(area.width.saturating_sub(2), bars.len());
    let chart = BarChart::default()
        .block(panel_block("Type 1 Distribution".to_string()))
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(1);

    f.render_widget(chart, area);
}
