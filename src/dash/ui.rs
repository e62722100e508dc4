//! # Module: Dashboard Rendering
//!
//! ## Responsibility
//! Divides the terminal into the title frame, the tab bar and the body, and
//! delegates the body to the widgets of the selected tab. Handles the minimum
//! size guard, the empty-dataset notice and the help overlay.
//!
//! ## Guarantees
//! - Minimum size guard displays a centered message if the terminal is too small
//! - An empty dataset draws its notice and zero panels
//! - No panics during rendering regardless of terminal dimensions

use std::time::Instant;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use super::app::{App, Tab, MIN_COLS, MIN_ROWS};
use super::widgets;

/// Renders the complete dashboard UI into the given frame.
///
/// Returns the number of panels drawn.
pub fn draw(f: &mut Frame, app: &App) -> usize {
    let started = Instant::now();
    let size = f.area();

    // Minimum size guard
    if size.width < MIN_COLS || size.height < MIN_ROWS {
        draw_too_small(f, size);
        return 0;
    }

    // Help overlay
    if app.show_help {
        draw_help_overlay(f, size);
        return 0;
    }

    let title = format!(
        " dexstream {:>width$} ",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        width = (size.width as usize).saturating_sub(16),
    );

    let outer_block = Block::default()
        .title(Span::styled(
            title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let footer = Line::from(vec![
        Span::styled(
            " [q]uit  [tab/\u{2190}\u{2192}] switch  [\u{2191}\u{2193}] scroll  [h]elp ",
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(" {} rows ", app.dataset.len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let footer_block = Block::default().title_bottom(footer).borders(Borders::NONE);

    let inner = outer_block.inner(size);
    f.render_widget(outer_block, size);
    f.render_widget(footer_block, size);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    draw_tabs(f, chunks[0], app.tab);

    if !app.has_panels() {
        draw_notice(f, chunks[1], &app.empty_message());
        return 0;
    }

    let drawn = match app.tab {
        Tab::Overview => draw_overview(f, chunks[1], app),
        Tab::Distributions => widgets::distributions::render_grid(f, chunks[1], app),
        Tab::Types => {
            widgets::types::render(f, chunks[1], app);
            1
        }
        Tab::Table => {
            widgets::table::render_full(f, chunks[1], app);
            1
        }
    };

    crate::metrics::record_frame_rendered(app.tab.title(), started.elapsed());
    drawn
}

fn draw_tabs(f: &mut Frame, area: Rect, selected: Tab) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .map(|t| Line::from(format!(" {} ", t.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected.index())
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(tabs, area);
}

/// Whole page: preview, total-stat distribution beside the scatter, then the
/// full-width distribution grid and the Type 1 bar chart.
fn draw_overview(f: &mut Frame, area: Rect, app: &App) -> usize {
    // Header, border rows and one line per preview record.
    let preview_height = u16::try_from(app.preview_rows)
        .unwrap_or(u16::MAX)
        .saturating_add(3);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(preview_height),
            Constraint::Fill(1),
            Constraint::Fill(2),
            Constraint::Fill(1),
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    widgets::table::render_preview(f, rows[0], app);
    widgets::distributions::render_total(f, columns[0], app);
    widgets::scatter::render(f, columns[1], app);
    let grid = widgets::distributions::render_grid(f, rows[2], app);
    widgets::types::render(f, rows[3], app);
    4 + grid
}

fn draw_notice(f: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(para, area);
}

/// Renders the "terminal too small" warning.
fn draw_too_small(f: &mut Frame, area: Rect) {
    let msg = format!("Terminal too small: resize to at least {MIN_COLS}x{MIN_ROWS}");
    let current_size = format!("Current size: {}x{}", area.width, area.height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            msg,
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            current_size,
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(block)
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });

    f.render_widget(para, area);
}

/// Centres a `width` x `height` popup inside `area`, shrinking it to fit.
fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let popup_width = width.min(area.width.saturating_sub(4));
    let popup_height = height.min(area.height.saturating_sub(4));
    let popup_x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    Rect::new(popup_x, popup_y, popup_width, popup_height)
}

/// Renders the help overlay.
fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let popup = popup_area(area, 50, 14);
    f.render_widget(Clear, popup);

    let key = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::DarkGray)));

    let help_text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  dexstream dashboard",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "  Keybindings:",
            Style::default().fg(Color::White),
        )),
        key("    [q] Quit              [Esc] Quit"),
        key("    [Ctrl+C] Force quit"),
        key("    [Tab] [\u{2192}] Next tab   [\u{2190}] Previous tab"),
        key("    [\u{2191}\u{2193}] Scroll table"),
        key("    [h] Toggle this help"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press h or an arrow key to close",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let para = Paragraph::new(help_text).block(block);
    f.render_widget(para, popup);
}
