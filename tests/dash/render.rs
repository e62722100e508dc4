//! Whole-frame rendering into a `TestBackend`.

use ratatui::backend::TestBackend;
use ratatui::Terminal;

use dexstream::dash::app::{App, Tab};
use dexstream::dash::ui;

use crate::fixtures::{missing_app, sample_app};

/// Draws one frame and returns the panel count and the screen text.
fn render(app: &App, width: u16, height: u16) -> (usize, String) {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).expect("test: terminal");
    let mut drawn = 0;
    terminal
        .draw(|f| {
            drawn = ui::draw(f, app);
        })
        .expect("test: draw");

    let buffer = terminal.backend().buffer();
    let mut text = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    (drawn, text)
}

#[test]
fn test_overview_draws_every_panel_on_one_page() {
    let app = sample_app();
    let (drawn, screen) = render(&app, 160, 70);
    assert_eq!(drawn, app.panel_count());
    assert_eq!(drawn, 12);
    assert!(screen.contains("Data Preview"));
    assert!(screen.contains("Distribution of Total"));
    assert!(screen.contains("Attack vs Defense"));
    assert!(screen.contains("Distribution of Speed"));
    assert!(screen.contains("Type 1 Distribution"));
    assert!(screen.contains("Bulbasaur"));
}

#[test]
fn test_distributions_tab_draws_one_panel_per_field() {
    let mut app = sample_app();
    app.tab = Tab::Distributions;
    let (drawn, screen) = render(&app, 160, 60);
    assert_eq!(drawn, 8);
    for field in ["HP", "Attack", "Defense", "Sp. Atk", "Sp. Def", "Speed", "Generation"] {
        assert!(
            screen.contains(&format!("Distribution of {field}")),
            "missing panel for {field}"
        );
    }
    assert!(!screen.contains("Distribution of #"));
}

#[test]
fn test_types_tab_labels_bars() {
    let mut app = sample_app();
    app.tab = Tab::Types;
    let (drawn, screen) = render(&app, 140, 40);
    assert_eq!(drawn, 1);
    assert!(screen.contains("Type 1 Distribution"));
    assert!(screen.contains("Fire"));
    assert!(screen.contains("Psychic"));
}

#[test]
fn test_table_tab_colours_type_cells() {
    let mut app = sample_app();
    app.tab = Tab::Table;
    let backend = TestBackend::new(160, 40);
    let mut terminal = Terminal::new(backend).expect("test: terminal");
    terminal
        .draw(|f| {
            ui::draw(f, &app);
        })
        .expect("test: draw");

    let fire = ratatui::style::Color::from(app.palette.color_of(Some("Fire")));
    let buffer = terminal.backend().buffer();
    let fire_cells = buffer.content.iter().filter(|c| c.bg == fire).count();
    assert!(fire_cells > 0, "expected Fire-coloured cells in the table");
}

#[test]
fn test_missing_dataset_renders_notice_and_no_panels() {
    let mut app = missing_app();
    for tab in Tab::ALL {
        app.tab = tab;
        let (drawn, screen) = render(&app, 140, 40);
        assert_eq!(drawn, 0, "tab {tab:?} drew panels");
        assert!(screen.contains("dataset not found"));
        assert!(!screen.contains("Distribution of"));
    }
}

#[test]
fn test_small_terminal_shows_guard() {
    let app = sample_app();
    let (drawn, screen) = render(&app, 60, 20);
    assert_eq!(drawn, 0);
    assert!(screen.contains("Terminal too small"));
}

#[test]
fn test_help_overlay_replaces_panels() {
    let mut app = sample_app();
    app.show_help = true;
    let (drawn, screen) = render(&app, 120, 40);
    assert_eq!(drawn, 0);
    assert!(screen.contains("Keybindings"));
}

#[test]
fn test_overview_fits_minimum_terminal() {
    let app = sample_app();
    let (drawn, screen) = render(&app, 80, 24);
    assert_eq!(drawn, 12);
    assert!(screen.contains("Data Preview"));
}
