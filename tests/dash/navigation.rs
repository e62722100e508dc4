//! Tab switching, scrolling and quitting through the public event API.

use dexstream::dash::app::Tab;
use dexstream::dash::events::{apply_event, InputEvent};

use crate::fixtures::sample_app;

#[test]
fn test_full_tab_cycle_returns_to_overview() {
    let mut app = sample_app();
    let mut seen = vec![app.tab];
    for _ in 0..Tab::ALL.len() {
        apply_event(&mut app, InputEvent::NextTab);
        seen.push(app.tab);
    }
    assert_eq!(
        seen,
        vec![
            Tab::Overview,
            Tab::Distributions,
            Tab::Types,
            Tab::Table,
            Tab::Overview
        ]
    );
}

#[test]
fn test_scroll_stops_at_last_record() {
    let mut app = sample_app();
    for _ in 0..100 {
        apply_event(&mut app, InputEvent::ScrollDown);
    }
    assert_eq!(app.table_scroll, app.dataset.len() - 1);
    for _ in 0..100 {
        apply_event(&mut app, InputEvent::ScrollUp);
    }
    assert_eq!(app.table_scroll, 0);
}

#[test]
fn test_help_then_quit() {
    let mut app = sample_app();
    apply_event(&mut app, InputEvent::Help);
    assert!(app.show_help);
    apply_event(&mut app, InputEvent::Quit);
    assert!(app.should_quit);
}
