//! # Module: Dashboard Event Handling
//!
//! ## Responsibility
//! Polls crossterm events and translates keyboard input into app state mutations.
//! Handles quit, tab switching, table scrolling and help overlay toggling.
//!
//! ## Guarantees
//! - Non-blocking event polling with configurable timeout
//! - No panics on any key combination
//! - Ctrl+C always triggers quit

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app::App;

/// Result of polling for a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// User pressed quit (q, Esc or Ctrl+C).
    Quit,
    /// User toggled the help overlay.
    Help,
    /// Switch to the tab on the right.
    NextTab,
    /// Switch to the tab on the left.
    PreviousTab,
    /// Scroll the table up one row.
    ScrollUp,
    /// Scroll the table down one row.
    ScrollDown,
    /// A terminal resize occurred.
    Resize(u16, u16),
    /// No actionable event within the poll window.
    None,
}

/// Polls for a single input event with the given timeout.
///
/// Returns `InputEvent::None` when nothing arrived or polling failed.
pub fn poll_event(timeout: Duration) -> InputEvent {
    let available = match event::poll(timeout) {
        Ok(v) => v,
        Err(_) => return InputEvent::None,
    };
    if !available {
        return InputEvent::None;
    }

    match event::read() {
        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => translate_key(key),
        Ok(Event::Resize(w, h)) => InputEvent::Resize(w, h),
        _ => InputEvent::None,
    }
}

/// Applies an input event to the app state.
///
/// While the help overlay is open, navigation keys close it instead of moving.
pub fn apply_event(app: &mut App, event: InputEvent) {
    if app.show_help
        && matches!(
            event,
            InputEvent::NextTab
                | InputEvent::PreviousTab
                | InputEvent::ScrollUp
                | InputEvent::ScrollDown
        )
    {
        app.show_help = false;
        return;
    }

    match event {
        InputEvent::Quit => app.should_quit = true,
        InputEvent::Help => app.show_help = !app.show_help,
        InputEvent::NextTab => app.next_tab(),
        InputEvent::PreviousTab => app.previous_tab(),
        InputEvent::ScrollUp => app.scroll_up(),
        InputEvent::ScrollDown => app.scroll_down(),
        InputEvent::Resize(_, _) | InputEvent::None => {}
    }
}

/// Translates a crossterm key event to an `InputEvent`.
fn translate_key(key: KeyEvent) -> InputEvent {
    // Ctrl+C always quits
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return InputEvent::Quit;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => InputEvent::Quit,
        KeyCode::Char('h') | KeyCode::Char('H') => InputEvent::Help,
        KeyCode::Esc => InputEvent::Quit,
        KeyCode::Tab | KeyCode::Right => InputEvent::NextTab,
        KeyCode::BackTab | KeyCode::Left => InputEvent::PreviousTab,
        KeyCode::Up => InputEvent::ScrollUp,
        KeyCode::Down => InputEvent::ScrollDown,
        _ => InputEvent::None,
    }
}
