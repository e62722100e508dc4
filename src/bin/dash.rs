//! # Binary: Dataset Dashboard
//!
//! ## Responsibility
//! Entry point for the terminal dashboard. Loads the dataset once,
//! initializes the terminal, runs the event loop, and ensures clean exit.
//!
//! ## Usage
//! ```bash
//! cargo run --bin dexstream-dash
//! cargo run --bin dexstream-dash -- --data data/pokemonSet.csv
//! cargo run --bin dexstream-dash -- --config dexstream.toml
//! ```
//!
//! ## Guarantees
//! - Terminal state always restored on exit, even on panic
//! - Clean shutdown on q, Esc, or Ctrl+C
//! - A missing dataset shows a notice; a malformed one exits non-zero
//!   before the terminal is touched

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use dexstream::config::loader;
use dexstream::dash::app::App;
use dexstream::dash::events::{apply_event, poll_event};
use dexstream::dash::ui;
use dexstream::dataset::shared_dataset;
use dexstream::init_tracing_with;

/// Render refresh rate: 10 frames per second.
const TICK_RATE: Duration = Duration::from_millis(100);

/// CLI arguments for the dashboard binary.
struct CliArgs {
    /// Optional TOML config file.
    config: Option<PathBuf>,
    /// Dataset path overriding the config.
    data: Option<PathBuf>,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config: None,
        data: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                if i < args.len() {
                    cli.config = Some(PathBuf::from(&args[i]));
                }
            }
            "--data" => {
                i += 1;
                if i < args.len() {
                    cli.data = Some(PathBuf::from(&args[i]));
                }
            }
            _ => {} // Ignore unknown args
        }
        i += 1;
    }

    cli
}

/// Sets up the terminal for TUI rendering.
///
/// # Errors
/// Returns `io::Error` if terminal initialization fails.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>, io::Error> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restores the terminal to its original state.
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<(), io::Error> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = parse_args();

    let mut config = match loader::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("dexstream-dash: {e}");
            std::process::exit(1);
        }
    };
    if let Some(data) = cli.data {
        config.dashboard.data_path = data;
    }

    // Logs would corrupt the alternate screen, so they are opt-in and on stderr.
    if std::env::var_os("RUST_LOG").is_some() {
        let format = std::env::var("LOG_FORMAT")
            .unwrap_or_else(|_| config.observability.log_format.as_str().to_string());
        init_tracing_with(&format, true)?;
    }

    let loaded = match shared_dataset(&config.dashboard.data_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("dexstream-dash: {e}");
            std::process::exit(1);
        }
    };
    let mut app = App::new(loaded, &config);

    // Install panic hook that restores terminal before printing panic message
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);
    restore_terminal(&mut terminal)?;

    if let Err(e) = result {
        eprintln!("dexstream-dash: {e}");
        std::process::exit(1);
    }

    Ok(())
}

/// Runs the render/input loop until the user quits.
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), io::Error> {
    loop {
        terminal.draw(|f| {
            ui::draw(f, app);
        })?;

        let event = poll_event(TICK_RATE);
        apply_event(app, event);

        if app.should_quit {
            return Ok(());
        }
    }
}
