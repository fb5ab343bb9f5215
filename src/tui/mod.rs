//! Terminal shell: setup, event loop and teardown.
//!
//! The loop is single-threaded and synchronous per render pass: a control
//! change re-runs the visible sections in-line before the next draw, so a
//! slow query blocks the refresh exactly like the page it replaces.

pub mod app;
pub mod ui;
pub mod widgets;

use std::time::Duration;

use crate::dashboard::load_options;
use crate::error::{GrandlineError, Result};
use crate::query::Runner;
use app::App;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

/// How long one poll waits for input before redrawing.
const TICK: Duration = Duration::from_millis(250);

/// Runs the dashboard until the user quits.
pub async fn run(runner: &Runner) -> Result<()> {
    let options = load_options(runner).await?;
    let mut app = App::new(options);
    app.refresh(runner).await;

    enable_raw_mode().map_err(terminal_error)?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(terminal_error)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(terminal_error)?;

    let result = event_loop(&mut terminal, &mut app, runner).await;

    // Best-effort teardown; the error from the loop matters more.
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    runner: &Runner,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| ui::draw(frame, app))
            .map_err(terminal_error)?;

        if event::poll(TICK).map_err(terminal_error)? {
            if let Event::Key(key) = event::read().map_err(terminal_error)? {
                if key.kind == KeyEventKind::Press {
                    let dirty = app.handle_key(key.code);
                    if app.should_quit {
                        return Ok(());
                    }
                    if dirty {
                        app.refresh(runner).await;
                    }
                }
            }
        }
    }
}

fn terminal_error(e: std::io::Error) -> GrandlineError {
    GrandlineError::internal(format!("terminal error: {e}"))
}
