//! Terminal front-end for the roster.

pub mod app;
pub mod render;

use std::io::{self, Stdout};

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

pub use app::{App, Intent};
pub use render::render;

pub type RosterTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Switch the terminal to raw mode on the alternate screen.
pub fn setup_terminal() -> io::Result<RosterTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Undo [`setup_terminal`].
pub fn restore_terminal(terminal: &mut RosterTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
