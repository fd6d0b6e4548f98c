use crate::app::error::{context, Result, TerminalErrorExt};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};

pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Restores the terminal when dropped, including on early returns and panics.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn new() -> Result<(Self, AppTerminal)> {
        tracing::info!("Initializing fullscreen terminal");

        if let Err(e) = enable_raw_mode() {
            tracing::error!("Failed to enable raw mode: {}", e);
            return Err(context::terminal_init(format!("Failed to enable raw mode: {}", e)));
        }
        // From here on the guard owns cleanup
        let guard = TerminalGuard { _private: () };

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            tracing::error!("Failed to enter alternate screen: {}", e);
            return Err(e.with_terminal_context(true, false));
        }

        let backend = CrosstermBackend::new(stdout);
        let mut terminal =
            Terminal::new(backend).map_err(|e| e.with_terminal_context(true, true))?;

        terminal.clear()?;
        terminal.hide_cursor()?;

        tracing::info!("Terminal initialized successfully");
        Ok((guard, terminal))
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        tracing::info!("Cleaning up terminal");

        if let Err(e) = disable_raw_mode() {
            tracing::error!("Failed to disable raw mode during cleanup: {}", e);
        }

        let mut stdout = io::stdout();
        if let Err(e) = execute!(
            stdout,
            DisableMouseCapture,
            LeaveAlternateScreen,
            crossterm::cursor::Show
        ) {
            tracing::error!("Failed to leave alternate screen during cleanup: {}", e);
            eprintln!(
                "Failed to restore terminal. Run `reset` or restart your terminal to recover: {}",
                e
            );
        }

        if let Err(e) = stdout.flush() {
            tracing::error!("Failed to flush stdout during cleanup: {}", e);
        }

        tracing::info!("Terminal cleanup completed");
    }
}
