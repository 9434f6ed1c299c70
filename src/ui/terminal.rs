//! Raw-mode terminal owned for the lifetime of the form screen.

use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout, Write};

pub type FormTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Puts the terminal in raw mode on the alternate screen and restores it
/// when dropped, including on early `?` returns.
pub struct TerminalScreen {
    terminal: FormTerminal,
    restored: bool,
}

impl TerminalScreen {
    pub fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            restore_terminal();
            return Err(e).context("Failed to enter alternate screen");
        }
        let terminal = Terminal::new(CrosstermBackend::new(stdout))
            .context("Failed to create terminal backend")?;
        Ok(Self {
            terminal,
            restored: false,
        })
    }

    pub fn terminal(&mut self) -> &mut FormTerminal {
        &mut self.terminal
    }

    /// Restore now instead of on drop
    pub fn leave(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if !self.restored {
            self.restored = true;
            restore_terminal();
        }
    }
}

impl Drop for TerminalScreen {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Best-effort terminal reset; also used by the panic hook
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, Show);
    let _ = io::stdout().flush();
}

/// Restore the terminal before the panic message is printed
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));
}
