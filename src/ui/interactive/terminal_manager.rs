//! Raw mode and alternate screen handling for the interactive calendar

use crate::error::AppError;
use crossterm::{
    cursor, execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetTitle, disable_raw_mode, enable_raw_mode,
    },
};
use std::io::stdout;

const WINDOW_TITLE: &str = "Game Release Calendar";

#[derive(Debug, Clone, Default)]
pub struct TerminalConfig {
    /// Keeps the normal screen and cooked mode so log output stays visible
    pub debug_mode: bool,
}

/// Terminal manager responsible for setup and cleanup operations
#[derive(Debug, Default)]
pub struct TerminalManager {
    config: TerminalConfig,
}

impl TerminalManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TerminalConfig) -> Self {
        Self { config }
    }

    /// Setup terminal for interactive mode.
    /// Returns a handle to stdout that can be used for rendering.
    pub fn setup_terminal(&self) -> Result<std::io::Stdout, AppError> {
        let mut stdout = stdout();
        execute!(stdout, SetTitle(WINDOW_TITLE))?;

        if !self.config.debug_mode {
            enable_raw_mode()?;
            execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        }

        Ok(stdout)
    }

    /// Restores the terminal to its original state
    pub fn cleanup_terminal(&self, mut stdout: std::io::Stdout) -> Result<(), AppError> {
        if !self.config.debug_mode {
            disable_raw_mode()?;
            execute!(stdout, cursor::Show, LeaveAlternateScreen)?;
        }
        Ok(())
    }

    pub fn config(&self) -> &TerminalConfig {
        &self.config
    }
}
