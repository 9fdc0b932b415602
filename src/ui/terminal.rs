use crate::core::error::Result;
use crossterm::{
    cursor, execute,
    style::ResetColor,
    terminal::{
        self, disable_raw_mode, enable_raw_mode, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use std::io::{self, Stdout};

pub struct TerminalManager {
    stdout: Stdout,
    active: bool,
}

impl TerminalManager {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            active: false,
        }
    }

    pub fn setup(&mut self) -> Result<()> {
        enable_raw_mode()?;
        self.active = true;
        execute!(
            self.stdout,
            terminal::Clear(ClearType::All),
            EnterAlternateScreen,
            terminal::SetTitle("lingo-sync"),
            cursor::Hide
        )?;
        Ok(())
    }

    /// Idempotent; safe to call without a prior setup.
    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        disable_raw_mode()?;
        execute!(
            self.stdout,
            ResetColor,
            terminal::Clear(ClearType::All),
            LeaveAlternateScreen,
            cursor::Show,
            cursor::MoveTo(0, 0)
        )?;
        Ok(())
    }
}

impl Default for TerminalManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Backstop for error paths that skip `cleanup`: the terminal is restored
/// whenever an active manager is dropped.
impl Drop for TerminalManager {
    fn drop(&mut self) {
        if self.active {
            let _ = disable_raw_mode();
            let _ = execute!(self.stdout, LeaveAlternateScreen, cursor::Show);
        }
    }
}

/// Restores the terminal even when a draw or handler panics.
pub fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
        default_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleanup_without_setup_is_a_noop() {
        let mut mgr = TerminalManager::new();
        assert!(mgr.cleanup().is_ok());
        // And it stays a no-op on repeat calls.
        assert!(mgr.cleanup().is_ok());
    }

    #[test]
    fn dropping_an_inactive_manager_touches_nothing() {
        // Runs headless: an inactive manager must not write to the terminal.
        let mgr = TerminalManager::new();
        drop(mgr);
    }
}
