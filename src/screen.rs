// Raw mode / alternate screen setup that undoes itself on drop

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Runs `restore` when dropped, so every exit path after raw mode was
/// enabled hands a usable terminal back to the shell.
pub struct TerminalGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

pub fn enter() -> io::Result<TerminalGuard<fn()>> {
    enter_with(
        enable_raw_mode,
        || execute!(io::stdout(), EnterAlternateScreen),
        restore as fn(),
    )
}

fn restore() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}

fn enter_with<F: FnMut()>(
    enable: impl FnOnce() -> io::Result<()>,
    switch_screen: impl FnOnce() -> io::Result<()>,
    restore: F,
) -> io::Result<TerminalGuard<F>> {
    enable()?;
    // From here on a failure must still leave raw mode
    let guard = TerminalGuard { restore };
    switch_screen()?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_failed_screen_switch_still_restores() {
        let restored = Cell::new(0);
        let result = enter_with(
            || Ok(()),
            || Err(io::Error::other("no alternate screen")),
            || restored.set(restored.get() + 1),
        );

        assert!(result.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_failed_raw_mode_restores_nothing() {
        let restored = Cell::new(0);
        let result = enter_with(
            || Err(io::Error::other("not a tty")),
            || Ok(()),
            || restored.set(restored.get() + 1),
        );

        assert!(result.is_err());
        assert_eq!(restored.get(), 0);
    }

    #[test]
    fn test_guard_restores_once_on_drop() {
        let restored = Cell::new(0);
        let guard = enter_with(|| Ok(()), || Ok(()), || restored.set(restored.get() + 1)).unwrap();
        assert_eq!(restored.get(), 0);

        drop(guard);
        assert_eq!(restored.get(), 1);
    }
}
