use std::io::{self, stdout};
use std::panic::{set_hook, take_hook};

use crossterm::{cursor, execute, terminal};

/// Puts the terminal in raw mode and hides the hardware cursor for the
/// duration of a prompt; the prompt paints the typed line itself.
pub fn init() -> io::Result<()> {
    terminal::enable_raw_mode()?;
    execute!(stdout(), cursor::Hide)?;
    Ok(())
}

pub fn restore() -> io::Result<()> {
    execute!(stdout(), cursor::Show)?;
    terminal::disable_raw_mode()
}

pub fn init_panic_hook() {
    let original_hook = take_hook();
    set_hook(Box::new(move |panic_info| {
        // intentionally ignore errors here since we're already in a panic
        let _ = restore();
        original_hook(panic_info);
    }));
}
