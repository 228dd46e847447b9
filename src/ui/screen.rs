use std::io::{self, Stdout, Write};

use crossterm::{
    cursor, queue,
    terminal::{Clear, ClearType},
};

/// Where prompt frames end up.
///
/// `render` repaints in place and may be called any number of times; `done`
/// paints the final answered line and moves on, leaving previous output
/// above intact.  The runner only ever talks to this trait, so tests swap in
/// a capturing implementation.
pub trait Screen: Send {
    fn render(&mut self, content: &str, bottom: &str) -> io::Result<()>;
    fn done(&mut self, content: &str) -> io::Result<()>;
}

/// Inline stdout renderer.  Tracks how many rows the previous frame took so
/// each repaint rewinds and clears exactly that region.  Assumes the
/// terminal is in raw mode (see [`crate::terminal::init`]).
pub struct TermScreen {
    out: Stdout,
    height: u16,
}

impl Default for TermScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl TermScreen {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            height: 0,
        }
    }

    fn repaint(&mut self, frame: &str) -> io::Result<()> {
        if self.height > 1 {
            queue!(self.out, cursor::MoveUp(self.height - 1))?;
        }
        queue!(self.out, cursor::MoveToColumn(0), Clear(ClearType::FromCursorDown))?;

        let mut height = 0;
        for line in frame.lines() {
            if height > 0 {
                self.out.write_all(b"\r\n")?;
            }
            self.out.write_all(line.as_bytes())?;
            height += 1;
        }
        self.height = height.max(1);
        self.out.flush()
    }
}

impl Screen for TermScreen {
    fn render(&mut self, content: &str, bottom: &str) -> io::Result<()> {
        if bottom.is_empty() {
            self.repaint(content)
        } else {
            self.repaint(&format!("{content}\n{bottom}"))
        }
    }

    fn done(&mut self, content: &str) -> io::Result<()> {
        self.repaint(content)?;
        self.out.write_all(b"\r\n")?;
        self.height = 0;
        self.out.flush()
    }
}
