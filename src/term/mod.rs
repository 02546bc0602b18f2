//! Terminal capability surface shared by every component.
//!
//! Output and input are separate traits: key reads block, and a blocked reader
//! must never hold the output side hostage while background producers write.

mod crossterm_backend;
mod virtual_terminal;

use crossterm::event::KeyEvent;
use crossterm::style::Color;
use std::io;

pub use crossterm_backend::{CrosstermKeys, CrosstermTerminal};
pub use virtual_terminal::{ScriptedKeys, VirtualTerminal};

/// Line terminator written by every component.
///
/// Carriage return first so output stays aligned while the terminal is in raw
/// mode.
pub const NEWLINE: &str = "\r\n";

/// Output half of a terminal: cursor addressing, width, raw writes, color.
pub trait TerminalOutput: Send {
    /// Current cursor `(column, row)`, zero based.
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;

    /// Move the cursor to `(column, row)`.
    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()>;

    /// Width of the screen buffer in columns.
    fn buffer_width(&mut self) -> io::Result<u16>;

    /// Write text as-is; no newline translation is applied.
    fn write_raw(&mut self, text: &str) -> io::Result<()>;

    /// Foreground color currently in effect.
    fn foreground(&self) -> Color;

    fn set_foreground(&mut self, color: Color) -> io::Result<()>;

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()>;
}

/// Input half of a terminal: one blocking key read at a time.
pub trait KeySource {
    /// Block until the next key press is available.
    fn read_key(&mut self) -> io::Result<KeyEvent>;
}

impl<K: KeySource + ?Sized> KeySource for &mut K {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        (**self).read_key()
    }
}
