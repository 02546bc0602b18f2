//! In-memory terminal backend for tests and headless use.
//!
//! `VirtualTerminal` models a screen buffer that grows downward without
//! scrolling, with one `char` per cell. Clones share the same screen, so a test
//! can hand one clone to a `Console` and inspect the other.

use super::{KeySource, TerminalOutput};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    color: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            color: Color::Reset,
        }
    }
}

#[derive(Debug)]
struct Screen {
    width: u16,
    rows: Vec<Vec<Cell>>,
    column: u16,
    row: u16,
    foreground: Color,
    cursor_visible: bool,
}

impl Screen {
    fn ensure_row(&mut self, row: u16) {
        let width = usize::from(self.width);
        while self.rows.len() <= usize::from(row) {
            self.rows.push(vec![Cell::default(); width]);
        }
    }

    fn put(&mut self, ch: char) {
        match ch {
            '\r' => self.column = 0,
            '\n' => {
                self.column = 0;
                self.row = self.row.saturating_add(1);
            }
            _ => {
                self.ensure_row(self.row);
                let color = self.foreground;
                self.rows[usize::from(self.row)][usize::from(self.column)] = Cell { ch, color };
                self.column += 1;
                if self.column >= self.width {
                    self.column = 0;
                    self.row = self.row.saturating_add(1);
                }
            }
        }
    }
}

/// Shared in-memory screen implementing [`TerminalOutput`].
#[derive(Debug, Clone)]
pub struct VirtualTerminal {
    screen: Arc<Mutex<Screen>>,
}

impl VirtualTerminal {
    /// Create an empty screen `width` columns wide (minimum 1).
    pub fn new(width: u16) -> Self {
        Self {
            screen: Arc::new(Mutex::new(Screen {
                width: width.max(1),
                rows: Vec::new(),
                column: 0,
                row: 0,
                foreground: Color::Reset,
                cursor_visible: true,
            })),
        }
    }

    fn screen(&self) -> MutexGuard<'_, Screen> {
        // A panic while holding the lock leaves the grid intact; keep using it.
        self.screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Text of one row with trailing blanks removed.
    pub fn line(&self, row: u16) -> String {
        let screen = self.screen();
        screen
            .rows
            .get(usize::from(row))
            .map(|cells| {
                cells
                    .iter()
                    .map(|cell| cell.ch)
                    .collect::<String>()
                    .trim_end()
                    .to_string()
            })
            .unwrap_or_default()
    }

    /// Every row up to the last non-blank one, trailing blanks removed.
    pub fn lines(&self) -> Vec<String> {
        let count = self.screen().rows.len() as u16;
        let mut lines: Vec<String> = (0..count).map(|row| self.line(row)).collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            lines.pop();
        }
        lines
    }

    /// Color a cell was written with, if the cell exists.
    pub fn color_at(&self, column: u16, row: u16) -> Option<Color> {
        let screen = self.screen();
        screen
            .rows
            .get(usize::from(row))
            .and_then(|cells| cells.get(usize::from(column)))
            .map(|cell| cell.color)
    }

    pub fn cursor(&self) -> (u16, u16) {
        let screen = self.screen();
        (screen.column, screen.row)
    }

    pub fn is_cursor_visible(&self) -> bool {
        self.screen().cursor_visible
    }
}

impl TerminalOutput for VirtualTerminal {
    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.cursor())
    }

    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        let mut screen = self.screen();
        screen.column = column.min(screen.width - 1);
        screen.row = row;
        Ok(())
    }

    fn buffer_width(&mut self) -> io::Result<u16> {
        Ok(self.screen().width)
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        let mut screen = self.screen();
        for ch in text.chars() {
            screen.put(ch);
        }
        Ok(())
    }

    fn foreground(&self) -> Color {
        self.screen().foreground
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.screen().foreground = color;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        self.screen().cursor_visible = visible;
        Ok(())
    }
}

/// Pre-recorded key presses, consumed in order.
///
/// Reading past the end fails with `UnexpectedEof` so a test with a missing
/// Enter fails instead of hanging.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one key press without modifiers.
    pub fn key(mut self, code: KeyCode) -> Self {
        self.keys.push_back(KeyEvent::new(code, KeyModifiers::NONE));
        self
    }

    /// Queue a key press with modifiers.
    pub fn key_with(mut self, code: KeyCode, modifiers: KeyModifiers) -> Self {
        self.keys.push_back(KeyEvent::new(code, modifiers));
        self
    }

    /// Queue one key press per char of `text`.
    pub fn text(mut self, text: &str) -> Self {
        for ch in text.chars() {
            self.keys
                .push_back(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        self
    }

    /// Queue `text` followed by Enter.
    pub fn line(self, text: &str) -> Self {
        self.text(text).key(KeyCode::Enter)
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        self.keys.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_raw_wraps_at_buffer_width() {
        let mut term = VirtualTerminal::new(4);
        term.write_raw("abcdef").unwrap();
        assert_eq!(term.line(0), "abcd");
        assert_eq!(term.line(1), "ef");
        assert_eq!(term.cursor(), (2, 1));
    }

    #[test]
    fn newline_moves_to_next_row_start() {
        let mut term = VirtualTerminal::new(10);
        term.write_raw("ab\r\ncd\nef").unwrap();
        assert_eq!(term.lines(), vec!["ab", "cd", "ef"]);
    }

    #[test]
    fn cells_remember_their_foreground() {
        let mut term = VirtualTerminal::new(10);
        term.set_foreground(Color::Red).unwrap();
        term.write_raw("r").unwrap();
        term.set_foreground(Color::Blue).unwrap();
        term.write_raw("b").unwrap();
        assert_eq!(term.color_at(0, 0), Some(Color::Red));
        assert_eq!(term.color_at(1, 0), Some(Color::Blue));
        assert_eq!(term.color_at(5, 3), None);
    }

    #[test]
    fn clones_share_one_screen() {
        let term = VirtualTerminal::new(10);
        let mut writer = term.clone();
        writer.set_cursor_position(2, 3).unwrap();
        writer.write_raw("x").unwrap();
        assert_eq!(term.line(3), "  x");
    }

    #[test]
    fn scripted_keys_report_eof_when_exhausted() {
        let mut keys = ScriptedKeys::new().line("a");
        assert_eq!(keys.remaining(), 2);
        assert_eq!(keys.read_key().unwrap().code, KeyCode::Char('a'));
        assert_eq!(keys.read_key().unwrap().code, KeyCode::Enter);
        let err = keys.read_key().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
