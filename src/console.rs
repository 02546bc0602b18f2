//! Shared output sink with prompt-preserving redraw.
//!
//! Every producer (components, command handlers, background threads) writes
//! through a [`Console`] handle. While an editor session is active the console
//! carries its prompt overlay, and each write runs this sequence as one
//! critical section:
//!
//! 1. record the cursor,
//! 2. blank every row from the reserved prompt row through the row below the
//!    cursor,
//! 3. restore the cursor and emit the text,
//! 4. move the reserved row to just below the new cursor row,
//! 5. redraw the prompt there.
//!
//! The prompt therefore stays the last visible line no matter who writes.

use crate::term::{CrosstermTerminal, TerminalOutput, NEWLINE};
use crossterm::style::Color;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard};

/// Glyph drawn after the buffer while the prompt is live.
pub(crate) const CURSOR_GLYPH: &str = "_";

/// One drawing instruction produced by renderers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    /// Write text at the cursor.
    Text(String),
    /// Switch the foreground color for subsequent text.
    Foreground(Color),
}

/// Prompt line owned by the active editor session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PromptOverlay {
    pub(crate) label: String,
    pub(crate) buffer: String,
    pub(crate) label_color: Color,
    pub(crate) input_color: Color,
    pub(crate) cursor_color: Color,
    pub(crate) show_cursor: bool,
    pub(crate) reserved_row: u16,
}

struct ConsoleState {
    out: Box<dyn TerminalOutput>,
    color: bool,
    prompt: Option<PromptOverlay>,
}

impl ConsoleState {
    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        if self.color {
            self.out.set_foreground(color)?;
        }
        Ok(())
    }

    fn blank_row(&mut self, row: u16, width: u16) -> io::Result<()> {
        self.out.set_cursor_position(0, row)?;
        self.out
            .write_raw(&" ".repeat(usize::from(width.saturating_sub(1))))
    }

    fn write_text(&mut self, text: &str) -> io::Result<()> {
        let Some(reserved) = self.prompt.as_ref().map(|p| p.reserved_row) else {
            return self.out.write_raw(text);
        };

        let (column, row) = self.out.cursor_position()?;
        let width = self.out.buffer_width()?;
        for blank in reserved..=row.saturating_add(1) {
            self.blank_row(blank, width)?;
        }
        self.out.set_cursor_position(column, row)?;

        self.out.write_raw(text)?;

        let (_, after) = self.out.cursor_position()?;
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.reserved_row = after.saturating_add(1);
        }
        self.draw_prompt()
    }

    fn draw_prompt(&mut self) -> io::Result<()> {
        let Some(prompt) = self.prompt.clone() else {
            return Ok(());
        };

        let (column, row) = self.out.cursor_position()?;
        let saved = self.out.foreground();
        let width = self.out.buffer_width()?;

        self.blank_row(prompt.reserved_row, width)?;
        self.out.set_cursor_position(0, prompt.reserved_row)?;

        self.set_fg(prompt.label_color)?;
        self.out.write_raw(&prompt.label)?;
        self.set_fg(prompt.input_color)?;
        self.out.write_raw(&prompt.buffer)?;
        if prompt.show_cursor {
            self.set_fg(prompt.cursor_color)?;
            self.out.write_raw(CURSOR_GLYPH)?;
        }

        self.out.set_cursor_position(column, row)?;
        self.set_fg(saved)
    }
}

/// Clonable handle to the process' terminal output.
#[derive(Clone)]
pub struct Console {
    state: Arc<Mutex<ConsoleState>>,
}

impl std::fmt::Debug for Console {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("Console")
            .field("color", &state.color)
            .field("prompt", &state.prompt)
            .finish()
    }
}

impl Console {
    /// Wrap a terminal backend. Color output starts enabled.
    pub fn new(output: impl TerminalOutput + 'static) -> Self {
        Self {
            state: Arc::new(Mutex::new(ConsoleState {
                out: Box::new(output),
                color: true,
                prompt: None,
            })),
        }
    }

    /// Console on the process' real stdout.
    pub fn stdout() -> Self {
        Self::new(CrosstermTerminal::stdout())
    }

    /// Enable or disable foreground color changes.
    pub fn with_color(self, enabled: bool) -> Self {
        self.state().color = enabled;
        self
    }

    pub fn color_enabled(&self) -> bool {
        self.state().color
    }

    fn state(&self) -> MutexGuard<'_, ConsoleState> {
        // Keep the terminal usable after a producer panicked mid-write.
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self, text: &str) -> io::Result<()> {
        self.state().write_text(text)
    }

    pub fn write_line(&self, text: &str) -> io::Result<()> {
        self.state().write_text(&format!("{text}{NEWLINE}"))
    }

    pub fn new_line(&self) -> io::Result<()> {
        self.write(NEWLINE)
    }

    /// Write `text` in `color`, then restore the previous color.
    pub fn write_colored(&self, text: &str, color: Color) -> io::Result<()> {
        self.draw(&[DrawOp::Foreground(color), DrawOp::Text(text.to_string())])
    }

    pub fn write_colored_line(&self, text: &str, color: Color) -> io::Result<()> {
        self.draw(&[
            DrawOp::Foreground(color),
            DrawOp::Text(format!("{text}{NEWLINE}")),
        ])
    }

    /// Apply a batch of drawing ops under one lock.
    ///
    /// The foreground color in effect before the batch is restored afterwards,
    /// also when a write fails midway.
    pub fn draw(&self, ops: &[DrawOp]) -> io::Result<()> {
        let mut state = self.state();
        let saved = state.out.foreground();
        let result = ops.iter().try_for_each(|op| match op {
            DrawOp::Text(text) => state.write_text(text),
            DrawOp::Foreground(color) => state.set_fg(*color),
        });
        let restored = state.set_fg(saved);
        result.and(restored)
    }

    pub fn buffer_width(&self) -> io::Result<u16> {
        self.state().out.buffer_width()
    }

    pub fn cursor_position(&self) -> io::Result<(u16, u16)> {
        self.state().out.cursor_position()
    }

    pub fn set_cursor_position(&self, column: u16, row: u16) -> io::Result<()> {
        self.state().out.set_cursor_position(column, row)
    }

    pub fn foreground(&self) -> Color {
        self.state().out.foreground()
    }

    pub fn set_foreground(&self, color: Color) -> io::Result<()> {
        self.state().set_fg(color)
    }

    /// Erase the char left of the cursor (line-local; no effect at column 0).
    pub fn erase_previous_char(&self) -> io::Result<()> {
        let mut state = self.state();
        let (column, row) = state.out.cursor_position()?;
        if column == 0 {
            return Ok(());
        }
        state.out.set_cursor_position(column - 1, row)?;
        state.out.write_raw(" ")?;
        state.out.set_cursor_position(column - 1, row)
    }

    /// Install `overlay` one row below the cursor and hide the cursor.
    ///
    /// Returns the overlay that was active before, which the caller must hand
    /// back to [`Console::restore_prompt`].
    pub(crate) fn install_prompt(
        &self,
        mut overlay: PromptOverlay,
    ) -> io::Result<Option<PromptOverlay>> {
        let mut state = self.state();
        let (_, row) = state.out.cursor_position()?;
        overlay.reserved_row = row.saturating_add(1);
        tracing::debug!(row = overlay.reserved_row, "prompt overlay installed");
        let previous = state.prompt.replace(overlay);
        state.out.set_cursor_visible(false)?;
        Ok(previous)
    }

    /// Put back the overlay that was active before the current session.
    pub(crate) fn restore_prompt(&self, previous: Option<PromptOverlay>) -> io::Result<()> {
        let mut state = self.state();
        state.prompt = previous;
        if state.prompt.is_none() {
            tracing::debug!("prompt overlay removed");
            return state.out.set_cursor_visible(true);
        }
        let (_, cursor_row) = state.out.cursor_position()?;
        if let Some(prompt) = state.prompt.as_mut() {
            prompt.reserved_row = cursor_row.saturating_add(1);
        }
        tracing::debug!("outer prompt overlay restored");
        state.draw_prompt()
    }

    /// Replace the overlay buffer and redraw the prompt.
    pub(crate) fn update_prompt(&self, buffer: &str) -> io::Result<()> {
        let mut state = self.state();
        if let Some(prompt) = state.prompt.as_mut() {
            prompt.buffer.clear();
            prompt.buffer.push_str(buffer);
            prompt.show_cursor = true;
        }
        state.draw_prompt()
    }

    /// Draw the committed line without the cursor glyph and step past it.
    pub(crate) fn commit_prompt(&self, buffer: &str) -> io::Result<()> {
        let mut state = self.state();
        if let Some(prompt) = state.prompt.as_mut() {
            prompt.buffer.clear();
            prompt.buffer.push_str(buffer);
            prompt.show_cursor = false;
        }
        state.draw_prompt()?;
        let (column, row) = state.out.cursor_position()?;
        state.out.set_cursor_position(column, row.saturating_add(2))?;
        if let Some(prompt) = state.prompt.as_mut() {
            prompt.reserved_row = prompt.reserved_row.saturating_add(2);
        }
        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn reserved_row(&self) -> Option<u16> {
        self.state().prompt.as_ref().map(|p| p.reserved_row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::virtual_console;

    fn overlay(label: &str) -> PromptOverlay {
        PromptOverlay {
            label: label.to_string(),
            buffer: String::new(),
            label_color: Color::Grey,
            input_color: Color::White,
            cursor_color: Color::DarkGrey,
            show_cursor: true,
            reserved_row: 0,
        }
    }

    #[test]
    fn writes_pass_through_without_overlay() {
        let (console, term) = virtual_console(20);
        console.write_line("hello").unwrap();
        console.write("world").unwrap();
        assert_eq!(term.lines(), vec!["hello", "world"]);
    }

    #[test]
    fn write_colored_restores_previous_color() {
        let (console, term) = virtual_console(20);
        console.set_foreground(Color::Green).unwrap();
        console.write_colored("x", Color::Red).unwrap();
        assert_eq!(term.color_at(0, 0), Some(Color::Red));
        assert_eq!(console.foreground(), Color::Green);
    }

    #[test]
    fn disabled_color_never_touches_the_terminal_color() {
        let (console, term) = virtual_console(20);
        let console = console.with_color(false);
        console.write_colored("x", Color::Red).unwrap();
        assert_eq!(term.color_at(0, 0), Some(Color::Reset));
    }

    #[test]
    fn prompt_stays_below_intercepted_output() {
        let (console, term) = virtual_console(20);
        let previous = console.install_prompt(overlay("> ")).unwrap();
        assert!(previous.is_none());
        assert!(!term.is_cursor_visible());
        console.update_prompt("ab").unwrap();
        assert_eq!(term.lines(), vec!["", "> ab_"]);

        console.write_line("first").unwrap();
        console.write_line("second").unwrap();
        assert_eq!(term.lines(), vec!["first", "second", "", "> ab_"]);
        assert_eq!(console.reserved_row(), Some(3));
    }

    #[test]
    fn partial_line_output_keeps_prompt_on_next_row() {
        let (console, term) = virtual_console(20);
        console.install_prompt(overlay("> ")).unwrap();
        console.write("50%").unwrap();
        assert_eq!(term.lines(), vec!["50%", "> _"]);
        console.set_cursor_position(0, 0).unwrap();
        console.write("60%").unwrap();
        assert_eq!(term.lines(), vec!["60%", "> _"]);
    }

    #[test]
    fn commit_drops_cursor_glyph_and_advances_two_rows() {
        let (console, term) = virtual_console(20);
        console.install_prompt(overlay("> ")).unwrap();
        console.update_prompt("ls").unwrap();
        console.commit_prompt("ls").unwrap();
        assert_eq!(term.lines(), vec!["", "> ls"]);
        assert_eq!(term.cursor(), (0, 2));
        assert_eq!(console.reserved_row(), Some(3));
    }

    #[test]
    fn restore_reinstalls_outer_prompt_below_cursor() {
        let (console, term) = virtual_console(20);
        let before_outer = console.install_prompt(overlay("outer> ")).unwrap();
        assert!(before_outer.is_none());
        let saved = console.install_prompt(overlay("inner> ")).unwrap();
        assert_eq!(saved.as_ref().map(|p| p.label.as_str()), Some("outer> "));

        console.restore_prompt(saved).unwrap();
        assert!(term.lines().last().unwrap().starts_with("outer> "));
        console.restore_prompt(before_outer).unwrap();
        assert_eq!(console.reserved_row(), None);
        assert!(term.is_cursor_visible());
    }

    #[test]
    fn prompt_colors_follow_overlay() {
        let (console, term) = virtual_console(20);
        console.install_prompt(overlay("> ")).unwrap();
        console.update_prompt("a").unwrap();
        assert_eq!(term.color_at(0, 1), Some(Color::Grey));
        assert_eq!(term.color_at(2, 1), Some(Color::White));
        assert_eq!(term.color_at(3, 1), Some(Color::DarkGrey));
        assert_eq!(console.foreground(), Color::Reset);
    }
}
