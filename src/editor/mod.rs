//! Single-line command editor that keeps its prompt below concurrent output.
//!
//! An [`EditorSession`] installs a prompt overlay on the [`Console`]; from then
//! on every write from any producer is redrawn above the prompt (see
//! [`crate::console`]). The session keystroke logic lives in [`EditorState`],
//! which is pure and independent of the terminal.

mod history;

pub use history::CommandHistory;

use crate::console::{Console, PromptOverlay};
use crate::term::KeySource;
use crate::theme::ThemeColors;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Color;
use std::io;

/// Colors of the command prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalTheme {
    pub prompt_color: Color,
    pub input_color: Color,
    pub cursor_color: Color,
}

impl Default for TerminalTheme {
    fn default() -> Self {
        Self {
            prompt_color: Color::Grey,
            input_color: Color::White,
            cursor_color: Color::DarkGrey,
        }
    }
}

impl ThemeColors for TerminalTheme {
    const SECTION: &'static str = "terminal";

    fn color_slot(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            "prompt" => Some(&mut self.prompt_color),
            "input" => Some(&mut self.input_color),
            "cursor" => Some(&mut self.cursor_color),
            _ => None,
        }
    }

    fn color_keys() -> &'static [&'static str] {
        &["prompt", "input", "cursor"]
    }
}

/// What the caller should do after a key was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Redraw the prompt and keep reading.
    Continue,
    /// Enter was pressed; the buffer is the committed command.
    Submit,
}

/// Buffer and history position of the command being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorState {
    buffer: String,
    offset: usize,
}

impl EditorState {
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Distance of the displayed history slot from the live one.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn into_buffer(self) -> String {
        self.buffer
    }

    pub fn apply(&mut self, key: &KeyEvent, history: &mut CommandHistory) -> KeyOutcome {
        match key.code {
            KeyCode::Enter => return KeyOutcome::Submit,
            KeyCode::Char(ch) if is_printable(ch, key.modifiers) => {
                self.buffer.push(ch);
                self.edit_live(history);
            }
            KeyCode::Backspace | KeyCode::Delete => {
                self.buffer.pop();
                self.edit_live(history);
            }
            KeyCode::Up => {
                if let Some((offset, text)) = history.older(self.offset) {
                    self.offset = offset;
                    self.buffer = text.to_string();
                }
            }
            KeyCode::Down if self.offset > 0 => match history.newer(self.offset) {
                Some((offset, text)) => {
                    self.offset = offset;
                    self.buffer = text.to_string();
                }
                None => {
                    self.offset = 0;
                    self.buffer = history.live().to_string();
                }
            },
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn edit_live(&mut self, history: &mut CommandHistory) {
        history.set_live(&self.buffer);
        self.offset = 0;
    }
}

fn is_printable(ch: char, modifiers: KeyModifiers) -> bool {
    (' '..='~').contains(&ch) && !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

/// Active prompt on a console.
///
/// Creating the session reserves the row below the cursor and hides the
/// cursor; dropping it puts back whatever prompt was active before, so nested
/// sessions unwind in order.
pub struct EditorSession<'a, K: KeySource> {
    console: &'a Console,
    keys: K,
    history: &'a mut CommandHistory,
    previous: Option<PromptOverlay>,
}

impl<'a, K: KeySource> EditorSession<'a, K> {
    pub fn start(
        console: &'a Console,
        keys: K,
        label: &str,
        theme: &TerminalTheme,
        history: &'a mut CommandHistory,
    ) -> io::Result<Self> {
        let previous = console.install_prompt(PromptOverlay {
            label: label.to_string(),
            buffer: String::new(),
            label_color: theme.prompt_color,
            input_color: theme.input_color,
            cursor_color: theme.cursor_color,
            show_cursor: true,
            reserved_row: 0,
        })?;
        tracing::debug!(label, nested = previous.is_some(), "editor session started");
        Ok(Self {
            console,
            keys,
            history,
            previous,
        })
    }

    /// Block until Enter and return the submitted line.
    pub fn read_command(&mut self) -> io::Result<String> {
        self.history.begin_cycle();
        let mut state = EditorState::default();
        self.console.update_prompt("")?;
        loop {
            let key = self.keys.read_key()?;
            match state.apply(&key, self.history) {
                KeyOutcome::Continue => self.console.update_prompt(state.buffer())?,
                KeyOutcome::Submit => {
                    self.console.commit_prompt(state.buffer())?;
                    return Ok(state.into_buffer());
                }
            }
        }
    }
}

impl<K: KeySource> Drop for EditorSession<'_, K> {
    fn drop(&mut self) {
        if let Err(err) = self.console.restore_prompt(self.previous.take()) {
            tracing::warn!(error = %err, "failed to restore prompt overlay");
        }
    }
}

/// Read one echoed line without an overlay.
///
/// Typed chars are written in `color`; Backspace erases the last one; Enter
/// ends the line and moves to the next row.
pub fn read_plain_line(
    console: &Console,
    keys: &mut dyn KeySource,
    color: Color,
) -> io::Result<String> {
    let mut line = String::new();
    loop {
        let key = keys.read_key()?;
        match key.code {
            KeyCode::Enter => {
                console.new_line()?;
                return Ok(line);
            }
            KeyCode::Backspace => {
                if line.pop().is_some() {
                    console.erase_previous_char()?;
                }
            }
            KeyCode::Char(ch) if is_printable(ch, key.modifiers) => {
                line.push(ch);
                console.write_colored(ch.encode_utf8(&mut [0; 4]), color)?;
            }
            _ => {}
        }
    }
}
