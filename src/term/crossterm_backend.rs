//! Real terminal backend built on crossterm.

use super::{KeySource, TerminalOutput};
use crossterm::cursor::{self, Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::{Color, Print, SetForegroundColor};
use crossterm::terminal;
use crossterm::QueueableCommand;
use std::io::{self, Write};
use std::time::Duration;

/// Width reported when the terminal size cannot be queried.
const FALLBACK_COLUMNS: u16 = 80;
/// Longest stretch a key wait holds crossterm's event reader.
const KEY_POLL_INTERVAL: Duration = Duration::from_millis(80);

/// Stdout-backed terminal output.
///
/// crossterm has no foreground-color query, so the last color set through
/// this handle is tracked locally.
pub struct CrosstermTerminal {
    out: io::Stdout,
    foreground: Color,
}

impl CrosstermTerminal {
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            foreground: Color::Reset,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::stdout()
    }
}

impl TerminalOutput for CrosstermTerminal {
    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        // Pending output must land before the terminal can report a position.
        self.out.flush()?;
        cursor::position()
    }

    fn set_cursor_position(&mut self, column: u16, row: u16) -> io::Result<()> {
        self.out.queue(MoveTo(column, row))?;
        self.out.flush()
    }

    fn buffer_width(&mut self) -> io::Result<u16> {
        Ok(terminal::size()
            .map(|(cols, _)| cols)
            .unwrap_or(FALLBACK_COLUMNS))
    }

    fn write_raw(&mut self, text: &str) -> io::Result<()> {
        self.out.queue(Print(text))?;
        self.out.flush()
    }

    fn foreground(&self) -> Color {
        self.foreground
    }

    fn set_foreground(&mut self, color: Color) -> io::Result<()> {
        self.out.queue(SetForegroundColor(color))?;
        self.foreground = color;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> io::Result<()> {
        if visible {
            self.out.queue(Show)?;
        } else {
            self.out.queue(Hide)?;
        }
        self.out.flush()
    }
}

/// Blocking key reader that keeps the terminal in raw mode while alive.
///
/// Ctrl-C surfaces as an `Interrupted` error: raw mode disables the signal, so
/// this is the only way out of a read loop short of killing the process.
pub struct CrosstermKeys {
    _guard: RawModeGuard,
}

impl CrosstermKeys {
    pub fn acquire() -> io::Result<Self> {
        Ok(Self {
            _guard: RawModeGuard::acquire()?,
        })
    }
}

impl KeySource for CrosstermKeys {
    fn read_key(&mut self) -> io::Result<KeyEvent> {
        next_key(event::poll, event::read)
    }
}

/// Wait for the next key press, polling in short slices.
///
/// crossterm's event reader lock is held for as long as a read blocks, and
/// `cursor::position` needs that lock to see the terminal's reply. Polling
/// releases it between slices so other threads can keep writing.
fn next_key<P, R>(mut poll: P, mut read: R) -> io::Result<KeyEvent>
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    loop {
        if !poll(KEY_POLL_INTERVAL)? {
            continue;
        }
        let Event::Key(key) = read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press && key.kind != KeyEventKind::Repeat {
            continue;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Err(io::Error::new(
                io::ErrorKind::Interrupted,
                "input interrupted by ctrl-c",
            ));
        }
        return Ok(key);
    }
}

/// Raw mode lifetime guard so terminal state is restored on any return path.
struct RawModeGuard;

impl RawModeGuard {
    fn acquire() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    fn key(code: KeyCode, modifiers: KeyModifiers, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            state: KeyEventState::NONE,
        })
    }

    #[test]
    fn waits_in_poll_slices_and_reads_only_when_ready() {
        let calls = RefCell::new(Vec::new());
        let mut ready = VecDeque::from([false, false, true]);
        let got = next_key(
            |timeout| {
                calls.borrow_mut().push(format!("poll {}ms", timeout.as_millis()));
                Ok(ready.pop_front().unwrap_or(true))
            },
            || {
                calls.borrow_mut().push("read".to_string());
                Ok(key(KeyCode::Char('x'), KeyModifiers::NONE, KeyEventKind::Press))
            },
        )
        .unwrap();
        assert_eq!(got.code, KeyCode::Char('x'));
        assert_eq!(
            calls.into_inner(),
            vec!["poll 80ms", "poll 80ms", "poll 80ms", "read"]
        );
    }

    #[test]
    fn skips_releases_and_non_key_events() {
        let mut events = VecDeque::from([
            Event::FocusGained,
            key(KeyCode::Char('a'), KeyModifiers::NONE, KeyEventKind::Release),
            key(KeyCode::Enter, KeyModifiers::NONE, KeyEventKind::Press),
        ]);
        let got = next_key(|_| Ok(true), || Ok(events.pop_front().unwrap())).unwrap();
        assert_eq!(got.code, KeyCode::Enter);
        assert!(events.is_empty());
    }

    #[test]
    fn ctrl_c_is_an_interrupt() {
        let err = next_key(
            |_| Ok(true),
            || Ok(key(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyEventKind::Press)),
        )
        .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Interrupted);
    }

    #[test]
    fn poll_errors_propagate() {
        let err = next_key(
            |_| Err(io::Error::other("tty gone")),
            || -> io::Result<Event> { unreachable!("read must not run after a failed poll") },
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "tty gone");
    }
}
