//! Read/dispatch loop around the line editor.
//!
//! Each iteration opens an [`EditorSession`], reads one command, closes the
//! session, and dispatches. Handler failures (errors and panics) are reported
//! and logged; they never end the loop. Only `exit`/`quit` or a key-source
//! error does.

use crate::console::Console;
use crate::editor::{CommandHistory, EditorSession, TerminalTheme};
use crate::error::{CommandError, ConfigError};
use crate::term::KeySource;
use crate::writer::Writer;
use std::any::Any;
use std::io;
use std::panic::{catch_unwind, AssertUnwindSafe};

pub type CommandResult = Result<(), CommandError>;

type Handler<'h> = Box<dyn FnMut(&mut CommandContext<'_>, &[&str]) -> CommandResult + 'h>;
type Fallback<'h> = Box<dyn FnMut(&mut CommandContext<'_>, &str, &[&str]) -> CommandResult + 'h>;

/// What a handler gets to work with: themed output and the key source, so it
/// can prompt, open menus, or run a nested terminal.
pub struct CommandContext<'a> {
    pub writer: Writer,
    pub keys: &'a mut dyn KeySource,
}

impl<'a> CommandContext<'a> {
    pub fn new(console: &Console, keys: &'a mut dyn KeySource) -> Self {
        Self {
            writer: Writer::new(console.clone()),
            keys,
        }
    }

    pub fn with_writer(writer: Writer, keys: &'a mut dyn KeySource) -> Self {
        Self { writer, keys }
    }

    pub fn console(&self) -> &Console {
        self.writer.console()
    }

    /// Ask a question on this context's keys.
    pub fn ask(&mut self, message: &str) -> io::Result<String> {
        self.writer.ask(&mut *self.keys, message)
    }
}

/// Named commands dispatched from an in-place command prompt.
pub struct CommandTerminal<'h> {
    name: String,
    commands: Vec<(String, Handler<'h>)>,
    fallback: Option<Fallback<'h>>,
    history: CommandHistory,
    theme: TerminalTheme,
}

impl<'h> CommandTerminal<'h> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commands: Vec::new(),
            fallback: None,
            history: CommandHistory::default(),
            theme: TerminalTheme::default(),
        }
    }

    /// Terminal whose every non-exit line goes to `handler` as
    /// `(command name, arguments)`.
    pub fn with_fallback<F>(name: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut CommandContext<'_>, &str, &[&str]) -> CommandResult + 'h,
    {
        Self::new(name).fallback(handler)
    }

    /// Register `name` (matched trimmed and case-insensitively).
    ///
    /// Registrations are kept shortest name first; the first match wins. An
    /// empty name matches an empty line.
    pub fn command<F>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut CommandContext<'_>, &[&str]) -> CommandResult + 'h,
    {
        let name = name.into();
        let at = self
            .commands
            .partition_point(|(existing, _)| existing.len() <= name.len());
        self.commands.insert(at, (name, Box::new(handler)));
        self
    }

    /// Handler for lines no registered command matches.
    pub fn fallback<F>(mut self, handler: F) -> Self
    where
        F: FnMut(&mut CommandContext<'_>, &str, &[&str]) -> CommandResult + 'h,
    {
        self.fallback = Some(Box::new(handler));
        self
    }

    /// Number of history slots, live slot included. Zero is rejected.
    pub fn history_length(mut self, length: usize) -> Result<Self, ConfigError> {
        self.history = CommandHistory::new(length)?;
        Ok(self)
    }

    pub fn with_theme(mut self, theme: TerminalTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    /// Run with a default writer on `console`.
    pub fn run(&mut self, console: &Console, keys: &mut dyn KeySource) -> io::Result<()> {
        self.run_with(&mut CommandContext::new(console, keys))
    }

    /// Run until `exit`/`quit`, dispatching through `ctx`.
    pub fn run_with(&mut self, ctx: &mut CommandContext<'_>) -> io::Result<()> {
        let label = format!("{}> ", self.name);
        let console = ctx.console().clone();
        tracing::debug!(terminal = %self.name, "command terminal started");

        loop {
            let line = {
                let mut session = EditorSession::start(
                    &console,
                    &mut *ctx.keys,
                    &label,
                    &self.theme,
                    &mut self.history,
                )?;
                session.read_command()?
            };

            let mut parts = line.trim().split(' ');
            let command = parts.next().unwrap_or_default().trim();
            let args: Vec<&str> = parts.collect();

            if command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit") {
                tracing::debug!(terminal = %self.name, "command terminal closed");
                return Ok(());
            }

            let outcome = if let Some((_, handler)) = self
                .commands
                .iter_mut()
                .find(|(name, _)| name.trim().to_lowercase() == command.to_lowercase())
            {
                contain(|| handler(ctx, &args))
            } else if let Some(fallback) = self.fallback.as_mut() {
                contain(|| fallback(ctx, command, &args))
            } else {
                console.write_line("Bad command. Try again.")?;
                continue;
            };

            if let Err(err) = outcome {
                report_failure(&ctx.writer, command, &err)?;
            }
        }
    }
}

/// Run `f`, turning a panic into [`CommandError::Panicked`].
pub(crate) fn contain(f: impl FnOnce() -> CommandResult) -> CommandResult {
    catch_unwind(AssertUnwindSafe(f))
        .unwrap_or_else(|payload| Err(CommandError::Panicked(panic_message(payload.as_ref()))))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// Log a contained failure and dump it through the writer.
pub fn report_failure(writer: &Writer, origin: &str, err: &CommandError) -> io::Result<()> {
    tracing::warn!(origin, error = %err, "command failed");
    writer.write_error(err)
}
