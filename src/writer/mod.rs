//! Themed message printers, error dumps, value dumps, and question prompts.

mod dump;

pub use dump::DumpValue;

use crate::console::{Console, DrawOp};
use crate::editor::read_plain_line;
use crate::term::{KeySource, NEWLINE};
use crate::text::{chunk_by_width, visible_width};
use crate::theme::ThemeColors;
use crossterm::style::Color;
use std::error::Error;
use std::io;
use std::str::FromStr;

/// Indentation added per level of an error's cause chain.
const CAUSE_INDENT: usize = 3;

/// Colors, prefixes, and glyphs used by [`Writer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterTheme {
    pub caption_color: Color,
    pub caption_side_arm: char,
    pub separator_char: char,
    pub separator_color: Color,
    pub message_prefix: String,
    pub message_color: Color,
    pub success_prefix: String,
    pub success_color: Color,
    pub warning_prefix: String,
    pub warning_color: Color,
    pub error_prefix: String,
    pub error_color: Color,
    pub question_prefix: String,
    pub question_color: Color,
    pub user_input_color: Color,
    pub error_kind_color: Color,
    pub error_message_color: Color,
    pub error_detail_color: Color,
    pub schema_color: Color,
    pub type_color: Color,
    pub property_color: Color,
    pub value_color: Color,
}

impl Default for WriterTheme {
    fn default() -> Self {
        Self {
            caption_color: Color::Cyan,
            caption_side_arm: '=',
            separator_char: '-',
            separator_color: Color::DarkGrey,
            message_prefix: "> ".to_string(),
            message_color: Color::Grey,
            success_prefix: "> ".to_string(),
            success_color: Color::Green,
            warning_prefix: "> ".to_string(),
            warning_color: Color::Yellow,
            error_prefix: "> ".to_string(),
            error_color: Color::Red,
            question_prefix: ">> ".to_string(),
            question_color: Color::Grey,
            user_input_color: Color::White,
            error_kind_color: Color::DarkRed,
            error_message_color: Color::White,
            error_detail_color: Color::Grey,
            schema_color: Color::DarkGrey,
            type_color: Color::DarkRed,
            property_color: Color::Grey,
            value_color: Color::White,
        }
    }
}

impl ThemeColors for WriterTheme {
    const SECTION: &'static str = "writer";

    fn color_slot(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "caption" => &mut self.caption_color,
            "separator" => &mut self.separator_color,
            "message" => &mut self.message_color,
            "success" => &mut self.success_color,
            "warning" => &mut self.warning_color,
            "error" => &mut self.error_color,
            "question" => &mut self.question_color,
            "input" => &mut self.user_input_color,
            "error_kind" => &mut self.error_kind_color,
            "error_message" => &mut self.error_message_color,
            "error_detail" => &mut self.error_detail_color,
            "schema" => &mut self.schema_color,
            "type" => &mut self.type_color,
            "property" => &mut self.property_color,
            "value" => &mut self.value_color,
            _ => return None,
        };
        Some(slot)
    }

    fn color_keys() -> &'static [&'static str] {
        &[
            "caption",
            "separator",
            "message",
            "success",
            "warning",
            "error",
            "question",
            "input",
            "error_kind",
            "error_message",
            "error_detail",
            "schema",
            "type",
            "property",
            "value",
        ]
    }
}

/// Themed output helpers bound to a console.
#[derive(Debug, Clone)]
pub struct Writer {
    console: Console,
    theme: WriterTheme,
}

impl Writer {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            theme: WriterTheme::default(),
        }
    }

    pub fn with_theme(mut self, theme: WriterTheme) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &WriterTheme {
        &self.theme
    }

    pub fn console(&self) -> &Console {
        &self.console
    }

    fn width(&self) -> io::Result<usize> {
        Ok(usize::from(self.console.buffer_width()?))
    }

    /// `==== [caption] ====` framed by blank lines.
    pub fn print_caption(&self, caption: &str) -> io::Result<()> {
        let width = self.width()?;
        let arm_len = width.saturating_sub(visible_width(caption) + 4) / 2;
        let arm: String = std::iter::repeat(self.theme.caption_side_arm)
            .take(arm_len)
            .collect();
        self.console.draw(&[
            DrawOp::Text(NEWLINE.to_string()),
            DrawOp::Foreground(self.theme.caption_color),
            DrawOp::Text(format!("{arm} [{caption}] {arm}{NEWLINE}")),
            DrawOp::Text(NEWLINE.to_string()),
        ])
    }

    pub fn print_message(&self, message: &str) -> io::Result<()> {
        self.prefixed(false, &self.theme.message_prefix, message, self.theme.message_color)
    }

    pub fn print_success(&self, message: &str) -> io::Result<()> {
        self.prefixed(true, &self.theme.success_prefix, message, self.theme.success_color)
    }

    pub fn print_warning(&self, message: &str) -> io::Result<()> {
        self.prefixed(true, &self.theme.warning_prefix, message, self.theme.warning_color)
    }

    pub fn print_error(&self, message: &str) -> io::Result<()> {
        self.prefixed(true, &self.theme.error_prefix, message, self.theme.error_color)
    }

    fn prefixed(&self, gap: bool, prefix: &str, message: &str, color: Color) -> io::Result<()> {
        let mut ops = Vec::with_capacity(3);
        if gap {
            ops.push(DrawOp::Text(NEWLINE.to_string()));
        }
        ops.push(DrawOp::Foreground(color));
        ops.push(DrawOp::Text(format!("{prefix}{message}{NEWLINE}")));
        self.console.draw(&ops)
    }

    /// A full-width rule framed by blank lines.
    pub fn print_separator(&self) -> io::Result<()> {
        let width = self.width()?;
        let rule: String = std::iter::repeat(self.theme.separator_char)
            .take(width.saturating_sub(1))
            .collect();
        self.console.draw(&[
            DrawOp::Text(NEWLINE.to_string()),
            DrawOp::Foreground(self.theme.separator_color),
            DrawOp::Text(format!("{rule}{NEWLINE}")),
            DrawOp::Text(NEWLINE.to_string()),
        ])
    }

    pub fn write_colored_text(&self, text: &str, color: Color) -> io::Result<()> {
        self.console.write_colored(text, color)
    }

    pub fn write_colored_line(&self, text: &str, color: Color) -> io::Result<()> {
        self.console.write_colored_line(text, color)
    }

    /// Write `text` wrapped to the console width, each piece indented by
    /// `padding` spaces. Blank lines are dropped.
    pub fn write_padded_text(&self, text: &str, padding: usize, color: Color) -> io::Result<()> {
        let ops = self.padded_ops(text, padding, color)?;
        self.console.draw(&ops)
    }

    fn padded_ops(&self, text: &str, padding: usize, color: Color) -> io::Result<Vec<DrawOp>> {
        let room = self.width()?.saturating_sub(padding + 1).max(1);
        let indent = " ".repeat(padding);
        let mut ops = vec![DrawOp::Foreground(color)];
        for line in text
            .split(['\r', '\n'])
            .filter(|line| !line.trim().is_empty())
        {
            for piece in chunk_by_width(line, room) {
                ops.push(DrawOp::Text(format!("{indent}{piece}{NEWLINE}")));
            }
        }
        Ok(ops)
    }

    /// Dump `err` and its `source()` chain, each cause indented further.
    ///
    /// Every entry reads `(Kind) message`; further lines of a multi-line
    /// message are printed below it as detail.
    pub fn write_error(&self, err: &(dyn Error + 'static)) -> io::Result<()> {
        let mut ops = Vec::new();
        let mut current = Some(err);
        let mut level = 0;
        while let Some(err) = current {
            let indent = " ".repeat(level * CAUSE_INDENT);
            let message = err.to_string();
            let mut lines = message.lines();
            let headline = lines.next().unwrap_or_default();

            ops.push(DrawOp::Foreground(self.theme.error_kind_color));
            ops.push(DrawOp::Text(format!("{indent}({}) ", error_kind(err))));
            ops.push(DrawOp::Foreground(self.theme.error_message_color));
            ops.push(DrawOp::Text(format!("{headline}{NEWLINE}")));

            let detail: Vec<&str> = lines.collect();
            if !detail.is_empty() {
                ops.extend(self.padded_ops(
                    &detail.join("\n"),
                    level * CAUSE_INDENT + 2,
                    self.theme.error_detail_color,
                )?);
            }

            current = err.source();
            level += 1;
        }
        self.console.draw(&ops)
    }

    /// Dump `value`, expanding nested composites down to `max_depth` levels.
    pub fn write_object(&self, value: &DumpValue, max_depth: usize) -> io::Result<()> {
        self.console
            .draw(&dump::dump_ops(value, max_depth, &self.theme))
    }

    /// Ask until a non-blank answer is entered; returns it trimmed.
    pub fn ask(&self, keys: &mut dyn KeySource, message: &str) -> io::Result<String> {
        loop {
            self.console.write_colored(
                &format!("{}{message}: ", self.theme.question_prefix),
                self.theme.question_color,
            )?;
            let answer = read_plain_line(&self.console, keys, self.theme.user_input_color)?;
            let answer = answer.trim();
            if !answer.is_empty() {
                return Ok(answer.to_string());
            }
        }
    }

    /// Ask until the answer parses as `T`.
    pub fn ask_parsed<T: FromStr>(&self, keys: &mut dyn KeySource, message: &str) -> io::Result<T> {
        loop {
            if let Ok(value) = self.ask(keys, message)?.parse() {
                return Ok(value);
            }
        }
    }
}

/// Short kind label for an error: the variant or type name that leads its
/// `Debug` output, e.g. `Failed` for `Failed("boom")`.
fn error_kind(err: &dyn Error) -> String {
    let debug = format!("{err:?}");
    let kind: String = debug
        .chars()
        .take_while(|ch| ch.is_alphanumeric() || *ch == '_')
        .collect();
    if kind.is_empty() {
        "error".to_string()
    } else {
        kind
    }
}
