//! Configuration data model.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::defaults::{DEFAULT_HISTORY_LENGTH, DEFAULT_PROMPT_NAME, DEFAULT_TEXT_TAIL};
use crate::editor::TerminalTheme;
use crate::navigation::NavigationTheme;
use crate::table::TableTheme;
use crate::writer::WriterTheme;

/// Resolved runtime configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Config {
    pub display: DisplayConfig,
    pub terminal: TerminalConfig,
    pub table: TableConfig,
    pub themes: Themes,
}

/// Component themes with color overrides applied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Themes {
    pub table: TableTheme,
    pub terminal: TerminalTheme,
    pub writer: WriterTheme,
    pub navigation: NavigationTheme,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Emit foreground colors. Disabled by `NO_COLOR` or `--no-color`.
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalConfig {
    /// History slots per command terminal, live slot included.
    pub history_length: usize,
    pub prompt_name: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            history_length: DEFAULT_HISTORY_LENGTH,
            prompt_name: DEFAULT_PROMPT_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub autosize: bool,
    pub text_tail: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            autosize: true,
            text_tail: DEFAULT_TEXT_TAIL.to_string(),
        }
    }
}

/// Color-name overrides per theme, keyed by theme color name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(super) struct ColorsConfig {
    pub(super) table: BTreeMap<String, String>,
    pub(super) terminal: BTreeMap<String, String>,
    pub(super) writer: BTreeMap<String, String>,
    pub(super) navigation: BTreeMap<String, String>,
}

/// On-disk shape of `console-kit.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct FileConfig {
    pub(super) display: DisplayConfig,
    pub(super) terminal: TerminalConfig,
    pub(super) table: TableConfig,
    pub(super) colors: ColorsConfig,
}
