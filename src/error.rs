//! Unified error types for the toolkit.

use std::fmt;

// ---------------------------------------------------------------------------
// TableError
// ---------------------------------------------------------------------------

/// Errors raised while defining, rendering, or writing a table.
#[derive(Debug)]
pub enum TableError {
    /// Rejected at construction time (e.g. a zero width factor).
    Configuration(String),
    /// The requested width cannot fit the inferred columns plus separators.
    InsufficientWidth { total_width: usize, columns: usize },
    /// Writing the rendered table to the console failed.
    Io(std::io::Error),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Configuration(msg) => write!(f, "invalid table configuration: {msg}"),
            Self::InsufficientWidth {
                total_width,
                columns,
            } => write!(
                f,
                "insufficient space for the drawing of the table: width {total_width} cannot fit {columns} column(s)"
            ),
            Self::Io(e) => write!(f, "io: {e}"),
        }
    }
}

impl std::error::Error for TableError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TableError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// CommandError
// ---------------------------------------------------------------------------

/// Failure raised by a dispatched command or menu action.
///
/// These never end the surrounding loop: the dispatcher reports them and
/// keeps reading.
#[derive(Debug)]
pub enum CommandError {
    /// The handler ran but could not complete.
    Failed(String),
    /// The user supplied arguments the handler couldn't use.
    InvalidArguments(String),
    Io(std::io::Error),
    Table(TableError),
    /// The handler panicked; carries the panic message.
    Panicked(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed(msg) => write!(f, "command failed: {msg}"),
            Self::InvalidArguments(msg) => write!(f, "invalid arguments: {msg}"),
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Table(e) => write!(f, "table: {e}"),
            Self::Panicked(msg) => write!(f, "command panicked: {msg}"),
        }
    }
}

impl std::error::Error for CommandError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Table(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for CommandError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<TableError> for CommandError {
    fn from(e: TableError) -> Self {
        Self::Table(e)
    }
}
