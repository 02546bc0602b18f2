//! Console widgets for line-oriented terminal programs.
//!
//! Everything draws through a shared [`console::Console`] handle: bordered
//! [`table::Table`]s laid out within a character budget, a themed
//! [`writer::Writer`] for messages, object dumps and questions, numbered
//! [`navigation::Navigation`] menus, and a [`shell::CommandTerminal`] whose
//! prompt stays pinned below output written by other threads.
//!
//! # Quick start
//!
//! ```
//! use console_kit::console::Console;
//! use console_kit::table::Table;
//! use console_kit::term::VirtualTerminal;
//!
//! let screen = VirtualTerminal::new(40);
//! let console = Console::new(screen.clone());
//! let table = Table::with_headers(["Name", "Role"]);
//! table.write(&console, &[["ada", "admin"]]).unwrap();
//! assert!(screen.lines()[1].contains("Name"));
//! ```

pub mod build_info;
pub mod config;
pub mod console;
pub mod editor;
pub mod error;
pub mod logging;
pub mod navigation;
pub mod shell;
pub mod table;
pub mod term;
#[cfg(test)]
pub mod testsupport;
pub mod text;
pub mod theme;
pub mod writer;
