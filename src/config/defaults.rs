//! Default configuration constants.

use crate::editor::CommandHistory;

/// Directory name under the platform config dir, and the log cache dir.
pub(crate) const APP_DIR_NAME: &str = "console-kit";
/// Config file looked up in the working directory and the config dir.
pub(super) const CONFIG_FILE_NAME: &str = "console-kit.toml";
/// Command prompt label used by the demo terminal.
pub(super) const DEFAULT_PROMPT_NAME: &str = "console-kit";
pub(super) const DEFAULT_HISTORY_LENGTH: usize = CommandHistory::DEFAULT_CAPACITY;
pub(super) const DEFAULT_TEXT_TAIL: &str = "...";
