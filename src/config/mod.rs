//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`CONSOLE_KIT_NO_COLOR`, `NO_COLOR`,
//!    `CONSOLE_KIT_HISTORY_LENGTH`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./console-kit.toml in the current directory
//! 4. $XDG_CONFIG_HOME/console-kit/console-kit.toml (or the platform config
//!    dir)
//! 5. Built-in defaults
//!
//! Only the first file found is read; files are not merged.

use crate::error::ConfigError;
use crate::theme::apply_overrides;
use std::path::{Path, PathBuf};

mod defaults;
mod types;

pub(crate) use defaults::APP_DIR_NAME;
use defaults::CONFIG_FILE_NAME;
use types::FileConfig;
pub use types::{Config, DisplayConfig, TableConfig, TerminalConfig, Themes};

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Where the configuration text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local,
    Global(PathBuf),
    BuiltInDefaults,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&Path>) -> Result<Config, ConfigError> {
    let (config, source) = load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )?;
    tracing::info!(?source, "configuration loaded");
    Ok(config)
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&Path>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<(Config, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (text, source) = read_config_text(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&text)?;
    let mut config = resolve_file_config(parsed)?;
    apply_env_overrides(&mut config, &env_lookup)?;
    Ok((config, source))
}

fn read_config_text<FRead, FRoot>(
    path_override: Option<&Path>,
    read_file: &FRead,
    config_root: &FRoot,
) -> Result<(String, ConfigSource), ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FRoot: Fn() -> Option<PathBuf>,
{
    if let Some(path) = path_override {
        let text = read_file(path)?;
        return Ok((text, ConfigSource::Explicit(path.to_path_buf())));
    }

    if let Ok(text) = read_file(Path::new(CONFIG_FILE_NAME)) {
        return Ok((text, ConfigSource::Local));
    }
    if let Some(dir) = config_root() {
        let global = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if let Ok(text) = read_file(&global) {
            return Ok((text, ConfigSource::Global(global)));
        }
    }

    Ok((String::new(), ConfigSource::BuiltInDefaults))
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

fn resolve_file_config(file: FileConfig) -> Result<Config, ConfigError> {
    if file.terminal.history_length == 0 {
        return Err(ConfigError::Invalid(
            "terminal.history_length must be at least 1".to_string(),
        ));
    }
    if file.terminal.prompt_name.trim().is_empty() {
        return Err(ConfigError::Invalid(
            "terminal.prompt_name cannot be blank".to_string(),
        ));
    }

    let mut themes = Themes::default();
    themes.table.text_tail = file.table.text_tail.clone();
    apply_overrides(&mut themes.table, &file.colors.table)?;
    apply_overrides(&mut themes.terminal, &file.colors.terminal)?;
    apply_overrides(&mut themes.writer, &file.colors.writer)?;
    apply_overrides(&mut themes.navigation, &file.colors.navigation)?;

    Ok(Config {
        display: file.display,
        terminal: file.terminal,
        table: file.table,
        themes,
    })
}

fn apply_env_overrides<FEnv>(config: &mut Config, env_lookup: &FEnv) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if env_lookup("CONSOLE_KIT_NO_COLOR").is_some_and(|value| is_truthy(&value))
        || env_lookup("NO_COLOR").is_some_and(|value| !value.is_empty())
    {
        config.display.color = false;
    }
    if let Some(length) = env_lookup("CONSOLE_KIT_HISTORY_LENGTH") {
        let parsed = length
            .trim()
            .parse::<usize>()
            .ok()
            .filter(|n| *n > 0)
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "invalid CONSOLE_KIT_HISTORY_LENGTH value `{length}`: expected a positive integer"
                ))
            })?;
        config.terminal.history_length = parsed;
    }
    Ok(())
}

fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value != "0" && !value.eq_ignore_ascii_case("false")
}

/// Resolve the base directory for user-global config files.
pub fn config_root_dir() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("XDG_CONFIG_HOME") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return Some(PathBuf::from(trimmed));
        }
    }
    dirs::config_dir()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;
    use std::collections::HashMap;
    use std::io;

    fn load(
        path_override: Option<&Path>,
        files: &[(&str, &str)],
        env: &[(&str, &str)],
    ) -> Result<(Config, ConfigSource), ConfigError> {
        let files: HashMap<PathBuf, String> = files
            .iter()
            .map(|(p, t)| (PathBuf::from(p), t.to_string()))
            .collect();
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        load_config_from_sources(
            path_override,
            |path| {
                files
                    .get(path)
                    .cloned()
                    .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "missing"))
            },
            |name| env.get(name).cloned(),
            || Some(PathBuf::from("/cfg")),
        )
    }

    #[test]
    fn defaults_are_sensible() {
        let (c, source) = load(None, &[], &[]).unwrap();
        assert_eq!(source, ConfigSource::BuiltInDefaults);
        assert!(c.display.color);
        assert_eq!(c.terminal.history_length, 50);
        assert_eq!(c.terminal.prompt_name, "console-kit");
        assert!(c.table.autosize);
        assert_eq!(c.themes.table.text_tail, "...");
        assert_eq!(c, Config::default());
    }

    #[test]
    fn parse_partial_toml() {
        let toml = r#"
            [terminal]
            history_length = 10

            [table]
            text_tail = "~"
        "#;
        let (c, _) = load(None, &[("console-kit.toml", toml)], &[]).unwrap();
        assert_eq!(c.terminal.history_length, 10);
        assert_eq!(c.terminal.prompt_name, "console-kit");
        assert_eq!(c.themes.table.text_tail, "~");
        assert!(c.display.color);
    }

    #[test]
    fn explicit_path_wins_over_local_and_global() {
        let files = [
            ("custom.toml", "[display]\ncolor = false\n"),
            ("console-kit.toml", "[terminal]\nprompt_name = \"local\"\n"),
            (
                "/cfg/console-kit/console-kit.toml",
                "[terminal]\nprompt_name = \"global\"\n",
            ),
        ];
        let (c, source) = load(Some(Path::new("custom.toml")), &files, &[]).unwrap();
        assert_eq!(source, ConfigSource::Explicit(PathBuf::from("custom.toml")));
        assert!(!c.display.color);
        assert_eq!(c.terminal.prompt_name, "console-kit");

        let (c, source) = load(None, &files, &[]).unwrap();
        assert_eq!(source, ConfigSource::Local);
        assert_eq!(c.terminal.prompt_name, "local");

        let (c, source) = load(None, &files[2..], &[]).unwrap();
        assert!(matches!(source, ConfigSource::Global(_)));
        assert_eq!(c.terminal.prompt_name, "global");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let err = load(Some(Path::new("nope.toml")), &[], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn color_overrides_apply_to_themes() {
        let toml = r##"
            [colors.table]
            border = "cyan"

            [colors.writer]
            caption = "#102030"

            [colors.navigation]
            number = "dark_yellow"
        "##;
        let (c, _) = load(None, &[("console-kit.toml", toml)], &[]).unwrap();
        assert_eq!(c.themes.table.border_color, Color::Cyan);
        assert_eq!(
            c.themes.writer.caption_color,
            Color::Rgb {
                r: 0x10,
                g: 0x20,
                b: 0x30
            }
        );
        assert_eq!(c.themes.navigation.item_number_color, Color::DarkYellow);
        assert_eq!(c.themes.terminal, Default::default());
    }

    #[test]
    fn unknown_color_key_is_rejected() {
        let toml = "[colors.terminal]\nblink = \"red\"\n";
        let err = load(None, &[("console-kit.toml", toml)], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)), "got: {err}");
        assert!(err.to_string().contains("blink"));
    }

    #[test]
    fn unknown_color_section_is_rejected() {
        let toml = "[colors.sparkles]\nfoo = \"red\"\n";
        let err = load(None, &[("console-kit.toml", toml)], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "got: {err}");
    }

    #[test]
    fn zero_history_length_is_rejected() {
        let toml = "[terminal]\nhistory_length = 0\n";
        let err = load(None, &[("console-kit.toml", toml)], &[]).unwrap_err();
        assert!(err.to_string().contains("history_length"));
    }

    #[test]
    fn env_overrides_beat_files() {
        let toml = "[display]\ncolor = true\n[terminal]\nhistory_length = 5\n";
        let files = [("console-kit.toml", toml)];

        let (c, _) = load(None, &files, &[("NO_COLOR", "1")]).unwrap();
        assert!(!c.display.color);

        let (c, _) = load(None, &files, &[("CONSOLE_KIT_NO_COLOR", "false")]).unwrap();
        assert!(c.display.color);

        let (c, _) = load(None, &files, &[("NO_COLOR", "")]).unwrap();
        assert!(c.display.color);

        let (c, _) = load(None, &files, &[("CONSOLE_KIT_HISTORY_LENGTH", " 7 ")]).unwrap();
        assert_eq!(c.terminal.history_length, 7);
    }

    #[test]
    fn invalid_env_history_length_is_rejected() {
        for value in ["0", "-3", "many"] {
            let err = load(None, &[], &[("CONSOLE_KIT_HISTORY_LENGTH", value)]).unwrap_err();
            assert!(
                err.to_string().contains("CONSOLE_KIT_HISTORY_LENGTH"),
                "got: {err}"
            );
        }
    }

    #[test]
    fn malformed_toml_is_a_toml_error() {
        let err = load(None, &[("console-kit.toml", "[display\n")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }
}
