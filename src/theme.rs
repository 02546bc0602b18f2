//! Color parsing and name-keyed color overrides for the component themes.

use crate::error::ConfigError;
use crossterm::style::Color;
use std::collections::BTreeMap;

/// Themes whose colors can be overridden by name from configuration.
pub trait ThemeColors {
    /// Config section name, used in error messages (`colors.<section>`).
    const SECTION: &'static str;

    /// Mutable access to the color stored under `key`, if the theme has one.
    fn color_slot(&mut self, key: &str) -> Option<&mut Color>;

    /// Keys accepted by [`ThemeColors::color_slot`].
    fn color_keys() -> &'static [&'static str];
}

/// Apply `overrides` (key → color name) onto `theme`.
///
/// Unknown keys and unparsable colors are rejected; the theme may be partially
/// updated when an error is returned.
pub fn apply_overrides<T: ThemeColors>(
    theme: &mut T,
    overrides: &BTreeMap<String, String>,
) -> Result<(), ConfigError> {
    for (key, value) in overrides {
        let color = parse_color(value)
            .map_err(|msg| ConfigError::Invalid(format!("colors.{}.{key}: {msg}", T::SECTION)))?;
        let Some(slot) = theme.color_slot(key) else {
            return Err(ConfigError::Invalid(format!(
                "unknown color key `{key}` in [colors.{}] (expected one of: {})",
                T::SECTION,
                T::color_keys().join(", ")
            )));
        };
        *slot = color;
    }
    Ok(())
}

/// Parse `#RRGGBB` or a named terminal color.
pub fn parse_color(input: &str) -> Result<Color, String> {
    let normalized = input.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return Err("color value cannot be empty".to_string());
    }
    if let Some(hex) = normalized.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color `{input}`"))
        };
        return Ok(Color::Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        });
    }

    let color = match normalized.as_str() {
        "black" => Color::Black,
        "darkgrey" | "darkgray" | "dark-grey" | "dark-gray" | "dark_grey" | "dark_gray" => {
            Color::DarkGrey
        }
        "grey" | "gray" => Color::Grey,
        "white" => Color::White,
        "red" => Color::Red,
        "darkred" | "dark-red" | "dark_red" => Color::DarkRed,
        "green" => Color::Green,
        "darkgreen" | "dark-green" | "dark_green" => Color::DarkGreen,
        "yellow" => Color::Yellow,
        "darkyellow" | "dark-yellow" | "dark_yellow" => Color::DarkYellow,
        "blue" => Color::Blue,
        "darkblue" | "dark-blue" | "dark_blue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "darkmagenta" | "dark-magenta" | "dark_magenta" => Color::DarkMagenta,
        "cyan" => Color::Cyan,
        "darkcyan" | "dark-cyan" | "dark_cyan" => Color::DarkCyan,
        "reset" | "default" => Color::Reset,
        _ => return Err(format!("unsupported color value `{input}`")),
    };
    Ok(color)
}
