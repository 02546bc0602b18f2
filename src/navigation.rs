//! Numbered menus whose entries run actions.

use crate::console::DrawOp;
use crate::editor::read_plain_line;
use crate::shell::{contain, report_failure, CommandContext, CommandResult};
use crate::term::NEWLINE;
use crate::theme::ThemeColors;
use crossterm::style::Color;
use std::io;

const GO_BACK: &str = "(Press enter to go back): ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTheme {
    pub item_number_color: Color,
    pub item_name_color: Color,
    pub disabled_number_color: Color,
    pub disabled_name_color: Color,
    pub message_color: Color,
    pub user_input_color: Color,
}

impl Default for NavigationTheme {
    fn default() -> Self {
        Self {
            item_number_color: Color::Green,
            item_name_color: Color::White,
            disabled_number_color: Color::DarkGrey,
            disabled_name_color: Color::Grey,
            message_color: Color::Grey,
            user_input_color: Color::White,
        }
    }
}

impl ThemeColors for NavigationTheme {
    const SECTION: &'static str = "navigation";

    fn color_slot(&mut self, key: &str) -> Option<&mut Color> {
        match key {
            "number" => Some(&mut self.item_number_color),
            "name" => Some(&mut self.item_name_color),
            "disabled_number" => Some(&mut self.disabled_number_color),
            "disabled_name" => Some(&mut self.disabled_name_color),
            "message" => Some(&mut self.message_color),
            "input" => Some(&mut self.user_input_color),
            _ => None,
        }
    }

    fn color_keys() -> &'static [&'static str] {
        &[
            "number",
            "name",
            "disabled_number",
            "disabled_name",
            "message",
            "input",
        ]
    }
}

type Action<'a> = Box<dyn FnMut(&mut CommandContext<'_>, usize) -> CommandResult + 'a>;

/// One menu entry; entries without an action are listed but not selectable.
pub struct NavigationItem<'a> {
    caption: String,
    action: Option<Action<'a>>,
}

impl<'a> NavigationItem<'a> {
    /// A disabled entry.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
            action: None,
        }
    }

    /// A selectable entry; `action` receives the zero-based item index.
    pub fn with_action<F>(caption: impl Into<String>, action: F) -> Self
    where
        F: FnMut(&mut CommandContext<'_>, usize) -> CommandResult + 'a,
    {
        Self {
            caption: caption.into(),
            action: Some(Box::new(action)),
        }
    }

    pub fn caption(&self) -> &str {
        &self.caption
    }

    pub fn is_callable(&self) -> bool {
        self.action.is_some()
    }
}

impl std::fmt::Debug for NavigationItem<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NavigationItem")
            .field("caption", &self.caption)
            .field("callable", &self.is_callable())
            .finish()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Navigation {
    theme: NavigationTheme,
}

impl Navigation {
    pub fn new(theme: NavigationTheme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &NavigationTheme {
        &self.theme
    }

    /// Show `items` until the user submits an empty line.
    ///
    /// Selecting a callable entry runs it and lists the menu again; action
    /// failures are reported through the context's writer.
    pub fn show(
        &self,
        ctx: &mut CommandContext<'_>,
        items: &mut [NavigationItem<'_>],
        message: Option<&str>,
    ) -> io::Result<()> {
        let message = message.map(str::trim).filter(|m| !m.is_empty());
        let console = ctx.console().clone();
        loop {
            console.draw(&self.listing(items, message))?;

            loop {
                let input = read_plain_line(&console, &mut *ctx.keys, self.theme.user_input_color)?;
                let input = input.trim();
                if input.is_empty() {
                    return Ok(());
                }

                let selected = input
                    .parse::<usize>()
                    .ok()
                    .and_then(|number| number.checked_sub(1))
                    .filter(|&index| index < items.len() && items[index].is_callable());
                if let Some(index) = selected {
                    let item = &mut items[index];
                    tracing::debug!(index, caption = %item.caption, "menu item selected");
                    let result = match item.action.as_mut() {
                        Some(action) => contain(|| action(ctx, index)),
                        None => Ok(()),
                    };
                    if let Err(err) = result {
                        report_failure(&ctx.writer, &item.caption, &err)?;
                    }
                    break;
                }

                console.write_colored(
                    &format!("Invalid input, try again {GO_BACK}"),
                    self.theme.message_color,
                )?;
            }
        }
    }

    fn listing(&self, items: &[NavigationItem<'_>], message: Option<&str>) -> Vec<DrawOp> {
        let theme = &self.theme;
        let mut ops = Vec::new();

        if items.is_empty() {
            ops.push(DrawOp::Foreground(theme.message_color));
            ops.push(DrawOp::Text(match message {
                Some(message) => format!("Nothing to show.{NEWLINE}{message} {GO_BACK}"),
                None => format!("Nothing to show. {GO_BACK}"),
            }));
            return ops;
        }

        for (index, item) in items.iter().enumerate() {
            let (number, number_color, name_color) = if item.is_callable() {
                (
                    format!("[{:02}] ", index + 1),
                    theme.item_number_color,
                    theme.item_name_color,
                )
            } else {
                (
                    "[--] ".to_string(),
                    theme.disabled_number_color,
                    theme.disabled_name_color,
                )
            };
            ops.push(DrawOp::Foreground(number_color));
            ops.push(DrawOp::Text(number));
            ops.push(DrawOp::Foreground(name_color));
            ops.push(DrawOp::Text(format!("{}{NEWLINE}", item.caption)));
        }

        ops.push(DrawOp::Foreground(theme.message_color));
        ops.push(DrawOp::Text(match message {
            Some(message) => format!("{message} {GO_BACK}"),
            None => "Press enter to go back: ".to_string(),
        }));
        ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommandError;
    use crate::term::{ScriptedKeys, VirtualTerminal};
    use crate::testsupport::virtual_console;
    use std::cell::RefCell;

    fn run(
        items: &mut [NavigationItem<'_>],
        message: Option<&str>,
        keys: ScriptedKeys,
    ) -> (VirtualTerminal, ScriptedKeys) {
        let (console, term) = virtual_console(80);
        let mut keys = keys;
        let mut ctx = CommandContext::new(&console, &mut keys);
        Navigation::default()
            .show(&mut ctx, items, message)
            .unwrap();
        drop(ctx);
        (term, keys)
    }

    #[test]
    fn lists_items_with_numbers_and_disabled_markers() {
        let mut items = [
            NavigationItem::with_action("First", |_, _| Ok(())),
            NavigationItem::new("Second"),
        ];
        let (term, _) = run(&mut items, Some("Pick one"), ScriptedKeys::new().line(""));
        assert_eq!(
            term.lines(),
            vec!["[01] First", "[--] Second", "Pick one (Press enter to go back):"]
        );
        assert_eq!(term.color_at(0, 0), Some(Color::Green));
        assert_eq!(term.color_at(0, 1), Some(Color::DarkGrey));
        assert_eq!(term.color_at(5, 1), Some(Color::Grey));
    }

    #[test]
    fn empty_menu_says_nothing_to_show() {
        let (term, _) = run(&mut [], None, ScriptedKeys::new().line(""));
        assert_eq!(term.lines(), vec!["Nothing to show. (Press enter to go back):"]);

        let (term, _) = run(&mut [], Some("Hi"), ScriptedKeys::new().line(""));
        assert_eq!(
            term.lines(),
            vec!["Nothing to show.", "Hi (Press enter to go back):"]
        );
    }

    #[test]
    fn selecting_runs_action_and_relists() {
        let picked = RefCell::new(Vec::new());
        let mut items = [
            NavigationItem::new("Off"),
            NavigationItem::with_action("On", |_, index| {
                picked.borrow_mut().push(index);
                Ok(())
            }),
        ];
        let (term, keys) = run(&mut items, None, ScriptedKeys::new().line(" 2 ").line(""));
        assert_eq!(*picked.borrow(), vec![1]);
        assert_eq!(keys.remaining(), 0);
        let listings = term
            .lines()
            .iter()
            .filter(|line| line.starts_with("[02] On"))
            .count();
        assert_eq!(listings, 2);
    }

    #[test]
    fn invalid_and_disabled_choices_ask_again() {
        let mut items = [NavigationItem::new("Off")];
        let (term, _) = run(
            &mut items,
            None,
            ScriptedKeys::new().line("1").line("x").line("9").line(""),
        );
        let retries = term
            .lines()
            .iter()
            .filter(|line| line.starts_with("Invalid input, try again"))
            .count();
        assert_eq!(retries, 3);
        assert!(term.lines()[1].starts_with("Press enter to go back: 1"));
    }

    #[test]
    fn action_errors_are_reported_and_menu_continues() {
        let mut items = [NavigationItem::with_action("Broken", |_, _| {
            Err(CommandError::InvalidArguments("bad".into()))
        })];
        let (term, _) = run(&mut items, None, ScriptedKeys::new().line("1").line(""));
        assert!(term
            .lines()
            .iter()
            .any(|line| line == "(InvalidArguments) invalid arguments: bad"));
    }

    #[test]
    fn actions_can_open_nested_menus() {
        let mut items = [NavigationItem::with_action("Deeper", |ctx, _| {
            let mut inner = [NavigationItem::new("Leaf")];
            Navigation::default().show(ctx, &mut inner, Some("Inner"))?;
            Ok(())
        })];
        let (term, keys) = run(&mut items, None, ScriptedKeys::new().line("1").line("").line(""));
        assert_eq!(keys.remaining(), 0);
        assert!(term.lines().iter().any(|line| line == "[--] Leaf"));
    }
}
