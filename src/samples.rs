//! The four demo samples and the menu that launches them.

use console_kit::build_info;
use console_kit::config::Themes;
use console_kit::console::Console;
use console_kit::error::CommandError;
use console_kit::navigation::{Navigation, NavigationItem};
use console_kit::shell::{CommandContext, CommandResult, CommandTerminal};
use console_kit::table::Table;
use console_kit::writer::DumpValue;
use crossterm::style::Color;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const LONG_TEXT: &str =
    "Very long row indeed, and to be sure let add more characters to this header";
const LONG_HEADER: &str =
    "Very long header indeed, and to be sure let add more characters to this header";

const TERMINAL_HELP: &str = "Write `loading` for multi thread loading test;\r\n\
`log` for multi thread logging;\r\n\
`table` for multi thread table redraw;\r\n\
and `terminal` to open a child terminal.\r\n\
Enter `exit` or `quit` to exit test.";

/// Knobs resolved from config and CLI flags.
#[derive(Debug, Clone)]
pub struct SampleSettings {
    pub themes: Themes,
    pub table_autosize: bool,
    /// Fixed drawing width for tables; `None` uses the terminal width.
    pub table_width: Option<u16>,
    pub prompt_name: String,
    pub history_length: usize,
    /// Delay between background ticks in the terminal sample.
    pub tick: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Table,
    Writer,
    Navigation,
    Terminal,
}

impl SampleKind {
    const ALL: [SampleKind; 4] = [
        SampleKind::Table,
        SampleKind::Writer,
        SampleKind::Navigation,
        SampleKind::Terminal,
    ];

    fn caption(self) -> &'static str {
        match self {
            SampleKind::Table => "Table Sample",
            SampleKind::Writer => "Writer Sample",
            SampleKind::Navigation => "Navigation Sample",
            SampleKind::Terminal => "Terminal Sample",
        }
    }
}

/// Show the sample menu until the user backs out.
pub fn run_menu(ctx: &mut CommandContext<'_>, settings: &SampleSettings) -> CommandResult {
    ctx.writer.print_caption("Samples")?;
    ctx.writer.print_message(&build_info::banner_metadata_line())?;
    let mut items: Vec<NavigationItem<'_>> = SampleKind::ALL
        .into_iter()
        .map(|kind| {
            NavigationItem::with_action(kind.caption(), move |ctx, _| {
                run_sample(kind, ctx, settings)
            })
        })
        .collect();
    navigation(settings).show(ctx, &mut items, Some("Select an execution path."))?;
    ctx.writer.print_warning("End of application.")?;
    Ok(())
}

pub fn run_sample(
    kind: SampleKind,
    ctx: &mut CommandContext<'_>,
    settings: &SampleSettings,
) -> CommandResult {
    tracing::info!(sample = kind.caption(), "running sample");
    ctx.writer.print_caption(kind.caption())?;
    match kind {
        SampleKind::Table => table_sample(ctx, settings)?,
        SampleKind::Writer => writer_sample(ctx)?,
        SampleKind::Navigation => navigation_sample(ctx, settings)?,
        SampleKind::Terminal => terminal_sample(ctx, settings)?,
    }
    ctx.writer.print_success("End of test execution")?;
    ctx.writer.print_separator()?;
    Ok(())
}

fn navigation(settings: &SampleSettings) -> Navigation {
    Navigation::new(settings.themes.navigation.clone())
}

fn sample_table<I, S>(settings: &SampleSettings, headers: I) -> Table
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Table::with_headers(headers)
        .with_theme(settings.themes.table.clone())
        .with_autosize(settings.table_autosize)
}

fn draw_table(
    console: &Console,
    settings: &SampleSettings,
    table: &Table,
    rows: &[[&str; 4]],
) -> CommandResult {
    match settings.table_width {
        Some(width) => table.write_with_width(console, usize::from(width), rows)?,
        None => table.write(console, rows)?,
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Table
// ---------------------------------------------------------------------------

fn table_sample(ctx: &mut CommandContext<'_>, settings: &SampleSettings) -> CommandResult {
    let console = ctx.console().clone();
    let no_rows: &[[&str; 4]] = &[];

    let table = sample_table(
        settings,
        ["Header 1", "Header 2", "Header 3", LONG_HEADER],
    );
    draw_table(
        &console,
        settings,
        &table,
        &[
            ["Row 1", LONG_TEXT, "Row 3", "Row 4"],
            ["Row 1", "Row 2", LONG_TEXT, "Row 4"],
        ],
    )?;
    draw_table(
        &console,
        settings,
        &table,
        &[
            ["Row 1", "Row 2", "Row 3", LONG_TEXT],
            ["Row 1", "Row 2", "Row 3", LONG_TEXT],
        ],
    )?;
    draw_table(&console, settings, &table, no_rows)?;

    let headless = sample_table(settings, Vec::<String>::new());
    draw_table(
        &console,
        settings,
        &headless,
        &[
            ["Row 1", LONG_TEXT, "Row 3", "Row 4"],
            ["Row 1", "Row 2", LONG_TEXT, "Row 4"],
        ],
    )?;
    draw_table(&console, settings, &headless, no_rows)?;

    let huge = sample_table(settings, [[LONG_HEADER; 3].join(" ")]);
    draw_table(&console, settings, &huge, no_rows)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Writer
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct DirectorySummary {
    path: String,
    name: String,
    entries: Vec<String>,
}

impl DirectorySummary {
    fn current() -> std::io::Result<Self> {
        let path = std::env::current_dir()?;
        let mut entries = std::fs::read_dir(&path)?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name().to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        entries.sort();
        entries.truncate(5);
        Ok(Self {
            name: path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.display().to_string(),
            entries,
        })
    }
}

/// Error with an optional cause, for showing chained error output.
#[derive(Debug)]
struct SampleError {
    message: String,
    cause: Option<Box<SampleError>>,
}

impl fmt::Display for SampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for SampleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause
            .as_deref()
            .map(|cause| cause as &(dyn std::error::Error + 'static))
    }
}

fn anonymous_object() -> DumpValue {
    json!({
        "a": ["a", "b"],
        "b": "String",
        "xcz": { "pp": [] }
    })
    .into()
}

fn writer_sample(ctx: &mut CommandContext<'_>) -> CommandResult {
    let console = ctx.console().clone();

    let variables: Vec<(String, DumpValue)> = std::env::vars_os()
        .map(|(name, value)| {
            (
                name.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .filter(|(name, _)| name.starts_with("CARGO") || name == "HOME" || name == "SHELL")
        .take(4)
        .map(|(name, value)| (name, value.into()))
        .collect();
    ctx.writer.write_object(&DumpValue::Mapping(variables), 1)?;
    console.new_line()?;

    let directory = DumpValue::from_serialize(&DirectorySummary::current()?)
        .map_err(|err| CommandError::Failed(err.to_string()))?;
    ctx.writer.write_object(&directory, 1)?;
    console.new_line()?;

    ctx.writer.write_object(&DumpValue::from(10_i64), 1)?;
    console.new_line()?;

    ctx.writer.write_object(&anonymous_object(), 2)?;
    console.new_line()?;

    let chained = SampleError {
        message: "new exception".to_string(),
        cause: Some(Box::new(SampleError {
            message: "old exception".to_string(),
            cause: None,
        })),
    };
    ctx.writer.write_error(&chained)?;
    console.new_line()?;

    if let Err(err) = "ten".parse::<i32>() {
        ctx.writer.write_error(&err)?;
    }
    console.new_line()?;

    ctx.writer.print_success("Success message.")?;
    console.new_line()?;
    ctx.writer.print_warning("Warning message.")?;
    console.new_line()?;
    ctx.writer.print_error("Error message.")?;
    console.new_line()?;

    let response = ctx.ask("Question")?;
    ctx.writer.print_message(&format!("Answered `{response}`"))?;
    console.new_line()?;

    let flag: bool = ctx.writer.ask_parsed(&mut *ctx.keys, "Boolean Question")?;
    ctx.writer.print_message(&format!("Answered `{flag}`"))?;
    console.new_line()?;

    let number: i32 = ctx.writer.ask_parsed(&mut *ctx.keys, "Integer Question")?;
    ctx.writer.print_message(&format!("Answered `{number}`"))?;
    console.new_line()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

fn navigation_sample(ctx: &mut CommandContext<'_>, settings: &SampleSettings) -> CommandResult {
    let menu = navigation(settings);
    let mut items = [
        NavigationItem::with_action("Option 1", |ctx, _| {
            let mut inner = [
                NavigationItem::new("Option 1 - 1"),
                NavigationItem::new("Option 1 - 2"),
            ];
            menu.show(ctx, &mut inner, None)?;
            Ok(())
        }),
        NavigationItem::with_action("Option 2", |ctx, index| {
            let selected = DumpValue::structured(
                "NavigationItem",
                vec![
                    ("index".to_string(), DumpValue::from(index as u64)),
                    ("caption".to_string(), "Option 2".into()),
                    ("data".to_string(), anonymous_object()),
                ],
            );
            ctx.writer.write_object(&selected, 2)?;
            let mut inner = [
                NavigationItem::new("Option 2 - 1"),
                NavigationItem::new("Option 2 - 2"),
            ];
            menu.show(ctx, &mut inner, Some("Do something else"))?;
            Ok(())
        }),
    ];
    menu.show(ctx, &mut items, Some("Do something"))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Terminal
// ---------------------------------------------------------------------------

/// Run `tick` on a background thread `count` times, `delay` apart, then
/// `finish` once. Console errors end the thread early.
fn spawn_ticker<T, F>(
    console: Console,
    delay: Duration,
    count: usize,
    tick: T,
    finish: F,
) -> std::io::Result<JoinHandle<()>>
where
    T: Fn(&Console, usize) -> std::io::Result<()> + Send + 'static,
    F: FnOnce(&Console) -> std::io::Result<()> + Send + 'static,
{
    thread::Builder::new()
        .name("sample-ticker".to_string())
        .spawn(move || {
            let result = (0..count)
                .try_for_each(|step| {
                    thread::sleep(delay);
                    tick(&console, step)
                })
                .and_then(|()| finish(&console));
            if let Err(err) = result {
                tracing::warn!(error = %err, "background writer stopped");
            }
        })
}

fn loading_ticker(console: Console, delay: Duration) -> std::io::Result<JoinHandle<()>> {
    spawn_ticker(
        console,
        delay,
        11,
        |console, step| console.write_colored(&format!("\r{}% complete", step * 10), Color::Red),
        |console| {
            console.new_line()?;
            console.write_colored_line("Done.", Color::DarkRed)
        },
    )
}

fn log_ticker(console: Console, delay: Duration) -> std::io::Result<JoinHandle<()>> {
    spawn_ticker(
        console,
        delay,
        11,
        |console, id| {
            console.write_colored_line(
                &format!(
                    "Event {id}: logged some message. Adding more char to make it long. \
                     Adding more char to make it long. Adding more char to make it long."
                ),
                Color::Yellow,
            )
        },
        |console| console.write_colored_line("No more event.", Color::DarkYellow),
    )
}

fn table_ticker(
    console: Console,
    delay: Duration,
    table: Table,
    width: Option<u16>,
) -> std::io::Result<JoinHandle<()>> {
    let rows = [
        ["Row 1.1", "Row 1.2", "Row 1.3"],
        ["Row 2.1", "Row 2.2", "Row 2.3"],
        ["Row 3.1", "Row 3.2", "Row 3.3"],
    ];
    spawn_ticker(
        console,
        delay,
        11,
        move |console, _| {
            let drawn = match width {
                Some(width) => table.write_with_width(console, usize::from(width), &rows),
                None => table.write(console, &rows),
            };
            drawn.map_err(|err| std::io::Error::other(err.to_string()))
        },
        |console| console.write_colored_line("End of table redraws.", Color::DarkCyan),
    )
}

fn terminal_sample(ctx: &mut CommandContext<'_>, settings: &SampleSettings) -> CommandResult {
    let delay = settings.tick;
    let history_length = settings.history_length;
    let theme = settings.themes.terminal.clone();

    let mut terminal = CommandTerminal::new(settings.prompt_name.clone())
        .history_length(history_length)
        .map_err(|err| CommandError::Failed(err.to_string()))?
        .with_theme(theme.clone())
        .command("", |ctx, _| {
            ctx.writer.write_padded_text(TERMINAL_HELP, 10, Color::Green)?;
            Ok(())
        })
        .command("terminal", |ctx, _| {
            CommandTerminal::with_fallback("inner", |ctx, name, args| {
                ctx.console().write_line(&format!(
                    "You wrote `{name}` with arguments `{}`; write `quit` or `exit` to exit.",
                    args.join(" ")
                ))?;
                Ok(())
            })
            .history_length(history_length)
            .map_err(|err| CommandError::Failed(err.to_string()))?
            .with_theme(theme.clone())
            .run_with(ctx)?;
            Ok(())
        })
        .command("loading", |ctx, _| {
            loading_ticker(ctx.console().clone(), delay)?;
            Ok(())
        })
        .command("log", |ctx, _| {
            log_ticker(ctx.console().clone(), delay)?;
            Ok(())
        })
        .command("table", |ctx, _| {
            let table = sample_table(settings, ["Header 1", "Header 2", "Header 3"]);
            table_ticker(ctx.console().clone(), delay, table, settings.table_width)?;
            Ok(())
        });

    terminal.run_with(ctx)?;
    Ok(())
}
