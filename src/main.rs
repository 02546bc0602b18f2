//! CLI entry point for the console-kit demo.

mod cli;
mod samples;

use clap::Parser;
use cli::Sample;
use console_kit::config::{load_config, Config};
use console_kit::console::Console;
use console_kit::logging;
use console_kit::shell::{report_failure, CommandContext};
use console_kit::term::CrosstermKeys;
use console_kit::writer::Writer;
use samples::{SampleKind, SampleSettings};
use std::path::Path;
use std::time::Duration;

fn main() {
    let args = cli::Args::parse();
    let _logging = logging::init();

    let mut config = match load_config(args.config.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    if args.no_color {
        config.display.color = false;
    }

    let console = Console::stdout().with_color(config.display.color);
    let mut keys = match CrosstermKeys::acquire() {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("error: failed to read the terminal: {e}");
            std::process::exit(1);
        }
    };

    let settings = sample_settings(&config, args.width);
    let writer = Writer::new(console.clone()).with_theme(config.themes.writer.clone());
    let mut ctx = CommandContext::with_writer(writer, &mut keys);

    let result = match args.command {
        Some(sample) => samples::run_sample(sample_kind(sample), &mut ctx, &settings),
        None => samples::run_menu(&mut ctx, &settings),
    };
    if let Err(e) = result {
        let _ = report_failure(&ctx.writer, "console-kit", &e);
        drop(ctx);
        drop(keys);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn sample_settings(config: &Config, width: Option<u16>) -> SampleSettings {
    SampleSettings {
        themes: config.themes.clone(),
        table_autosize: config.table.autosize,
        table_width: width,
        prompt_name: config.terminal.prompt_name.clone(),
        history_length: config.terminal.history_length,
        tick: Duration::from_secs(1),
    }
}

fn sample_kind(sample: Sample) -> SampleKind {
    match sample {
        Sample::Table => SampleKind::Table,
        Sample::Writer => SampleKind::Writer,
        Sample::Navigation => SampleKind::Navigation,
        Sample::Terminal => SampleKind::Terminal,
    }
}
