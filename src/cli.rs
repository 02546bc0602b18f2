//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};
use console_kit::build_info;

/// Terminal widgets demo: tables, themed output, menus and a command prompt.
#[derive(Debug, Parser)]
#[command(
    name = "console-kit",
    version = build_info::VERSION,
    long_version = build_info::LONG_VERSION,
    after_help = build_info::HELP_BUILD_METADATA
)]
pub struct Args {
    /// Path to config file (default: ./console-kit.toml or ~/.config/console-kit/console-kit.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Disable color output.
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Draw tables at this width instead of the terminal width.
    #[arg(short = 'w', long = "width", value_parser = clap::value_parser!(u16).range(1..))]
    pub width: Option<u16>,

    /// Sample to run. Without one, a menu of all samples is shown.
    #[command(subcommand)]
    pub command: Option<Sample>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Sample {
    /// Draw a few tables.
    Table,
    /// Messages, captions, object dumps, errors and questions.
    Writer,
    /// Nested numbered menus.
    Navigation,
    /// Interactive command prompt with background writers.
    Terminal,
}

#[cfg(test)]
mod tests {
    use super::{Args, Sample};
    use clap::Parser;

    #[test]
    fn no_arguments_runs_the_menu() {
        let args = Args::parse_from(["console-kit"]);
        assert!(args.command.is_none());
        assert!(args.config.is_none());
        assert!(!args.no_color);
        assert!(args.width.is_none());
    }

    #[test]
    fn parses_global_flags_and_sample() {
        let args = Args::parse_from([
            "console-kit",
            "--config",
            "x.toml",
            "--no-color",
            "-w",
            "60",
            "table",
        ]);
        assert_eq!(args.config.as_deref(), Some("x.toml"));
        assert!(args.no_color);
        assert_eq!(args.width, Some(60));
        assert_eq!(args.command, Some(Sample::Table));
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(Args::try_parse_from(["console-kit", "--width", "0"]).is_err());
    }

    #[test]
    fn unknown_sample_is_rejected() {
        assert!(Args::try_parse_from(["console-kit", "spreadsheet"]).is_err());
    }
}
