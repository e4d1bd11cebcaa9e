//! Marketing medallion pipeline CLI.

use clap::{ColorChoice, Parser};
use std::io::{self, IsTerminal};

use mkt_cli::cli::{Cli, Command, LogFormatArg};
use mkt_cli::commands::{run_clean, run_generate, run_metrics};
use mkt_cli::logging::{LogConfig, LogFormat, init_logging};
use mkt_cli::summary::print_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let outcome = match &cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Clean(args) => run_clean(args),
        Command::Metrics(args) => run_metrics(args),
    };
    match outcome {
        Ok(outcome) => print_summary(&outcome),
        Err(error) => {
            eprintln!("error: {error:#}");
            std::process::exit(1);
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        use_env_filter: !cli.verbosity.is_present(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        log_file: cli.log_file.clone(),
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
        },
    }
}
