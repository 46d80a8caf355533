//! Field mapping CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use fieldmap_cli::logging::{LogConfig, LogFormat, init_logging};
use fieldmap_client::ClientConfig;
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_compare, run_inspect, run_map, run_merge};
use crate::summary::{print_comparison, print_inspect, print_map, print_merge};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Inspect(args) => print_inspect(&run_inspect(args)?),
        Command::Compare(args) => print_comparison(&run_compare(args)?),
        Command::Map(args) => {
            let config = client_config(cli, args.output.clone())?;
            print_map(&run_map(args, &config)?);
        }
        Command::Merge(args) => {
            let config = client_config(cli, None)?;
            print_merge(&run_merge(args, &config)?);
        }
    }
    Ok(())
}

/// Defaults, then environment, then flags.
fn client_config(cli: &Cli, output: Option<std::path::PathBuf>) -> Result<ClientConfig> {
    Ok(ClientConfig::from_env()?.with_overrides(cli.api_url.clone(), cli.timeout, output))
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
