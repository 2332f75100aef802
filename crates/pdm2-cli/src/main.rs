use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pdm2_core::{Config, OverwritePolicy};

mod error;
mod output;

use error::CliError;

const DEFAULT_CONFIG: &str = "pdm2.toml";

/// pdm2 - Render a PowerDesigner physical data model as an HTML report
#[derive(Parser)]
#[command(name = "pdm2")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the .pdm file
    input: Option<String>,

    /// Path to config file (default: pdm2.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// What to do when the report already exists
    #[arg(long, value_enum)]
    overwrite: Option<OverwriteArg>,

    /// Directory for the report (default: working directory)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OverwriteArg {
    Ask,
    Always,
    Never,
}

impl From<OverwriteArg> for OverwritePolicy {
    fn from(arg: OverwriteArg) -> Self {
        match arg {
            OverwriteArg::Ask => Self::Ask,
            OverwriteArg::Always => Self::Always,
            OverwriteArg::Never => Self::Never,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let stdin = std::io::stdin();
    let result = execute(&cli, &mut stdin.lock(), &mut std::io::stdout());

    match result {
        Ok(path) => {
            tracing::info!(path = %path.display(), "report written");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if !e.is_silent() {
                eprintln!("{} {}", "error:".red().bold(), e);
            }
            ExitCode::FAILURE
        }
    }
}

/// Log to stderr; RUST_LOG overrides the level picked by --verbose
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Check the input argument, load config, then run
///
/// A missing input ends the process before any config file is read.
fn execute<R: BufRead, W: Write>(
    cli: &Cli,
    answers: &mut R,
    prompt: &mut W,
) -> Result<PathBuf, CliError> {
    input_path(cli)?;
    let config = load_config(cli)?;
    run(cli, &config, answers, prompt)
}

/// The input path, rejecting an absent or empty argument
fn input_path(cli: &Cli) -> Result<&str, CliError> {
    match cli.input.as_deref() {
        Some(input) if !input.is_empty() => Ok(input),
        _ => Err(CliError::MissingInput),
    }
}

/// Load the config named on the command line, else pdm2.toml when present
fn load_config(cli: &Cli) -> Result<Config, CliError> {
    let config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else if Path::new(DEFAULT_CONFIG).exists() {
        Config::from_file(Path::new(DEFAULT_CONFIG))?
    } else {
        tracing::debug!("no config file found, using defaults");
        Config::default()
    };

    Ok(config)
}

/// Parse, render and write; returns the path of the written report
fn run<R: BufRead, W: Write>(
    cli: &Cli,
    config: &Config,
    answers: &mut R,
    prompt: &mut W,
) -> Result<PathBuf, CliError> {
    let input = input_path(cli)?;

    let policy = cli.overwrite.map(OverwritePolicy::from).unwrap_or(config.overwrite);
    let output_dir = match cli.output_dir.as_ref().or(config.output_dir.as_ref()) {
        Some(dir) => dir.clone(),
        None => std::env::current_dir().map_err(CliError::CurrentDir)?,
    };

    tracing::debug!(input, %policy, output_dir = %output_dir.display(), "generating report");

    let bytes = std::fs::read(input).map_err(|source| CliError::Read {
        path: PathBuf::from(input),
        source,
    })?;

    let model = pdm2_parser::parse(&bytes)?
        .into_model()
        .with_file_name(input);
    let html = pdm2_report::render(&model)?;

    let target = output::target_path(&output_dir, Path::new(input));
    output::write_report(&target, &html, policy, answers, prompt)?;

    Ok(target)
}
