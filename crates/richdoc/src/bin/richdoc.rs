//! `richdoc`: inspect and migrate stored rich-text values.
//!
//! Usage:
//!   richdoc convert [FILE]
//!   richdoc html [FILE] [--config FILE]
//!   richdoc text [FILE] [--details] [--config FILE]
//!
//! FILE defaults to stdin.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use richdoc::cli::{self, CliError};

#[derive(Debug, Parser)]
#[clap(name = "richdoc", version, about)]
struct Cli {
    /// Raise log verbosity
    #[clap(short, long, global = true)]
    verbose: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
#[clap(rename_all = "kebab-case")]
enum Commands {
    /// Print the stored value as a document tree
    Convert(InputArgs),
    /// Render the stored value as HTML
    Html(RenderArgs),
    /// Reduce the stored value to a plain-text summary
    Text(TextArgs),
}

#[derive(Debug, Args)]
struct InputArgs {
    /// Input file, `-` for stdin
    input: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct RenderArgs {
    #[clap(flatten)]
    input: InputArgs,

    /// TOML file with `[render]` and `[plain_text]` sections
    #[clap(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct TextArgs {
    #[clap(flatten)]
    render: RenderArgs,

    /// Use the details placeholder instead of the description one;
    /// overrides `[plain_text] placeholder` from --config
    #[clap(long)]
    details: bool,
}

fn run(cmd: Commands) -> Result<String, CliError> {
    match cmd {
        Commands::Convert(args) => cli::convert(&cli::read_input(args.input.as_deref())?),
        Commands::Html(args) => {
            let config = cli::load_config(args.config.as_deref())?;
            let input = cli::read_input(args.input.input.as_deref())?;
            Ok(cli::html(&input, &config.render))
        }
        Commands::Text(args) => {
            let config = cli::load_config(args.render.config.as_deref())?;
            let input = cli::read_input(args.render.input.input.as_deref())?;
            Ok(cli::text(&input, &cli::text_options(config, args.details)))
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();

    let _ = {
        use log::LevelFilter::*;

        env_logger::builder()
            .filter_module("richdoc", if args.verbose { Debug } else { Warn })
            .parse_default_env()
            .try_init()
    };

    match run(args.command) {
        Ok(out) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{out}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
