//! editora - marketplace CLI and API server
//!
//! Manage editor profiles, portfolios and briefs, search the directory, or
//! serve it over HTTP.

use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use editora::Result;
use editora::app::AppContext;
use editora::cli::{Cli, Commands};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.is_robot() {
                let body = serde_json::json!({
                    "error": true,
                    "code": e.code(),
                    "message": e.to_string(),
                });
                println!("{body}");
            } else {
                eprintln!("{} {e}", "error:".red().bold());
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Init(args) => {
            return editora::cli::commands::init::run_without_context(cli.is_robot(), args);
        }
        Commands::Completions(args) => {
            editora::cli::commands::completions::run(args);
            return Ok(());
        }
        _ => {}
    }
    let ctx = AppContext::from_cli(cli)?;
    editora::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => "warn,editora=info",
        1 => "info,editora=debug",
        2 => "debug,editora=trace",
        _ => "trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Robot mode keeps stdout clean for JSON and logs JSON lines to stderr.
    let json = cli.is_robot();
    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| fmt::layer().with_writer(std::io::stderr)))
        .init();
}
