//! Command line interface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod formatters;
pub mod output;

pub use commands::Commands;
pub use output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "editora",
    version,
    about = "Marketplace backend for video editors and their clients",
    propagate_version = true
)]
pub struct Cli {
    /// Emit machine-readable JSON on stdout
    #[arg(long, global = true, env = "EDITORA_ROBOT")]
    pub robot: bool,

    /// Output format (overrides --robot)
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Use only this config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn output_format(&self) -> OutputFormat {
        match self.format {
            Some(format) => format,
            None if self.robot => OutputFormat::Json,
            None => OutputFormat::Human,
        }
    }

    pub fn is_robot(&self) -> bool {
        self.output_format() == OutputFormat::Json
    }
}
