//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod brief;
pub mod completions;
pub mod config;
pub mod init;
pub mod portfolio;
pub mod profile;
pub mod review;
pub mod search;
pub mod seed;
pub mod serve;
pub mod user;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a project root with a default config and database
    Init(init::InitArgs),

    /// Manage user accounts
    User(user::UserArgs),

    /// Manage editor profiles
    Profile(profile::ProfileArgs),

    /// Manage portfolio items
    Portfolio(portfolio::PortfolioArgs),

    /// Post and track client briefs
    Brief(brief::BriefArgs),

    /// Rate editor profiles
    Review(review::ReviewArgs),

    /// Search editor profiles
    Search(search::SearchArgs),

    /// Load demo users, profiles and portfolios
    Seed(seed::SeedArgs),

    /// Serve the REST API
    Serve(serve::ServeArgs),

    /// Inspect configuration
    Config(config::ConfigArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Init(args) => init::run_without_context(ctx.robot_mode, args),
        Commands::User(args) => user::run(ctx, args),
        Commands::Profile(args) => profile::run(ctx, args),
        Commands::Portfolio(args) => portfolio::run(ctx, args),
        Commands::Brief(args) => brief::run(ctx, args),
        Commands::Review(args) => review::run(ctx, args),
        Commands::Search(args) => search::run(ctx, args),
        Commands::Seed(args) => seed::run(ctx, args),
        Commands::Serve(args) => serve::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
        Commands::Completions(args) => {
            completions::run(args);
            Ok(())
        }
    }
}
