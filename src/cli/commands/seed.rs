//! editora seed - Load demo data

use clap::Args;
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::emit_robot;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct SeedArgs {}

pub fn run(ctx: &AppContext, _args: &SeedArgs) -> Result<()> {
    let report = ctx.db.seed_demo()?;
    if ctx.robot_mode {
        return emit_robot(&report, ctx.config.robot.include_metadata);
    }
    if report.already_seeded {
        println!("{} Demo data already loaded", "!".yellow());
    } else {
        println!(
            "{} Seeded {} users, {} profiles, {} portfolio items, {} reviews",
            "✓".green().bold(),
            report.users,
            report.profiles,
            report.portfolio_items,
            report.reviews
        );
    }
    Ok(())
}
