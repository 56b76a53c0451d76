//! editora portfolio - Manage the ordered portfolio of a profile

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{emit_robot, or_dash};
use crate::core::{NewPortfolioItem, PortfolioItem, PortfolioPatch};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct PortfolioArgs {
    #[command(subcommand)]
    pub command: PortfolioCommand,
}

#[derive(Subcommand, Debug)]
pub enum PortfolioCommand {
    /// Add an item; appended unless --position is given
    Add {
        /// Profile id
        profile: i64,
        #[arg(long)]
        title: String,
        #[arg(long)]
        video_url: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail_url: Option<String>,
        /// 0-based insert position (0 makes it the featured item)
        #[arg(long)]
        position: Option<usize>,
    },

    /// Edit an item's text or links
    Edit {
        /// Item id
        item: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        video_url: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        thumbnail_url: Option<String>,
    },

    /// Remove an item and close the gap
    Remove {
        /// Item id
        item: i64,
    },

    /// Set the full order of a profile's items
    Reorder {
        /// Profile id
        profile: i64,
        /// Every item id of the profile, in the new order
        #[arg(required = true, value_delimiter = ',')]
        items: Vec<i64>,
    },

    /// List items in order
    List {
        /// Profile id
        profile: i64,
    },
}

pub fn run(ctx: &AppContext, args: &PortfolioArgs) -> Result<()> {
    match &args.command {
        PortfolioCommand::Add {
            profile,
            title,
            video_url,
            description,
            thumbnail_url,
            position,
        } => {
            let item = ctx.db.add_portfolio_item(
                *profile,
                &NewPortfolioItem {
                    title: title.clone(),
                    description: description.clone(),
                    video_url: video_url.clone(),
                    thumbnail_url: thumbnail_url.clone(),
                    position: *position,
                },
            )?;
            if ctx.robot_mode {
                return emit_robot(&item, ctx.config.robot.include_metadata);
            }
            println!(
                "{} Added '{}' at position {}",
                "✓".green().bold(),
                item.title.cyan(),
                item.order
            );
            Ok(())
        }
        PortfolioCommand::Edit {
            item,
            title,
            video_url,
            description,
            thumbnail_url,
        } => {
            let updated = ctx.db.update_portfolio_item(
                *item,
                PortfolioPatch {
                    title: title.clone(),
                    description: description.clone(),
                    video_url: video_url.clone(),
                    thumbnail_url: thumbnail_url.clone(),
                },
            )?;
            if ctx.robot_mode {
                return emit_robot(&updated, ctx.config.robot.include_metadata);
            }
            println!("{} Updated '{}'", "✓".green().bold(), updated.title.cyan());
            Ok(())
        }
        PortfolioCommand::Remove { item } => {
            let removed = ctx.db.delete_portfolio_item(*item)?;
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({ "id": item, "removed": removed }),
                    ctx.config.robot.include_metadata,
                );
            }
            if removed {
                println!("{} Removed item {}", "✓".green().bold(), item);
            } else {
                println!("{} Item {} does not exist", "!".yellow(), item);
            }
            Ok(())
        }
        PortfolioCommand::Reorder { profile, items } => {
            let ordered = ctx.db.reorder_portfolio(*profile, items)?;
            print_items(ctx, &ordered)
        }
        PortfolioCommand::List { profile } => {
            let items = ctx.db.list_portfolio_items(*profile)?;
            print_items(ctx, &items)
        }
    }
}

fn print_items(ctx: &AppContext, items: &[PortfolioItem]) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(items, ctx.config.robot.include_metadata);
    }
    if items.is_empty() {
        println!("{}", "No portfolio items.".dimmed());
    }
    for item in items {
        let marker = if item.is_featured() { "*" } else { " " };
        println!(
            "{marker}{:>2}  {:>4}  {:<32} {}  {}",
            item.order,
            item.id,
            item.title.cyan(),
            item.video_url,
            or_dash(item.thumbnail_url.as_deref()).dimmed()
        );
    }
    Ok(())
}
