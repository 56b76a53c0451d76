//! editora review - Rate editor profiles

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::user::resolve_user;
use crate::cli::output::emit_robot;
use crate::core::NewReview;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ReviewArgs {
    #[command(subcommand)]
    pub command: ReviewCommand,
}

#[derive(Subcommand, Debug)]
pub enum ReviewCommand {
    /// Review a profile
    Add {
        /// Profile id
        profile: i64,
        /// Reviewer user id or username
        #[arg(long)]
        by: String,
        /// 1 to 5
        #[arg(long)]
        rating: u8,
        #[arg(long)]
        comment: Option<String>,
    },

    /// List reviews of a profile with the average rating
    List {
        /// Profile id
        profile: i64,
    },

    /// Delete a review
    Delete { id: i64 },
}

pub fn run(ctx: &AppContext, args: &ReviewArgs) -> Result<()> {
    match &args.command {
        ReviewCommand::Add {
            profile,
            by,
            rating,
            comment,
        } => {
            let reviewer = resolve_user(ctx, by)?;
            let review = ctx.db.create_review(&NewReview {
                profile_id: *profile,
                reviewer_id: reviewer.id,
                rating: *rating,
                comment: comment.clone(),
            })?;
            if ctx.robot_mode {
                return emit_robot(&review, ctx.config.robot.include_metadata);
            }
            println!(
                "{} {} rated profile {} with {}",
                "✓".green().bold(),
                reviewer.username.cyan(),
                profile,
                "★".repeat(usize::from(review.rating)).yellow()
            );
            Ok(())
        }
        ReviewCommand::List { profile } => {
            let reviews = ctx.db.list_reviews(*profile)?;
            let summary = ctx.db.rating_summary(*profile)?;
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({ "reviews": reviews, "summary": summary }),
                    ctx.config.robot.include_metadata,
                );
            }
            match summary.average {
                Some(avg) => println!(
                    "{} {avg:.2} from {} reviews",
                    "Average:".bold(),
                    summary.count
                ),
                None => println!("{}", "No reviews yet.".dimmed()),
            }
            for review in &reviews {
                println!(
                    "{:>4}  {}  {}",
                    review.id,
                    "★".repeat(usize::from(review.rating)).yellow(),
                    review.comment.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        ReviewCommand::Delete { id } => {
            let removed = ctx.db.delete_review(*id)?;
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({ "id": id, "removed": removed }),
                    ctx.config.robot.include_metadata,
                );
            }
            println!("{} Deleted review {}", "✓".green().bold(), id);
            Ok(())
        }
    }
}
