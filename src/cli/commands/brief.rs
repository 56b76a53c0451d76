//! editora brief - Post and track client briefs

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::commands::user::resolve_user;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, money, or_dash};
use crate::core::{Brief, BriefStatus, NewBrief};
use crate::error::{EditoraError, Result};

#[derive(Args, Debug)]
pub struct BriefArgs {
    #[command(subcommand)]
    pub command: BriefCommand,
}

#[derive(Subcommand, Debug)]
pub enum BriefCommand {
    /// Post a new brief
    Add {
        /// Client user id or username
        client: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        budget: Option<f64>,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },

    /// Show a brief
    Show { id: i64 },

    /// List briefs of a client, or all open briefs
    List {
        /// Client user id or username
        #[arg(long)]
        client: Option<String>,
        /// open, in_progress, completed or cancelled
        #[arg(long, value_parser = parse_status, default_value = "open")]
        status: BriefStatus,
    },

    /// Move a brief to another status
    Status {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: BriefStatus,
    },

    /// Delete a brief
    Delete { id: i64 },
}

fn parse_status(value: &str) -> std::result::Result<BriefStatus, String> {
    BriefStatus::parse(value)
        .ok_or_else(|| format!("unknown status '{value}' (open|in_progress|completed|cancelled)"))
}

pub fn run(ctx: &AppContext, args: &BriefArgs) -> Result<()> {
    match &args.command {
        BriefCommand::Add {
            client,
            title,
            description,
            budget,
            deadline,
        } => {
            let client = resolve_user(ctx, client)?;
            let brief = ctx.db.create_brief(&NewBrief {
                client_id: client.id,
                title: title.clone(),
                description: description.clone(),
                budget: *budget,
                deadline: *deadline,
            })?;
            report(ctx, &brief)
        }
        BriefCommand::Show { id } => {
            let brief = ctx
                .db
                .get_brief(*id)?
                .ok_or_else(|| EditoraError::not_found("brief", id))?;
            report(ctx, &brief)
        }
        BriefCommand::List { client, status } => {
            let briefs = match client {
                Some(client) => {
                    let client = resolve_user(ctx, client)?;
                    ctx.db.list_briefs_by_client(client.id)?
                }
                None => ctx.db.list_briefs_by_status(*status)?,
            };
            if ctx.robot_mode {
                return emit_robot(&briefs, ctx.config.robot.include_metadata);
            }
            if briefs.is_empty() {
                println!("{}", "No briefs.".dimmed());
            }
            for brief in &briefs {
                println!(
                    "{:>4}  {:<12} {:<36} {}",
                    brief.id,
                    brief.status.as_str(),
                    brief.title.cyan(),
                    money(brief.budget)
                );
            }
            Ok(())
        }
        BriefCommand::Status { id, status } => {
            let brief = ctx.db.set_brief_status(*id, *status)?;
            report(ctx, &brief)
        }
        BriefCommand::Delete { id } => {
            let removed = ctx.db.delete_brief(*id)?;
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({ "id": id, "removed": removed }),
                    ctx.config.robot.include_metadata,
                );
            }
            println!("{} Deleted brief {}", "✓".green().bold(), id);
            Ok(())
        }
    }
}

fn report(ctx: &AppContext, brief: &Brief) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(brief, ctx.config.robot.include_metadata);
    }
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("Brief {}: {}", brief.id, brief.title))
        .kv("client", &brief.client_id.to_string())
        .kv("status", brief.status.as_str())
        .kv("budget", &money(brief.budget))
        .kv("deadline", &or_dash(brief.deadline))
        .kv("posted", &brief.created_at.format("%Y-%m-%d").to_string());
    if !brief.description.is_empty() {
        layout.blank().push_line(brief.description.clone());
    }
    emit_human(&layout);
    Ok(())
}
