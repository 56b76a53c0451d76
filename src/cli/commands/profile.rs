//! editora profile - Manage editor profiles

use std::collections::BTreeSet;

use clap::{Args, Subcommand};
use colored::Colorize;
use itertools::Itertools;

use crate::app::AppContext;
use crate::cli::commands::user::resolve_user;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, money, or_dash};
use crate::core::{EditorProfile, NewProfile, ProfessionalType, ProfilePatch};
use crate::error::Result;
use crate::search::editor_detail;

#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Fields shared by `create` and `update`.
#[derive(Args, Debug)]
pub struct ProfileFields {
    #[arg(long)]
    pub headline: Option<String>,
    #[arg(long)]
    pub about: Option<String>,
    /// Software ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub software: Option<Vec<u32>>,
    /// Editing style ids, comma separated
    #[arg(long, value_delimiter = ',')]
    pub styles: Option<Vec<u32>>,
    #[arg(long, value_delimiter = ',')]
    pub expertise: Option<Vec<String>>,
    #[arg(long, value_delimiter = ',')]
    pub equipment: Option<Vec<String>>,
    #[arg(long)]
    pub basic_rate: Option<f64>,
    #[arg(long)]
    pub medium_rate: Option<f64>,
    #[arg(long)]
    pub advanced_rate: Option<f64>,
    /// editor, videographer, sound, lighting, colorist, vfx, animator, director
    #[arg(long = "type", value_parser = parse_professional_type)]
    pub professional_type: Option<ProfessionalType>,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Create the profile of a user
    Create {
        /// User id or username
        user: String,
        #[command(flatten)]
        fields: ProfileFields,
    },

    /// Show a profile with its portfolio and rating
    Show { id: i64 },

    /// Update fields of a profile
    Update {
        id: i64,
        #[command(flatten)]
        fields: ProfileFields,
    },

    /// Record a profile view
    View { id: i64 },

    /// Record a contact click
    Contact { id: i64 },
}

fn parse_professional_type(value: &str) -> std::result::Result<ProfessionalType, String> {
    ProfessionalType::parse(value).ok_or_else(|| {
        format!(
            "unknown professional type '{value}' ({})",
            ProfessionalType::ALL.iter().map(|t| t.as_str()).join("|")
        )
    })
}

fn to_set(ids: Option<&Vec<u32>>) -> Option<BTreeSet<u32>> {
    ids.map(|ids| ids.iter().copied().collect())
}

pub fn run(ctx: &AppContext, args: &ProfileArgs) -> Result<()> {
    match &args.command {
        ProfileCommand::Create { user, fields } => {
            let user = resolve_user(ctx, user)?;
            let profile = ctx.db.create_profile(&NewProfile {
                user_id: user.id,
                headline: fields.headline.clone(),
                about: fields.about.clone(),
                software: to_set(fields.software.as_ref()).unwrap_or_default(),
                editing_styles: to_set(fields.styles.as_ref()).unwrap_or_default(),
                expertise: fields.expertise.clone().unwrap_or_default(),
                equipment: fields.equipment.clone().unwrap_or_default(),
                basic_rate: fields.basic_rate,
                medium_rate: fields.medium_rate,
                advanced_rate: fields.advanced_rate,
                professional_type: fields.professional_type,
            })?;
            report(ctx, "Created profile", &profile)
        }
        ProfileCommand::Show { id } => show(ctx, *id),
        ProfileCommand::Update { id, fields } => {
            let patch = ProfilePatch {
                headline: fields.headline.clone(),
                about: fields.about.clone(),
                software: to_set(fields.software.as_ref()),
                editing_styles: to_set(fields.styles.as_ref()),
                expertise: fields.expertise.clone(),
                equipment: fields.equipment.clone(),
                basic_rate: fields.basic_rate,
                medium_rate: fields.medium_rate,
                advanced_rate: fields.advanced_rate,
                professional_type: fields.professional_type,
            };
            let profile = ctx.db.update_profile(*id, patch)?;
            report(ctx, "Updated profile", &profile)
        }
        ProfileCommand::View { id } => {
            let profile = ctx.db.increment_view_count(*id)?;
            counters(ctx, &profile)
        }
        ProfileCommand::Contact { id } => {
            let profile = ctx.db.increment_contact_clicks(*id)?;
            counters(ctx, &profile)
        }
    }
}

fn show(ctx: &AppContext, id: i64) -> Result<()> {
    let detail = editor_detail(&ctx.db, id)?;
    if ctx.robot_mode {
        return emit_robot(&detail, ctx.config.robot.include_metadata);
    }
    let profile = &detail.profile;
    let mut layout = HumanLayout::new();
    layout
        .title(&format!(
            "{} (@{})",
            detail.user.full_name.as_deref().unwrap_or(&detail.user.username),
            detail.user.username
        ))
        .kv("profile", &profile.id.to_string())
        .kv("type", profile.type_label())
        .kv("headline", &or_dash(profile.headline.as_deref()))
        .kv("country", &or_dash(detail.user.country.as_deref()))
        .kv("experience", &or_dash(detail.user.years_of_experience))
        .kv(
            "rates",
            &format!(
                "{} / {} / {}",
                money(profile.basic_rate),
                money(profile.medium_rate),
                money(profile.advanced_rate)
            ),
        )
        .kv("software", &profile.software.iter().join(", "))
        .kv("styles", &profile.editing_styles.iter().join(", "))
        .kv("expertise", &profile.expertise.join(", "))
        .kv("equipment", &profile.equipment.join(", "))
        .kv(
            "rating",
            &detail.rating.average.map_or_else(
                || "no reviews".to_string(),
                |avg| format!("{avg:.2} ({} reviews)", detail.rating.count),
            ),
        )
        .kv("views", &profile.view_count.to_string())
        .kv("contacts", &profile.contact_click_count.to_string());
    if !detail.portfolio.is_empty() {
        layout.blank().section("Portfolio");
        for item in &detail.portfolio {
            layout.bullet(&format!("[{}] {} <{}>", item.order, item.title, item.video_url));
        }
    }
    emit_human(&layout);
    Ok(())
}

fn report(ctx: &AppContext, verb: &str, profile: &EditorProfile) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(profile, ctx.config.robot.include_metadata);
    }
    println!(
        "{} {verb} {} ({})",
        "✓".green().bold(),
        profile.id.to_string().cyan(),
        profile.type_label()
    );
    Ok(())
}

fn counters(ctx: &AppContext, profile: &EditorProfile) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(
            serde_json::json!({
                "id": profile.id,
                "viewCount": profile.view_count,
                "contactClickCount": profile.contact_click_count,
            }),
            ctx.config.robot.include_metadata,
        );
    }
    println!(
        "profile {}: {} views, {} contact clicks",
        profile.id.to_string().cyan(),
        profile.view_count,
        profile.contact_click_count
    );
    Ok(())
}
