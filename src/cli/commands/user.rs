//! editora user - Manage marketplace accounts

use clap::{Args, Subcommand};
use colored::Colorize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, or_dash};
use crate::core::{NewUser, UserPatch, UserPublic, UserType};
use crate::error::{EditoraError, Result};

#[derive(Args, Debug)]
pub struct UserArgs {
    #[command(subcommand)]
    pub command: UserCommand,
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    /// Register a user
    Add {
        username: String,
        #[arg(long)]
        email: String,
        /// Stored as given; hashing happens upstream
        #[arg(long, env = "EDITORA_USER_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        full_name: Option<String>,
        /// editor, client or admin
        #[arg(long, default_value = "client", value_parser = parse_user_type)]
        user_type: UserType,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Show a user by id or username
    Show { user: String },

    /// Update fields of a user
    Update {
        user: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        full_name: Option<String>,
        #[arg(long, value_parser = parse_user_type)]
        user_type: Option<UserType>,
        #[arg(long)]
        country: Option<String>,
        #[arg(long)]
        years: Option<u32>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Delete a user (their profile is kept)
    Delete { user: String },

    /// List all users
    List,
}

pub(crate) fn parse_user_type(value: &str) -> std::result::Result<UserType, String> {
    UserType::parse(value).ok_or_else(|| format!("unknown user type '{value}' (editor|client|admin)"))
}

pub fn run(ctx: &AppContext, args: &UserArgs) -> Result<()> {
    match &args.command {
        UserCommand::Add {
            username,
            email,
            password,
            full_name,
            user_type,
            country,
            years,
            bio,
        } => {
            let user = ctx.db.create_user(&NewUser {
                username: username.clone(),
                email: email.clone(),
                password: password.clone(),
                full_name: full_name.clone(),
                user_type: *user_type,
                country: country.clone(),
                years_of_experience: *years,
                bio: bio.clone(),
            })?;
            report(ctx, "Created", &user.public())
        }
        UserCommand::Show { user } => {
            let user = resolve_user(ctx, user)?;
            report(ctx, "User", &user)
        }
        UserCommand::Update {
            user,
            email,
            full_name,
            user_type,
            country,
            years,
            bio,
        } => {
            let id = resolve_user(ctx, user)?.id;
            let patch = UserPatch {
                email: email.clone(),
                full_name: full_name.clone(),
                user_type: *user_type,
                country: country.clone(),
                years_of_experience: *years,
                bio: bio.clone(),
            };
            let updated = ctx.db.update_user(id, patch)?;
            report(ctx, "Updated", &updated.public())
        }
        UserCommand::Delete { user } => {
            let id = resolve_user(ctx, user)?.id;
            let removed = ctx.db.delete_user(id)?;
            if ctx.robot_mode {
                emit_robot(
                    serde_json::json!({ "id": id, "removed": removed }),
                    ctx.config.robot.include_metadata,
                )
            } else {
                println!("{} Deleted user {}", "✓".green().bold(), id.to_string().cyan());
                Ok(())
            }
        }
        UserCommand::List => {
            let users: Vec<UserPublic> = ctx.db.list_users()?.iter().map(UserPublic::from).collect();
            if ctx.robot_mode {
                return emit_robot(&users, ctx.config.robot.include_metadata);
            }
            if users.is_empty() {
                println!("{}", "No users yet.".dimmed());
            }
            for user in &users {
                println!(
                    "{:>4}  {:<20} {:<8} {}",
                    user.id,
                    user.username.cyan(),
                    user.user_type.as_str(),
                    or_dash(user.country.as_deref())
                );
            }
            Ok(())
        }
    }
}

/// Numeric input is an id, anything else a username.
pub(crate) fn resolve_user(ctx: &AppContext, input: &str) -> Result<UserPublic> {
    let found = match input.parse::<i64>() {
        Ok(id) => ctx.db.get_user(id)?,
        Err(_) => ctx.db.get_user_by_username(input)?,
    };
    found
        .map(UserPublic::from)
        .ok_or_else(|| EditoraError::not_found("user", input))
}

fn report(ctx: &AppContext, verb: &str, user: &UserPublic) -> Result<()> {
    if ctx.robot_mode {
        return emit_robot(user, ctx.config.robot.include_metadata);
    }
    let mut layout = HumanLayout::new();
    layout
        .title(&format!("{verb}: {}", user.username))
        .kv("id", &user.id.to_string())
        .kv("email", &user.email)
        .kv("name", &or_dash(user.full_name.as_deref()))
        .kv("type", user.user_type.as_str())
        .kv("country", &or_dash(user.country.as_deref()))
        .kv("experience", &or_dash(user.years_of_experience))
        .kv("joined", &user.created_at.format("%Y-%m-%d").to_string());
    emit_human(&layout);
    Ok(())
}
