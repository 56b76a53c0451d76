//! editora config - Inspect the effective configuration

use clap::{Args, Subcommand};

use crate::app::AppContext;
use crate::cli::output::emit_robot;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommand>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the merged configuration (default)
    Show,

    /// Print one value by dotted key, e.g. search.max_limit
    Get { key: String },

    /// Print the config file and database locations
    Path,
}

pub fn run(ctx: &AppContext, args: &ConfigArgs) -> Result<()> {
    match args.command.as_ref().unwrap_or(&ConfigCommand::Show) {
        ConfigCommand::Show => {
            if ctx.robot_mode {
                return emit_robot(&ctx.config, ctx.config.robot.include_metadata);
            }
            print!("{}", ctx.config.to_toml()?);
        }
        ConfigCommand::Get { key } => {
            let value = ctx.config.get_value(key)?;
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({ "key": key, "value": value }),
                    ctx.config.robot.include_metadata,
                );
            }
            match value {
                serde_json::Value::String(s) => println!("{s}"),
                other => println!("{other}"),
            }
        }
        ConfigCommand::Path => {
            let database = ctx.config.storage.database_path(&ctx.root);
            if ctx.robot_mode {
                return emit_robot(
                    serde_json::json!({
                        "root": ctx.root,
                        "config": ctx.config_path,
                        "database": database,
                    }),
                    ctx.config.robot.include_metadata,
                );
            }
            println!("root:     {}", ctx.root.display());
            println!("config:   {}", ctx.config_path.display());
            println!("database: {}", database.display());
        }
    }
    Ok(())
}
