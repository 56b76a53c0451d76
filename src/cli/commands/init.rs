//! editora init - Initialize editora in current directory or globally

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;

use crate::app::{global_root, open_database};
use crate::config::Config;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct InitArgs {
    /// Initialize globally (per-user data directory) instead of locally (.editora/)
    #[arg(long)]
    pub global: bool,

    /// Overwrite an existing config.toml with defaults
    #[arg(long, short)]
    pub force: bool,
}

/// Runs before an `AppContext` exists, since the root may not exist yet.
pub fn run_without_context(robot_mode: bool, args: &InitArgs) -> Result<()> {
    let root = target_root(args)?;
    std::fs::create_dir_all(&root)?;

    let config_path = Config::project_path(&root);
    let already = config_path.exists();
    let config = if already && !args.force {
        Config::load(Some(&config_path), &root)?
    } else {
        let config = Config::default();
        std::fs::write(&config_path, config.to_toml()?)?;
        config
    };

    let db = open_database(&root, &config)?;
    let database = config.storage.database_path(&root);

    if robot_mode {
        println!(
            "{}",
            serde_json::json!({
                "status": "ok",
                "root": root,
                "config": config_path,
                "database": database,
                "schema_version": db.schema_version(),
                "already_initialized": already && !args.force,
            })
        );
    } else if already && !args.force {
        println!(
            "{} editora already initialized at {}",
            "!".yellow(),
            root.display().to_string().cyan()
        );
    } else {
        println!(
            "{} Initialized editora at {}",
            "✓".green().bold(),
            root.display().to_string().cyan()
        );
        println!("  config:   {}", config_path.display());
        println!("  database: {}", database.display());
    }
    Ok(())
}

fn target_root(args: &InitArgs) -> Result<PathBuf> {
    if args.global {
        return global_root();
    }
    if let Ok(root) = std::env::var("EDITORA_ROOT") {
        return Ok(PathBuf::from(root));
    }
    Ok(std::env::current_dir()?.join(".editora"))
}
