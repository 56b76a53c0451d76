use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::{EditoraError, Result};
use crate::search::SearchSettings;
use crate::storage::Database;

pub struct AppContext {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: Config,
    pub db: Arc<Database>,
    pub robot_mode: bool,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let root = find_root()?;
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| default_config_path(&root));
        let config = Config::load(cli.config.as_deref(), &root)?;
        let db = open_database(&root, &config)?;
        let output_format = cli.output_format();

        Ok(Self {
            root,
            config_path,
            config,
            db: Arc::new(db),
            robot_mode: output_format == OutputFormat::Json,
            output_format,
            verbosity: cli.verbose,
        })
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings::from_config(&self.config.search)
    }
}

/// Open the configured database and apply the busy timeout.
pub fn open_database(root: &Path, config: &Config) -> Result<Database> {
    let db = Database::open(config.storage.database_path(root))?;
    db.set_busy_timeout(config.storage.busy_timeout())?;
    Ok(db)
}

/// `EDITORA_ROOT`, else the nearest `.editora` directory upwards, else the
/// per-user data directory.
pub fn find_root() -> Result<PathBuf> {
    if let Ok(root) = std::env::var("EDITORA_ROOT") {
        return Ok(PathBuf::from(root));
    }
    let cwd = std::env::current_dir()?;
    if let Some(found) = find_upwards(&cwd, ".editora") {
        return Ok(found);
    }

    global_root()
}

pub fn global_root() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| EditoraError::MissingConfig("data directory not found".to_string()))?;
    Ok(data_dir.join("editora"))
}

fn default_config_path(root: &Path) -> PathBuf {
    if root.ends_with(".editora") || std::env::var_os("EDITORA_ROOT").is_some() {
        Config::project_path(root)
    } else {
        Config::global_path().unwrap_or_else(|| Config::project_path(root))
    }
}

fn find_upwards(start: &Path, name: &str) -> Option<PathBuf> {
    let mut current = Some(start);
    while let Some(dir) = current {
        let candidate = dir.join(name);
        if candidate.is_dir() {
            return Some(candidate);
        }
        current = dir.parent();
    }
    None
}
