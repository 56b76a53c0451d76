use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{EditoraError, Result};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Defaults, then the global file, then the project file (or only the
    /// explicit file when one is given), then environment overrides.
    pub fn load(explicit_path: Option<&Path>, root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("EDITORA_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?.ok_or_else(|| {
                EditoraError::MissingConfig(format!("config file {} not found", path.display()))
            })?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// `<config_dir>/editora/config.toml`, when a config directory exists.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("editora/config.toml"))
    }

    pub fn project_path(root: &Path) -> PathBuf {
        root.join("config.toml")
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match Self::global_path() {
            Some(path) => Self::load_patch(&path),
            None => Ok(None),
        }
    }

    fn load_project(root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&Self::project_path(root))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            EditoraError::Config(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            EditoraError::Config(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.storage {
            self.storage.merge(patch);
        }
        if let Some(patch) = patch.server {
            self.server.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if env_bool("EDITORA_ROBOT").unwrap_or(false) {
            self.robot.format = "json".to_string();
            self.robot.include_metadata = true;
        }
        if let Some(value) = env_string("EDITORA_ROBOT_FORMAT") {
            self.robot.format = value;
        }

        if let Some(value) = env_u32("EDITORA_SEARCH_DEFAULT_LIMIT")? {
            self.search.default_limit = value;
        }
        if let Some(value) = env_u32("EDITORA_SEARCH_MAX_LIMIT")? {
            self.search.max_limit = value;
        }
        if let Some(value) = env_string("EDITORA_SEARCH_DEFAULT_SORT") {
            self.search.default_sort = value;
        }

        if let Some(value) = env_string("EDITORA_STORAGE_DATABASE") {
            self.storage.database = value;
        }
        if let Some(value) = env_u64("EDITORA_STORAGE_BUSY_TIMEOUT_MS")? {
            self.storage.busy_timeout_ms = value;
        }

        if let Some(value) = env_string("EDITORA_SERVER_BIND") {
            self.server.bind = value;
        }

        Ok(())
    }

    /// Reject settings no component can work with.
    pub fn validate(&self) -> Result<()> {
        if self.search.max_limit == 0 {
            return Err(EditoraError::Config(
                "search.max_limit must be at least 1".to_string(),
            ));
        }
        if self.search.default_limit == 0 || self.search.default_limit > self.search.max_limit {
            return Err(EditoraError::Config(format!(
                "search.default_limit must be between 1 and search.max_limit ({})",
                self.search.max_limit
            )));
        }
        if self.storage.database.trim().is_empty() {
            return Err(EditoraError::Config(
                "storage.database must not be empty".to_string(),
            ));
        }
        if !matches!(self.robot.format.as_str(), "json" | "jsonl") {
            return Err(EditoraError::Config(format!(
                "invalid robot.format {} (expected json|jsonl)",
                self.robot.format
            )));
        }
        Ok(())
    }

    /// Look up a dotted key such as `search.default_limit`.
    pub fn get_value(&self, key: &str) -> Result<serde_json::Value> {
        let mut value = serde_json::to_value(self)?;
        for part in key.split('.') {
            value = value
                .get(part)
                .cloned()
                .ok_or_else(|| EditoraError::Config(format!("unknown config key: {key}")))?;
        }
        Ok(value)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_limit: u32,
    #[serde(default)]
    pub max_limit: u32,
    #[serde(default)]
    pub default_sort: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 12,
            max_limit: 100,
            default_sort: "popularity".to_string(),
        }
    }
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_limit {
            self.default_limit = value;
        }
        if let Some(value) = patch.max_limit {
            self.max_limit = value;
        }
        if let Some(value) = patch.default_sort {
            self.default_sort = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Database file, relative to the editora root unless absolute.
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database: "editora.db".to_string(),
            busy_timeout_ms: 5000,
        }
    }
}

impl StorageConfig {
    fn merge(&mut self, patch: StoragePatch) {
        if let Some(value) = patch.database {
            self.database = value;
        }
        if let Some(value) = patch.busy_timeout_ms {
            self.busy_timeout_ms = value;
        }
    }

    pub fn database_path(&self, root: &Path) -> PathBuf {
        let path = PathBuf::from(&self.database);
        if path.is_absolute() {
            path
        } else {
            root.join(path)
        }
    }

    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5000".to_string(),
        }
    }
}

impl ServerConfig {
    fn merge(&mut self, patch: ServerPatch) {
        if let Some(value) = patch.bind {
            self.bind = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub include_metadata: bool,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            format: "json".to_string(),
            include_metadata: true,
        }
    }
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.format {
            self.format = value;
        }
        if let Some(value) = patch.include_metadata {
            self.include_metadata = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub search: Option<SearchPatch>,
    pub storage: Option<StoragePatch>,
    pub server: Option<ServerPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_limit: Option<u32>,
    pub max_limit: Option<u32>,
    pub default_sort: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StoragePatch {
    pub database: Option<String>,
    pub busy_timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerPatch {
    pub bind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub format: Option<String>,
    pub include_metadata: Option<bool>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn env_bool(key: &str) -> Option<bool> {
    std::env::var(key).ok().map(|value| {
        matches!(
            value.to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    })
}

fn env_u32(key: &str) -> Result<Option<u32>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u32>().map(Some).map_err(|err| {
            EditoraError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}

fn env_u64(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(value) => value.parse::<u64>().map(Some).map_err(|err| {
            EditoraError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        Err(_) => Ok(None),
    }
}
