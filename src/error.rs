//! Error types for editora.

use thiserror::Error;

/// Shared error type for the store, the search engine and both surfaces.
#[derive(Error, Debug)]
pub enum EditoraError {
    #[error("{entity} '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    #[error("validation failed: {0}")]
    ValidationFailed(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("missing configuration: {0}")]
    MissingConfig(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

impl EditoraError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Stable machine-readable code used in robot output and API bodies.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "not_found",
            Self::ValidationFailed(_) => "validation_failed",
            Self::Conflict(_) => "conflict",
            Self::Config(_) | Self::MissingConfig(_) => "config_error",
            Self::Database(_) | Self::Serialization(_) | Self::Io(_) | Self::Server(_) => {
                "internal_error"
            }
        }
    }

    /// HTTP status equivalent of the error category.
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::ValidationFailed(_) => 400,
            Self::Conflict(_) => 409,
            _ => 500,
        }
    }
}

impl From<serde_json::Error> for EditoraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(format!("JSON: {err}"))
    }
}

impl From<toml::de::Error> for EditoraError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("TOML: {err}"))
    }
}

impl From<toml::ser::Error> for EditoraError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(format!("TOML: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, EditoraError>;
