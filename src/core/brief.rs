//! Client briefs: project requests posted by clients.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_non_empty, validate_amount};
use crate::error::{EditoraError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BriefStatus {
    #[default]
    Open,
    InProgress,
    Completed,
    Cancelled,
}

impl BriefStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().replace('-', "_").as_str() {
            "open" => Some(Self::Open),
            "in_progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Open, Self::InProgress | Self::Cancelled)
                | (Self::InProgress, Self::Completed | Self::Cancelled)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub id: i64,
    pub client_id: i64,
    pub title: String,
    pub description: String,
    pub budget: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub status: BriefStatus,
    pub created_at: DateTime<Utc>,
}

impl Brief {
    pub fn transition(&mut self, next: BriefStatus) -> Result<()> {
        if !self.status.can_transition_to(next) {
            return Err(EditoraError::ValidationFailed(format!(
                "brief {} cannot move from {} to {}",
                self.id,
                self.status.as_str(),
                next.as_str()
            )));
        }
        self.status = next;
        Ok(())
    }

    pub fn apply(&mut self, patch: BriefPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            require_non_empty("title", title)?;
        }
        validate_amount("budget", patch.budget)?;
        if let Some(value) = patch.title {
            self.title = value;
        }
        if let Some(value) = patch.description {
            self.description = value;
        }
        if let Some(value) = patch.budget {
            self.budget = Some(value);
        }
        if let Some(value) = patch.deadline {
            self.deadline = Some(value);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBrief {
    pub client_id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl NewBrief {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("title", &self.title)?;
        validate_amount("budget", self.budget)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub budget: Option<f64>,
    pub deadline: Option<NaiveDate>,
}
