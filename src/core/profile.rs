//! Editor profiles: a freelancer's professional listing.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::validate_amount;
use crate::error::Result;

/// The kind of professional behind a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfessionalType {
    Editor,
    Videographer,
    Sound,
    Lighting,
    Colorist,
    Vfx,
    Animator,
    Director,
}

impl ProfessionalType {
    pub const ALL: [Self; 8] = [
        Self::Editor,
        Self::Videographer,
        Self::Sound,
        Self::Lighting,
        Self::Colorist,
        Self::Vfx,
        Self::Animator,
        Self::Director,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Videographer => "videographer",
            Self::Sound => "sound",
            Self::Lighting => "lighting",
            Self::Colorist => "colorist",
            Self::Vfx => "vfx",
            Self::Animator => "animator",
            Self::Director => "director",
        }
    }

    /// Case-insensitive parse. Empty and unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let needle = value.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for ProfessionalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored type: one of the known kinds, or text outside that set kept
/// verbatim so it neither matches another kind nor gets lost on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProfessionalTag {
    Known(ProfessionalType),
    Unrecognized(String),
}

impl ProfessionalTag {
    /// Known kinds parse case-insensitively; any other non-empty text is
    /// kept as-is. Empty text is `None`.
    #[must_use]
    pub fn from_stored(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        Some(
            ProfessionalType::parse(value)
                .map_or_else(|| Self::Unrecognized(value.to_string()), Self::Known),
        )
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(kind) => kind.as_str(),
            Self::Unrecognized(raw) => raw,
        }
    }

    #[must_use]
    pub const fn known(&self) -> Option<ProfessionalType> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<ProfessionalType> for ProfessionalTag {
    fn from(kind: ProfessionalType) -> Self {
        Self::Known(kind)
    }
}

impl fmt::Display for ProfessionalTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorProfile {
    pub id: i64,
    pub user_id: i64,
    pub headline: Option<String>,
    pub about: Option<String>,
    pub software: BTreeSet<u32>,
    pub editing_styles: BTreeSet<u32>,
    pub expertise: Vec<String>,
    pub equipment: Vec<String>,
    pub basic_rate: Option<f64>,
    pub medium_rate: Option<f64>,
    pub advanced_rate: Option<f64>,
    pub view_count: u64,
    pub contact_click_count: u64,
    /// `None` for legacy rows stored without a type.
    pub professional_type: Option<ProfessionalTag>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl EditorProfile {
    /// The known type this listing presents as. Unset listings are
    /// generalist editors; unrecognized stored text is no known type.
    #[must_use]
    pub fn effective_type(&self) -> Option<ProfessionalType> {
        match &self.professional_type {
            Some(tag) => tag.known(),
            None => Some(ProfessionalType::Editor),
        }
    }

    #[must_use]
    pub fn type_label(&self) -> &str {
        self.professional_type
            .as_ref()
            .map_or(ProfessionalType::Editor.as_str(), ProfessionalTag::as_str)
    }

    /// Shallow merge of `patch` over this record.
    pub fn apply(&mut self, patch: ProfilePatch) -> Result<()> {
        patch.validate()?;
        let ProfilePatch {
            headline,
            about,
            software,
            editing_styles,
            expertise,
            equipment,
            basic_rate,
            medium_rate,
            advanced_rate,
            professional_type,
        } = patch;

        if let Some(value) = headline {
            self.headline = Some(value);
        }
        if let Some(value) = about {
            self.about = Some(value);
        }
        if let Some(value) = software {
            self.software = value;
        }
        if let Some(value) = editing_styles {
            self.editing_styles = value;
        }
        if let Some(value) = expertise {
            self.expertise = normalize_tags(value);
        }
        if let Some(value) = equipment {
            self.equipment = normalize_tags(value);
        }
        if let Some(value) = basic_rate {
            self.basic_rate = Some(value);
        }
        if let Some(value) = medium_rate {
            self.medium_rate = Some(value);
        }
        if let Some(value) = advanced_rate {
            self.advanced_rate = Some(value);
        }
        if let Some(value) = professional_type {
            self.professional_type = Some(value.into());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProfile {
    pub user_id: i64,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub about: Option<String>,
    #[serde(default)]
    pub software: BTreeSet<u32>,
    #[serde(default)]
    pub editing_styles: BTreeSet<u32>,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub basic_rate: Option<f64>,
    #[serde(default)]
    pub medium_rate: Option<f64>,
    #[serde(default)]
    pub advanced_rate: Option<f64>,
    /// Defaults to [`ProfessionalType::Editor`] when omitted.
    #[serde(default)]
    pub professional_type: Option<ProfessionalType>,
}

impl NewProfile {
    pub fn validate(&self) -> Result<()> {
        validate_amount("basicRate", self.basic_rate)?;
        validate_amount("mediumRate", self.medium_rate)?;
        validate_amount("advancedRate", self.advanced_rate)?;
        Ok(())
    }
}

/// Partial profile update. Counters are not patchable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub headline: Option<String>,
    pub about: Option<String>,
    pub software: Option<BTreeSet<u32>>,
    pub editing_styles: Option<BTreeSet<u32>>,
    pub expertise: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    pub basic_rate: Option<f64>,
    pub medium_rate: Option<f64>,
    pub advanced_rate: Option<f64>,
    pub professional_type: Option<ProfessionalType>,
}

impl ProfilePatch {
    pub fn validate(&self) -> Result<()> {
        validate_amount("basicRate", self.basic_rate)?;
        validate_amount("mediumRate", self.medium_rate)?;
        validate_amount("advancedRate", self.advanced_rate)?;
        Ok(())
    }
}

/// Trim tags, drop empties and duplicates while keeping first-seen order.
#[must_use]
pub fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    tags.into_iter()
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.to_lowercase()))
        .collect()
}
