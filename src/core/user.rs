//! Marketplace users.
//!
//! `User` is the stored record. Its password never leaves the process: the
//! field is skipped on serialization, and every outward-facing code path
//! converts to [`UserPublic`], which has no password field at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_non_empty, validate_email};
use crate::error::{EditoraError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Editor,
    #[default]
    Client,
    Admin,
}

impl UserType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Editor => "editor",
            Self::Client => "client",
            Self::Admin => "admin",
        }
    }

    /// Case-insensitive parse; `None` for unknown values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "editor" => Some(Self::Editor),
            "client" => Some(Self::Client),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub full_name: Option<String>,
    pub user_type: UserType,
    pub country: Option<String>,
    pub years_of_experience: Option<u32>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A user as exposed to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub user_type: UserType,
    pub country: Option<String>,
    pub years_of_experience: Option<u32>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            user_type: user.user_type,
            country: user.country.clone(),
            years_of_experience: user.years_of_experience,
            bio: user.bio.clone(),
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub user_type: UserType,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<u32>,
    #[serde(default)]
    pub bio: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("username", &self.username)?;
        require_non_empty("password", &self.password)?;
        validate_email(&self.email)?;
        if self.username.chars().any(char::is_whitespace) {
            return Err(EditoraError::ValidationFailed(
                "username must not contain whitespace".into(),
            ));
        }
        Ok(())
    }
}

/// Partial user update. Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub user_type: Option<UserType>,
    pub country: Option<String>,
    pub years_of_experience: Option<u32>,
    pub bio: Option<String>,
}

impl UserPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.full_name.is_none()
            && self.user_type.is_none()
            && self.country.is_none()
            && self.years_of_experience.is_none()
            && self.bio.is_none()
    }
}

impl User {
    /// Shallow merge of `patch` over this record.
    pub fn apply(&mut self, patch: UserPatch) -> Result<()> {
        if let Some(email) = patch.email {
            validate_email(&email)?;
            self.email = email;
        }
        if let Some(value) = patch.full_name {
            self.full_name = Some(value);
        }
        if let Some(value) = patch.user_type {
            self.user_type = value;
        }
        if let Some(value) = patch.country {
            self.country = Some(value);
        }
        if let Some(value) = patch.years_of_experience {
            self.years_of_experience = Some(value);
        }
        if let Some(value) = patch.bio {
            self.bio = Some(value);
        }
        Ok(())
    }

    #[must_use]
    pub fn public(&self) -> UserPublic {
        UserPublic::from(self)
    }
}
