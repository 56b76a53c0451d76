//! Editor profile persistence.

use chrono::Utc;
use rusqlite::types::Value;
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use tracing::debug;

use super::codec::{
    decode_id_set, decode_professional_type, decode_tags, encode_id_set, encode_tags,
    format_timestamp, non_negative_u64, parse_timestamp,
};
use super::sqlite::{Database, conflict_on_constraint};
use super::users::load_user;
use crate::core::profile::normalize_tags;
use crate::core::{EditorProfile, NewProfile, ProfessionalType, ProfilePatch};
use crate::error::{EditoraError, Result};

const PROFILE_COLUMNS: &str = "id, user_id, headline, about, software, editing_styles, expertise, \
                               equipment, basic_rate, medium_rate, advanced_rate, view_count, \
                               contact_click_count, professional_type, created_at, updated_at";

/// Raw `editor_profiles` row; JSON columns are still text here.
struct ProfileRow {
    id: i64,
    user_id: i64,
    headline: Option<String>,
    about: Option<String>,
    software: Option<String>,
    editing_styles: Option<String>,
    expertise: Option<String>,
    equipment: Option<String>,
    basic_rate: Option<f64>,
    medium_rate: Option<f64>,
    advanced_rate: Option<f64>,
    view_count: i64,
    contact_click_count: i64,
    professional_type: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            headline: row.get(2)?,
            about: row.get(3)?,
            software: row.get(4)?,
            editing_styles: row.get(5)?,
            expertise: row.get(6)?,
            equipment: row.get(7)?,
            basic_rate: row.get(8)?,
            medium_rate: row.get(9)?,
            advanced_rate: row.get(10)?,
            view_count: row.get(11)?,
            contact_click_count: row.get(12)?,
            professional_type: row.get(13)?,
            created_at: row.get(14)?,
            updated_at: row.get(15)?,
        })
    }

    fn decode(self) -> Result<EditorProfile> {
        Ok(EditorProfile {
            id: self.id,
            user_id: self.user_id,
            headline: self.headline,
            about: self.about,
            software: decode_id_set("software", self.software.as_deref().unwrap_or_default())?,
            editing_styles: decode_id_set(
                "editing_styles",
                self.editing_styles.as_deref().unwrap_or_default(),
            )?,
            expertise: decode_tags("expertise", self.expertise.as_deref().unwrap_or_default())?,
            equipment: decode_tags("equipment", self.equipment.as_deref().unwrap_or_default())?,
            basic_rate: self.basic_rate,
            medium_rate: self.medium_rate,
            advanced_rate: self.advanced_rate,
            view_count: non_negative_u64(self.view_count),
            contact_click_count: non_negative_u64(self.contact_click_count),
            professional_type: decode_professional_type(self.professional_type.as_deref()),
            created_at: parse_timestamp("editor_profiles.created_at", &self.created_at)?,
            updated_at: parse_timestamp("editor_profiles.updated_at", &self.updated_at)?,
        })
    }
}

fn load_profile_where(conn: &Connection, clause: &str, key: i64) -> Result<Option<EditorProfile>> {
    conn.query_row(
        &format!("SELECT {PROFILE_COLUMNS} FROM editor_profiles WHERE {clause} = ?1"),
        [key],
        ProfileRow::from_row,
    )
    .optional()?
    .map(ProfileRow::decode)
    .transpose()
}

pub(crate) fn load_profile(conn: &Connection, id: i64) -> Result<Option<EditorProfile>> {
    load_profile_where(conn, "id", id)
}

pub(crate) fn load_all_profiles(conn: &Connection) -> Result<Vec<EditorProfile>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PROFILE_COLUMNS} FROM editor_profiles ORDER BY id"
    ))?;
    let rows = stmt
        .query_map([], ProfileRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(ProfileRow::decode).collect()
}

/// Columns a patch touches, in a fixed order.
fn patched_columns(patch: &ProfilePatch) -> Vec<&'static str> {
    [
        ("headline", patch.headline.is_some()),
        ("about", patch.about.is_some()),
        ("software", patch.software.is_some()),
        ("editing_styles", patch.editing_styles.is_some()),
        ("expertise", patch.expertise.is_some()),
        ("equipment", patch.equipment.is_some()),
        ("basic_rate", patch.basic_rate.is_some()),
        ("medium_rate", patch.medium_rate.is_some()),
        ("advanced_rate", patch.advanced_rate.is_some()),
        ("professional_type", patch.professional_type.is_some()),
    ]
    .into_iter()
    .filter_map(|(column, present)| present.then_some(column))
    .collect()
}

/// Encode the merged value of `column` for storage.
fn column_value(profile: &EditorProfile, column: &str) -> Result<Value> {
    let value = match column {
        "headline" => Value::from(profile.headline.clone()),
        "about" => Value::from(profile.about.clone()),
        "software" => Value::Text(encode_id_set(&profile.software)?),
        "editing_styles" => Value::Text(encode_id_set(&profile.editing_styles)?),
        "expertise" => Value::Text(encode_tags(&profile.expertise)?),
        "equipment" => Value::Text(encode_tags(&profile.equipment)?),
        "basic_rate" => Value::from(profile.basic_rate),
        "medium_rate" => Value::from(profile.medium_rate),
        "advanced_rate" => Value::from(profile.advanced_rate),
        "professional_type" => Value::from(
            profile
                .professional_type
                .as_ref()
                .map(|tag| tag.as_str().to_string()),
        ),
        other => {
            return Err(EditoraError::ValidationFailed(format!(
                "profile column {other} is not patchable"
            )));
        }
    };
    Ok(value)
}

/// Which engagement counter to bump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counter {
    Views,
    ContactClicks,
}

impl Counter {
    const fn column(self) -> &'static str {
        match self {
            Self::Views => "view_count",
            Self::ContactClicks => "contact_click_count",
        }
    }
}

impl Database {
    /// Create the single profile a user may own.
    pub fn create_profile(&self, new: &NewProfile) -> Result<EditorProfile> {
        new.validate()?;
        let now = format_timestamp(&Utc::now());
        let professional_type = new.professional_type.unwrap_or(ProfessionalType::Editor);
        let expertise = normalize_tags(new.expertise.clone());
        let equipment = normalize_tags(new.equipment.clone());

        let id = self.with_tx(|tx| {
            if load_user(tx, new.user_id)?.is_none() {
                return Err(EditoraError::not_found("user", new.user_id));
            }
            tx.execute(
                "INSERT INTO editor_profiles (user_id, headline, about, software, editing_styles,
                     expertise, equipment, basic_rate, medium_rate, advanced_rate,
                     professional_type, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
                params![
                    new.user_id,
                    new.headline,
                    new.about,
                    encode_id_set(&new.software)?,
                    encode_id_set(&new.editing_styles)?,
                    encode_tags(&expertise)?,
                    encode_tags(&equipment)?,
                    new.basic_rate,
                    new.medium_rate,
                    new.advanced_rate,
                    professional_type.as_str(),
                    now,
                ],
            )
            .map_err(|err| {
                conflict_on_constraint(err, format!("user {} already has a profile", new.user_id))
            })?;
            Ok(tx.last_insert_rowid())
        })?;
        debug!(profile_id = id, user_id = new.user_id, "profile created");
        self.get_profile(id)?
            .ok_or_else(|| EditoraError::not_found("profile", id))
    }

    pub fn get_profile(&self, id: i64) -> Result<Option<EditorProfile>> {
        self.with_conn(|conn| load_profile(conn, id))
    }

    pub fn get_profile_by_user(&self, user_id: i64) -> Result<Option<EditorProfile>> {
        self.with_conn(|conn| load_profile_where(conn, "user_id", user_id))
    }

    /// All profiles in id order.
    pub fn list_profiles(&self) -> Result<Vec<EditorProfile>> {
        self.with_conn(load_all_profiles)
    }

    /// Shallow merge; counters and ownership are untouched. Last write wins.
    ///
    /// Only the patched columns are written, so stored values the decoder
    /// could not type (dropped ids, unrecognized types) survive unrelated
    /// updates.
    pub fn update_profile(&self, id: i64, patch: ProfilePatch) -> Result<EditorProfile> {
        self.with_tx(|tx| {
            let mut profile =
                load_profile(tx, id)?.ok_or_else(|| EditoraError::not_found("profile", id))?;
            let columns = patched_columns(&patch);
            profile.apply(patch)?;

            let mut assignments = Vec::with_capacity(columns.len() + 1);
            let mut values: Vec<Value> = Vec::with_capacity(columns.len() + 2);
            for column in columns {
                values.push(column_value(&profile, column)?);
                assignments.push(format!("{column} = ?{}", values.len()));
            }
            values.push(Value::Text(format_timestamp(&Utc::now())));
            assignments.push(format!("updated_at = ?{}", values.len()));
            values.push(Value::Integer(id));

            tx.execute(
                &format!(
                    "UPDATE editor_profiles SET {} WHERE id = ?{}",
                    assignments.join(", "),
                    values.len()
                ),
                params_from_iter(values),
            )?;
            load_profile(tx, id)?.ok_or_else(|| EditoraError::not_found("profile", id))
        })
    }

    /// Increment a counter in a single statement and return the profile.
    pub fn increment_counter(&self, id: i64, counter: Counter) -> Result<EditorProfile> {
        self.with_conn(|conn| {
            let column = counter.column();
            let changed = conn.execute(
                &format!("UPDATE editor_profiles SET {column} = {column} + 1 WHERE id = ?1"),
                [id],
            )?;
            if changed == 0 {
                return Err(EditoraError::not_found("profile", id));
            }
            load_profile(conn, id)?.ok_or_else(|| EditoraError::not_found("profile", id))
        })
    }

    pub fn increment_view_count(&self, id: i64) -> Result<EditorProfile> {
        self.increment_counter(id, Counter::Views)
    }

    pub fn increment_contact_clicks(&self, id: i64) -> Result<EditorProfile> {
        self.increment_counter(id, Counter::ContactClicks)
    }
}
