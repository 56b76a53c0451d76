//! User persistence.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::codec::{format_timestamp, non_negative_u32, parse_timestamp};
use super::sqlite::{Database, conflict_on_constraint};
use crate::core::{NewUser, User, UserPatch, UserType};
use crate::error::{EditoraError, Result};

const USER_COLUMNS: &str = "id, username, email, password, full_name, user_type, country, \
                            years_of_experience, bio, created_at";

/// Raw `users` row before validation.
struct UserRow {
    id: i64,
    username: String,
    email: String,
    password: String,
    full_name: Option<String>,
    user_type: String,
    country: Option<String>,
    years_of_experience: Option<i64>,
    bio: Option<String>,
    created_at: String,
}

impl UserRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            email: row.get(2)?,
            password: row.get(3)?,
            full_name: row.get(4)?,
            user_type: row.get(5)?,
            country: row.get(6)?,
            years_of_experience: row.get(7)?,
            bio: row.get(8)?,
            created_at: row.get(9)?,
        })
    }

    fn decode(self) -> Result<User> {
        Ok(User {
            id: self.id,
            username: self.username,
            email: self.email,
            password: self.password,
            full_name: self.full_name,
            user_type: UserType::parse(&self.user_type).unwrap_or_default(),
            country: self.country.filter(|c| !c.trim().is_empty()),
            years_of_experience: self.years_of_experience.map(non_negative_u32),
            bio: self.bio,
            created_at: parse_timestamp("users.created_at", &self.created_at)?,
        })
    }
}

pub(crate) fn load_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        [id],
        UserRow::from_row,
    )
    .optional()?
    .map(UserRow::decode)
    .transpose()
}

pub(crate) fn load_all_users(conn: &Connection) -> Result<Vec<User>> {
    let mut stmt = conn.prepare(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))?;
    let rows = stmt
        .query_map([], UserRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(UserRow::decode).collect()
}

impl Database {
    pub fn create_user(&self, new: &NewUser) -> Result<User> {
        new.validate()?;
        let created_at = Utc::now();
        let id = self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, email, password, full_name, user_type, country,
                                    years_of_experience, bio, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    new.username.trim(),
                    new.email.trim(),
                    new.password,
                    new.full_name,
                    new.user_type.as_str(),
                    new.country,
                    new.years_of_experience,
                    new.bio,
                    format_timestamp(&created_at),
                ],
            )
            .map_err(|err| {
                conflict_on_constraint(
                    err,
                    format!("username '{}' or email '{}' already registered", new.username, new.email),
                )
            })?;
            Ok(conn.last_insert_rowid())
        })?;
        tracing::debug!(user_id = id, "user created");
        self.get_user(id)?
            .ok_or_else(|| EditoraError::not_found("user", id))
    }

    pub fn get_user(&self, id: i64) -> Result<Option<User>> {
        self.with_conn(|conn| load_user(conn, id))
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.with_conn(|conn| {
            conn.query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                [username],
                UserRow::from_row,
            )
            .optional()?
            .map(UserRow::decode)
            .transpose()
        })
    }

    pub fn list_users(&self) -> Result<Vec<User>> {
        self.with_conn(load_all_users)
    }

    /// Shallow merge; last write wins.
    pub fn update_user(&self, id: i64, patch: UserPatch) -> Result<User> {
        self.with_tx(|tx| {
            let mut user = load_user(tx, id)?.ok_or_else(|| EditoraError::not_found("user", id))?;
            user.apply(patch)?;
            tx.execute(
                "UPDATE users SET email = ?2, full_name = ?3, user_type = ?4, country = ?5,
                                  years_of_experience = ?6, bio = ?7
                 WHERE id = ?1",
                params![
                    id,
                    user.email,
                    user.full_name,
                    user.user_type.as_str(),
                    user.country,
                    user.years_of_experience,
                    user.bio,
                ],
            )
            .map_err(|err| conflict_on_constraint(err, format!("email '{}' already registered", user.email)))?;
            Ok(user)
        })
    }

    /// Delete a user. Their profile, if any, stays behind as an orphan.
    pub fn delete_user(&self, id: i64) -> Result<bool> {
        let removed = self.with_conn(|conn| Ok(conn.execute("DELETE FROM users WHERE id = ?1", [id])?))?;
        Ok(removed > 0)
    }
}
