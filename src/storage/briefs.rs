//! Brief persistence.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, params};

use super::codec::{format_timestamp, parse_date, parse_timestamp};
use super::sqlite::Database;
use super::users::load_user;
use crate::core::{Brief, BriefPatch, BriefStatus, NewBrief};
use crate::error::{EditoraError, Result};

const BRIEF_COLUMNS: &str = "id, client_id, title, description, budget, deadline, status, created_at";

struct BriefRow {
    id: i64,
    client_id: i64,
    title: String,
    description: String,
    budget: Option<f64>,
    deadline: Option<String>,
    status: String,
    created_at: String,
}

impl BriefRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            client_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            budget: row.get(4)?,
            deadline: row.get(5)?,
            status: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn decode(self) -> Result<Brief> {
        let status = BriefStatus::parse(&self.status).ok_or_else(|| {
            EditoraError::Serialization(format!(
                "brief {}: unknown status '{}'",
                self.id, self.status
            ))
        })?;
        Ok(Brief {
            id: self.id,
            client_id: self.client_id,
            title: self.title,
            description: self.description,
            budget: self.budget,
            deadline: parse_date("briefs.deadline", self.deadline.as_deref())?,
            status,
            created_at: parse_timestamp("briefs.created_at", &self.created_at)?,
        })
    }
}

fn load_brief(conn: &Connection, id: i64) -> Result<Option<Brief>> {
    conn.query_row(
        &format!("SELECT {BRIEF_COLUMNS} FROM briefs WHERE id = ?1"),
        [id],
        BriefRow::from_row,
    )
    .optional()?
    .map(BriefRow::decode)
    .transpose()
}

fn query_briefs(conn: &Connection, clause: &str, key: &dyn rusqlite::ToSql) -> Result<Vec<Brief>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {BRIEF_COLUMNS} FROM briefs WHERE {clause} = ?1 ORDER BY created_at DESC, id DESC"
    ))?;
    let rows = stmt
        .query_map([key], BriefRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(BriefRow::decode).collect()
}

fn save_brief(conn: &Connection, brief: &Brief) -> Result<()> {
    conn.execute(
        "UPDATE briefs SET title = ?2, description = ?3, budget = ?4, deadline = ?5, status = ?6
         WHERE id = ?1",
        params![
            brief.id,
            brief.title,
            brief.description,
            brief.budget,
            brief.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
            brief.status.as_str(),
        ],
    )?;
    Ok(())
}

impl Database {
    /// Post a brief for an existing client.
    pub fn create_brief(&self, new: &NewBrief) -> Result<Brief> {
        new.validate()?;
        let id = self.with_tx(|tx| {
            if load_user(tx, new.client_id)?.is_none() {
                return Err(EditoraError::not_found("user", new.client_id));
            }
            tx.execute(
                "INSERT INTO briefs (client_id, title, description, budget, deadline, status, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    new.client_id,
                    new.title.trim(),
                    new.description,
                    new.budget,
                    new.deadline.map(|d| d.format("%Y-%m-%d").to_string()),
                    BriefStatus::Open.as_str(),
                    format_timestamp(&Utc::now()),
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;
        self.get_brief(id)?
            .ok_or_else(|| EditoraError::not_found("brief", id))
    }

    pub fn get_brief(&self, id: i64) -> Result<Option<Brief>> {
        self.with_conn(|conn| load_brief(conn, id))
    }

    /// A client's briefs, newest first.
    pub fn list_briefs_by_client(&self, client_id: i64) -> Result<Vec<Brief>> {
        self.with_conn(|conn| query_briefs(conn, "client_id", &client_id))
    }

    /// Briefs with the given status, newest first.
    pub fn list_briefs_by_status(&self, status: BriefStatus) -> Result<Vec<Brief>> {
        self.with_conn(|conn| query_briefs(conn, "status", &status.as_str()))
    }

    pub fn update_brief(&self, id: i64, patch: BriefPatch) -> Result<Brief> {
        self.with_tx(|tx| {
            let mut brief =
                load_brief(tx, id)?.ok_or_else(|| EditoraError::not_found("brief", id))?;
            brief.apply(patch)?;
            save_brief(tx, &brief)?;
            Ok(brief)
        })
    }

    /// Move a brief along its lifecycle; illegal transitions are rejected.
    pub fn set_brief_status(&self, id: i64, status: BriefStatus) -> Result<Brief> {
        self.with_tx(|tx| {
            let mut brief =
                load_brief(tx, id)?.ok_or_else(|| EditoraError::not_found("brief", id))?;
            brief.transition(status)?;
            save_brief(tx, &brief)?;
            Ok(brief)
        })
    }

    pub fn delete_brief(&self, id: i64) -> Result<bool> {
        let removed =
            self.with_conn(|conn| Ok(conn.execute("DELETE FROM briefs WHERE id = ?1", [id])?))?;
        Ok(removed > 0)
    }
}
