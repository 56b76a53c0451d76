//! Portfolio persistence with dense per-profile ordering.
//!
//! Every mutation loads the profile's ordered id list, edits it in memory and
//! rewrites `position` for all items inside one transaction.

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, Row, Transaction, params};
use tracing::debug;

use super::codec::{format_timestamp, non_negative_u32, parse_timestamp};
use super::profiles::load_profile;
use super::sqlite::Database;
use crate::core::portfolio::{insert_at, remove_id, validate_permutation};
use crate::core::{NewPortfolioItem, PortfolioItem, PortfolioPatch};
use crate::error::{EditoraError, Result};

const ITEM_COLUMNS: &str =
    "id, profile_id, title, description, video_url, thumbnail_url, position, created_at";

struct PortfolioRow {
    id: i64,
    profile_id: i64,
    title: String,
    description: Option<String>,
    video_url: String,
    thumbnail_url: Option<String>,
    position: i64,
    created_at: String,
}

impl PortfolioRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            profile_id: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            video_url: row.get(4)?,
            thumbnail_url: row.get(5)?,
            position: row.get(6)?,
            created_at: row.get(7)?,
        })
    }

    fn decode(self) -> Result<PortfolioItem> {
        Ok(PortfolioItem {
            id: self.id,
            profile_id: self.profile_id,
            title: self.title,
            description: self.description,
            video_url: self.video_url,
            thumbnail_url: self.thumbnail_url,
            order: non_negative_u32(self.position),
            created_at: parse_timestamp("portfolio_items.created_at", &self.created_at)?,
        })
    }
}

fn load_item(conn: &Connection, id: i64) -> Result<Option<PortfolioItem>> {
    conn.query_row(
        &format!("SELECT {ITEM_COLUMNS} FROM portfolio_items WHERE id = ?1"),
        [id],
        PortfolioRow::from_row,
    )
    .optional()?
    .map(PortfolioRow::decode)
    .transpose()
}

fn load_items(conn: &Connection, profile_id: i64) -> Result<Vec<PortfolioItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM portfolio_items WHERE profile_id = ?1 ORDER BY position, id"
    ))?;
    let rows = stmt
        .query_map([profile_id], PortfolioRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(PortfolioRow::decode).collect()
}

fn ordered_ids(conn: &Connection, profile_id: i64) -> Result<Vec<i64>> {
    let mut stmt = conn
        .prepare("SELECT id FROM portfolio_items WHERE profile_id = ?1 ORDER BY position, id")?;
    let ids = stmt
        .query_map([profile_id], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<i64>>>()?;
    Ok(ids)
}

fn write_positions(tx: &Transaction<'_>, ordered: &[i64]) -> Result<()> {
    let mut stmt = tx.prepare("UPDATE portfolio_items SET position = ?2 WHERE id = ?1")?;
    for (position, id) in (0_i64..).zip(ordered) {
        stmt.execute(params![id, position])?;
    }
    Ok(())
}

fn require_profile(conn: &Connection, profile_id: i64) -> Result<()> {
    if load_profile(conn, profile_id)?.is_none() {
        return Err(EditoraError::not_found("profile", profile_id));
    }
    Ok(())
}

impl Database {
    /// Add an item at the requested position (clamped) or at the end.
    pub fn add_portfolio_item(
        &self,
        profile_id: i64,
        new: &NewPortfolioItem,
    ) -> Result<PortfolioItem> {
        new.validate()?;
        let created_at = format_timestamp(&Utc::now());
        let id = self.with_tx(|tx| {
            require_profile(tx, profile_id)?;
            let mut ordered = ordered_ids(tx, profile_id)?;
            tx.execute(
                "INSERT INTO portfolio_items (profile_id, title, description, video_url,
                                              thumbnail_url, position, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    profile_id,
                    new.title.trim(),
                    new.description,
                    new.video_url.trim(),
                    new.thumbnail_url,
                    i64::try_from(ordered.len()).unwrap_or(i64::MAX),
                    created_at,
                ],
            )?;
            let id = tx.last_insert_rowid();
            insert_at(&mut ordered, id, new.position);
            write_positions(tx, &ordered)?;
            Ok(id)
        })?;
        debug!(profile_id, item_id = id, "portfolio item added");
        self.get_portfolio_item(id)?
            .ok_or_else(|| EditoraError::not_found("portfolio item", id))
    }

    pub fn get_portfolio_item(&self, id: i64) -> Result<Option<PortfolioItem>> {
        self.with_conn(|conn| load_item(conn, id))
    }

    /// Items of one profile, featured first.
    pub fn list_portfolio_items(&self, profile_id: i64) -> Result<Vec<PortfolioItem>> {
        self.with_conn(|conn| load_items(conn, profile_id))
    }

    pub fn update_portfolio_item(&self, id: i64, patch: PortfolioPatch) -> Result<PortfolioItem> {
        self.with_tx(|tx| {
            let mut item =
                load_item(tx, id)?.ok_or_else(|| EditoraError::not_found("portfolio item", id))?;
            item.apply(patch)?;
            tx.execute(
                "UPDATE portfolio_items
                 SET title = ?2, description = ?3, video_url = ?4, thumbnail_url = ?5
                 WHERE id = ?1",
                params![
                    id,
                    item.title,
                    item.description,
                    item.video_url,
                    item.thumbnail_url
                ],
            )?;
            Ok(item)
        })
    }

    /// Delete an item and close the gap it leaves.
    pub fn delete_portfolio_item(&self, id: i64) -> Result<bool> {
        self.with_tx(|tx| {
            let Some(item) = load_item(tx, id)? else {
                return Ok(false);
            };
            let mut ordered = ordered_ids(tx, item.profile_id)?;
            remove_id(&mut ordered, id);
            tx.execute("DELETE FROM portfolio_items WHERE id = ?1", [id])?;
            write_positions(tx, &ordered)?;
            Ok(true)
        })
    }

    /// Replace the ordering; `ordered` must list every item exactly once.
    pub fn reorder_portfolio(&self, profile_id: i64, ordered: &[i64]) -> Result<Vec<PortfolioItem>> {
        self.with_tx(|tx| {
            require_profile(tx, profile_id)?;
            let current = ordered_ids(tx, profile_id)?;
            validate_permutation(&current, ordered)?;
            write_positions(tx, ordered)?;
            load_items(tx, profile_id)
        })
    }

    /// The first item of every profile that has one.
    pub fn featured_portfolio_items(&self) -> Result<Vec<PortfolioItem>> {
        self.with_conn(load_featured_items)
    }
}

pub(crate) fn load_featured_items(conn: &Connection) -> Result<Vec<PortfolioItem>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ITEM_COLUMNS} FROM portfolio_items WHERE position = 0 ORDER BY profile_id"
    ))?;
    let rows = stmt
        .query_map([], PortfolioRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(PortfolioRow::decode).collect()
}
