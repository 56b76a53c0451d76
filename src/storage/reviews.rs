//! Review persistence.

use chrono::Utc;
use rusqlite::{Connection, Row, params};

use super::codec::{format_timestamp, parse_timestamp};
use super::profiles::load_profile;
use super::sqlite::{Database, conflict_on_constraint};
use crate::core::{NewReview, RatingSummary, Review};
use crate::error::{EditoraError, Result};

struct ReviewRow {
    id: i64,
    profile_id: i64,
    reviewer_id: i64,
    rating: i64,
    comment: Option<String>,
    created_at: String,
}

impl ReviewRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            profile_id: row.get(1)?,
            reviewer_id: row.get(2)?,
            rating: row.get(3)?,
            comment: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn decode(self) -> Result<Review> {
        let rating = u8::try_from(self.rating).map_err(|_| {
            EditoraError::Serialization(format!("review {}: rating {}", self.id, self.rating))
        })?;
        Ok(Review {
            id: self.id,
            profile_id: self.profile_id,
            reviewer_id: self.reviewer_id,
            rating,
            comment: self.comment,
            created_at: parse_timestamp("reviews.created_at", &self.created_at)?,
        })
    }
}

fn load_reviews(conn: &Connection, profile_id: i64) -> Result<Vec<Review>> {
    let mut stmt = conn.prepare(
        "SELECT id, profile_id, reviewer_id, rating, comment, created_at
         FROM reviews WHERE profile_id = ?1 ORDER BY created_at DESC, id DESC",
    )?;
    let rows = stmt
        .query_map([profile_id], ReviewRow::from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    rows.into_iter().map(ReviewRow::decode).collect()
}

impl Database {
    pub fn create_review(&self, new: &NewReview) -> Result<Review> {
        new.validate()?;
        let created_at = Utc::now();
        let id = self.with_tx(|tx| {
            if load_profile(tx, new.profile_id)?.is_none() {
                return Err(EditoraError::not_found("profile", new.profile_id));
            }
            tx.execute(
                "INSERT INTO reviews (profile_id, reviewer_id, rating, comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    new.profile_id,
                    new.reviewer_id,
                    new.rating,
                    new.comment,
                    format_timestamp(&created_at),
                ],
            )
            .map_err(|err| conflict_on_constraint(err, "rating out of range"))?;
            Ok(tx.last_insert_rowid())
        })?;
        Ok(Review {
            id,
            profile_id: new.profile_id,
            reviewer_id: new.reviewer_id,
            rating: new.rating,
            comment: new.comment.clone(),
            created_at,
        })
    }

    /// Reviews of one profile, newest first.
    pub fn list_reviews(&self, profile_id: i64) -> Result<Vec<Review>> {
        self.with_conn(|conn| load_reviews(conn, profile_id))
    }

    pub fn rating_summary(&self, profile_id: i64) -> Result<RatingSummary> {
        Ok(RatingSummary::from_reviews(&self.list_reviews(profile_id)?))
    }

    pub fn delete_review(&self, id: i64) -> Result<bool> {
        let removed =
            self.with_conn(|conn| Ok(conn.execute("DELETE FROM reviews WHERE id = ?1", [id])?))?;
        Ok(removed > 0)
    }
}
