//! Schema bootstrap, tracked through `PRAGMA user_version`.

use rusqlite::Connection;
use tracing::info;

use crate::error::Result;

pub const SCHEMA_VERSION: u32 = 1;

const V1: &str = "
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    full_name TEXT,
    user_type TEXT NOT NULL DEFAULT 'client',
    country TEXT,
    years_of_experience INTEGER,
    bio TEXT,
    created_at TEXT NOT NULL
);

-- user_id carries no foreign key: deleting a user leaves an orphan profile
-- that search drops instead of failing.
CREATE TABLE IF NOT EXISTS editor_profiles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL UNIQUE,
    headline TEXT,
    about TEXT,
    software TEXT NOT NULL DEFAULT '[]',
    editing_styles TEXT NOT NULL DEFAULT '[]',
    expertise TEXT NOT NULL DEFAULT '[]',
    equipment TEXT NOT NULL DEFAULT '[]',
    basic_rate REAL,
    medium_rate REAL,
    advanced_rate REAL,
    view_count INTEGER NOT NULL DEFAULT 0,
    contact_click_count INTEGER NOT NULL DEFAULT 0,
    professional_type TEXT DEFAULT 'editor',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS portfolio_items (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id INTEGER NOT NULL REFERENCES editor_profiles(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT,
    video_url TEXT NOT NULL,
    thumbnail_url TEXT,
    position INTEGER NOT NULL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_portfolio_profile_position
    ON portfolio_items(profile_id, position);

CREATE TABLE IF NOT EXISTS briefs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    client_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    budget REAL,
    deadline TEXT,
    status TEXT NOT NULL DEFAULT 'open',
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_briefs_client ON briefs(client_id);

CREATE TABLE IF NOT EXISTS reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    profile_id INTEGER NOT NULL REFERENCES editor_profiles(id) ON DELETE CASCADE,
    reviewer_id INTEGER NOT NULL,
    rating INTEGER NOT NULL CHECK (rating BETWEEN 1 AND 5),
    comment TEXT,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_reviews_profile ON reviews(profile_id);
";

/// Bring the schema up to [`SCHEMA_VERSION`]; returns the resulting version.
pub fn run_migrations(conn: &Connection) -> Result<u32> {
    let current: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if current < 1 {
        conn.execute_batch(V1)?;
        conn.execute_batch(&format!("PRAGMA user_version = {SCHEMA_VERSION};"))?;
        info!(from = current, to = SCHEMA_VERSION, "schema migrated");
    }
    Ok(SCHEMA_VERSION.max(current))
}
