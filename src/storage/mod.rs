//! Storage layer for editora
//!
//! A single SQLite file holds every marketplace entity. Entity-specific
//! operations are `impl Database` blocks in the sibling modules.

pub mod briefs;
pub mod codec;
pub mod migrations;
pub mod portfolio;
pub mod profiles;
pub mod reviews;
pub mod seed;
pub mod sqlite;
pub mod users;

pub use profiles::Counter;
pub use seed::SeedReport;
pub use sqlite::Database;
