//! Profile search engine
//!
//! Filters, sorts and paginates editor profiles, then enriches each hit with
//! its owner and featured portfolio item.

use tracing::error;

use crate::error::Result;
use crate::storage::Database;
use crate::storage::portfolio::load_featured_items;
use crate::storage::profiles::load_all_profiles;
use crate::storage::users::load_all_users;

pub mod engine;
pub mod enrich;
pub mod filters;
pub mod pagination;
pub mod predicates;

pub use engine::{SearchCorpus, SearchResponse, SearchSettings, search};
pub use enrich::{EditorDetail, RankedProfile, editor_detail};
pub use filters::{ExperienceLevel, FilterSpec, SortBy};
pub use pagination::{PageInfo, PageRequest};

impl SearchCorpus {
    /// Snapshot the store under a single connection lock.
    pub fn load(db: &Database) -> Result<Self> {
        db.with_conn(|conn| {
            Ok(Self {
                profiles: load_all_profiles(conn)?,
                users: load_all_users(conn)?,
                portfolio: load_featured_items(conn)?,
            })
        })
    }
}

/// Load the corpus and search it. Store failures are logged and returned
/// unchanged; nothing is retried.
pub fn run(db: &Database, filters: &FilterSpec, settings: &SearchSettings) -> Result<SearchResponse> {
    let corpus = SearchCorpus::load(db).inspect_err(|err| {
        error!(error = %err, "failed to load search corpus");
    })?;
    Ok(search(&corpus, filters, settings))
}
