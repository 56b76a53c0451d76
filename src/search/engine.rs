//! Profile search: join, filter, sort, paginate, enrich.
//!
//! The engine is a pure function over a snapshot of the store. Every call
//! re-scans the whole corpus.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::enrich::{RankedProfile, featured_by_profile};
use super::filters::{FilterSpec, SortBy};
use super::pagination::{PageInfo, PageRequest, paginate};
use super::predicates::{self, Candidate};
use crate::config::SearchConfig;
use crate::core::{EditorProfile, PortfolioItem, User};

/// Everything the engine reads: all profiles, all users and the featured
/// (position 0) portfolio items.
#[derive(Debug, Clone, Default)]
pub struct SearchCorpus {
    pub profiles: Vec<EditorProfile>,
    pub users: Vec<User>,
    pub portfolio: Vec<PortfolioItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<RankedProfile>,
    pub pagination: PageInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    pub default_limit: u32,
    pub max_limit: u32,
    pub default_sort: SortBy,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            default_limit: 12,
            max_limit: 100,
            default_sort: SortBy::Popularity,
        }
    }
}

impl SearchSettings {
    #[must_use]
    pub fn from_config(config: &SearchConfig) -> Self {
        let default_sort = SortBy::parse(&config.default_sort).unwrap_or_else(|| {
            warn!(value = %config.default_sort, "unknown default_sort, using popularity");
            SortBy::Popularity
        });
        Self {
            default_limit: config.default_limit,
            max_limit: config.max_limit,
            default_sort,
        }
    }
}

/// Run a search over `corpus`.
#[must_use]
pub fn search(corpus: &SearchCorpus, filters: &FilterSpec, settings: &SearchSettings) -> SearchResponse {
    let users: HashMap<i64, &User> = corpus.users.iter().map(|u| (u.id, u)).collect();

    let mut profiles: Vec<&EditorProfile> = corpus.profiles.iter().collect();
    profiles.sort_by_key(|p| p.id);

    let scanned = profiles.len();
    let candidates: Vec<Candidate<'_>> = profiles
        .into_iter()
        .filter_map(|profile| {
            users
                .get(&profile.user_id)
                .map(|&user| Candidate { profile, user })
        })
        .collect();
    let orphans = scanned - candidates.len();

    let mut matched = predicates::apply(filters, candidates);
    let sort = filters.sort_by.unwrap_or(settings.default_sort);
    sort_candidates(&mut matched, sort);

    debug!(
        scanned,
        orphans,
        matched = matched.len(),
        sort = %sort,
        "search evaluated"
    );

    let request = PageRequest::resolve(
        filters.page,
        filters.limit,
        settings.default_limit,
        settings.max_limit,
    );
    let (page, pagination) = paginate(matched, request);

    let featured = featured_by_profile(&corpus.portfolio);
    let results = page
        .into_iter()
        .map(|candidate| RankedProfile::new(candidate, featured.get(&candidate.profile.id).copied()))
        .collect();

    SearchResponse {
        results,
        pagination,
    }
}

/// Stable single-key sort; equal keys keep their incoming (id) order.
pub fn sort_candidates(candidates: &mut [Candidate<'_>], sort: SortBy) {
    match sort {
        SortBy::PriceLow => candidates.sort_by(|a, b| rate(a).total_cmp(&rate(b))),
        SortBy::PriceHigh => candidates.sort_by(|a, b| rate(b).total_cmp(&rate(a))),
        SortBy::Experience => candidates.sort_by(|a, b| years(b).cmp(&years(a))),
        SortBy::Popularity => {
            candidates.sort_by(|a, b| b.profile.view_count.cmp(&a.profile.view_count));
        }
    }
}

fn rate(candidate: &Candidate<'_>) -> f64 {
    candidate.profile.basic_rate.unwrap_or(0.0)
}

fn years(candidate: &Candidate<'_>) -> u32 {
    candidate.user.years_of_experience.unwrap_or(0)
}
