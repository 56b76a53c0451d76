//! Search results formatter
//!
//! Plain-text rendering of a `SearchResponse` for terminals. JSON output goes
//! through the robot envelope instead.

use std::fmt::Write as _;

use itertools::Itertools;
use tracing::debug;

use crate::cli::output::{money, or_dash};
use crate::search::{FilterSpec, RankedProfile, SearchResponse};

pub struct SearchResultsView<'a> {
    response: &'a SearchResponse,
    filters: &'a FilterSpec,
}

impl<'a> SearchResultsView<'a> {
    pub const fn new(response: &'a SearchResponse, filters: &'a FilterSpec) -> Self {
        Self { response, filters }
    }

    pub fn render(&self) -> String {
        debug!(results = self.response.results.len(), "rendering search results");
        if self.response.results.is_empty() {
            self.render_empty()
        } else {
            self.render_populated()
        }
    }

    fn render_empty(&self) -> String {
        let mut out = format!(
            "! No editors found (page {} of {})\n\n",
            self.response.pagination.page, self.response.pagination.total_pages
        );
        if self.filters.is_unconstrained() {
            out.push_str("The directory is empty. Seed demo data with: editora seed\n");
        } else {
            out.push_str(
                "Try:\n  \
                 - Raising or removing --max-rate\n  \
                 - Listing more software or editing styles\n  \
                 - Dropping the country or experience filters\n",
            );
        }
        out
    }

    fn render_populated(&self) -> String {
        let info = &self.response.pagination;
        let noun = if info.total == 1 { "editor matches" } else { "editors match" };
        let mut out = format!(
            "{} {noun} (page {} of {}, {} per page)\n\n",
            info.total, info.page, info.total_pages, info.limit
        );
        let offset = (info.page.saturating_sub(1) as usize).saturating_mul(info.limit as usize);
        for (index, hit) in self.response.results.iter().enumerate() {
            render_hit(&mut out, offset + index + 1, hit);
        }
        out
    }
}

fn render_hit(out: &mut String, rank: usize, hit: &RankedProfile) {
    let name = hit.user.full_name.as_deref().unwrap_or(&hit.user.username);
    let _ = writeln!(
        out,
        "{rank}. {name} (@{}) [{}]",
        hit.user.username,
        hit.profile.type_label()
    );
    if let Some(headline) = &hit.profile.headline {
        let _ = writeln!(out, "   {headline}");
    }
    let _ = writeln!(
        out,
        "   rates: {} / {} / {}   experience: {}   country: {}",
        money(hit.profile.basic_rate),
        money(hit.profile.medium_rate),
        money(hit.profile.advanced_rate),
        hit.user
            .years_of_experience
            .map_or_else(|| "-".to_string(), |y| format!("{y}y")),
        or_dash(hit.user.country.as_deref()),
    );
    if !hit.profile.expertise.is_empty() {
        let _ = writeln!(out, "   expertise: {}", hit.profile.expertise.iter().join(", "));
    }
    let _ = writeln!(
        out,
        "   views: {}   contacts: {}",
        hit.profile.view_count, hit.profile.contact_click_count
    );
    if let Some(featured) = &hit.featured_portfolio {
        let _ = writeln!(out, "   featured: {} <{}>", featured.title, featured.video_url);
    }
    out.push('\n');
}
