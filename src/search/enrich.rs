//! Result enrichment: public user data and featured portfolio items.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::predicates::Candidate;
use crate::core::{EditorProfile, PortfolioItem, RatingSummary, UserPublic};
use crate::error::{EditoraError, Result};
use crate::storage::Database;

/// One search hit as sent over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedProfile {
    pub profile: EditorProfile,
    pub user: UserPublic,
    pub featured_portfolio: Option<PortfolioItem>,
}

impl RankedProfile {
    #[must_use]
    pub fn new(candidate: Candidate<'_>, featured: Option<&PortfolioItem>) -> Self {
        Self {
            profile: candidate.profile.clone(),
            user: candidate.user.public(),
            featured_portfolio: featured.cloned(),
        }
    }
}

/// Index the `order == 0` item of each profile.
#[must_use]
pub fn featured_by_profile(items: &[PortfolioItem]) -> HashMap<i64, &PortfolioItem> {
    items
        .iter()
        .filter(|item| item.is_featured())
        .map(|item| (item.profile_id, item))
        .collect()
}

/// A full editor page: profile, owner, ordered portfolio and rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorDetail {
    pub profile: EditorProfile,
    pub user: UserPublic,
    pub portfolio: Vec<PortfolioItem>,
    pub rating: RatingSummary,
}

/// Load one editor. Orphaned profiles are reported as missing.
pub fn editor_detail(db: &Database, profile_id: i64) -> Result<EditorDetail> {
    let profile = db
        .get_profile(profile_id)?
        .ok_or_else(|| EditoraError::not_found("profile", profile_id))?;
    let user = db
        .get_user(profile.user_id)?
        .ok_or_else(|| EditoraError::not_found("profile", profile_id))?;
    let portfolio = db.list_portfolio_items(profile_id)?;
    let rating = db.rating_summary(profile_id)?;
    Ok(EditorDetail {
        profile,
        user: user.public(),
        portfolio,
        rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NewPortfolioItem, NewProfile, NewUser};

    #[test]
    fn detail_hides_orphans() {
        let db = Database::open_in_memory().unwrap();
        let user = db
            .create_user(&NewUser {
                username: "lucia".into(),
                email: "lucia@example.com".into(),
                password: "secret".into(),
                ..NewUser::default()
            })
            .unwrap();
        let profile = db
            .create_profile(&NewProfile {
                user_id: user.id,
                ..NewProfile::default()
            })
            .unwrap();
        db.add_portfolio_item(
            profile.id,
            &NewPortfolioItem {
                title: "Showreel".into(),
                video_url: "https://vimeo.com/1".into(),
                ..NewPortfolioItem::default()
            },
        )
        .unwrap();

        let detail = editor_detail(&db, profile.id).unwrap();
        assert_eq!(detail.portfolio.len(), 1);
        assert_eq!(detail.user.username, "lucia");
        assert!(!serde_json::to_string(&detail).unwrap().contains("secret"));

        db.delete_user(user.id).unwrap();
        assert!(editor_detail(&db, profile.id).unwrap_err().is_not_found());
    }
}
