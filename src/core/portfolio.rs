//! Portfolio items and their ordering rules.
//!
//! Items of one profile form a dense sequence: after any insert, delete or
//! reorder the `order` values are exactly `0..n`. The helpers here work on
//! the ordered list of item ids; the store writes the resulting positions
//! back in a single transaction.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validation::{require_non_empty, validate_url};
use crate::error::{EditoraError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: i64,
    pub profile_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub video_url: String,
    pub thumbnail_url: Option<String>,
    pub order: u32,
    pub created_at: DateTime<Utc>,
}

impl PortfolioItem {
    #[must_use]
    pub const fn is_featured(&self) -> bool {
        self.order == 0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub video_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    /// Insert position; appended when absent, clamped to the list length.
    #[serde(default)]
    pub position: Option<usize>,
}

impl NewPortfolioItem {
    pub fn validate(&self) -> Result<()> {
        require_non_empty("title", &self.title)?;
        validate_url("videoUrl", &self.video_url)?;
        if let Some(thumb) = &self.thumbnail_url {
            validate_url("thumbnailUrl", thumb)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_url: Option<String>,
    pub thumbnail_url: Option<String>,
}

impl PortfolioItem {
    pub fn apply(&mut self, patch: PortfolioPatch) -> Result<()> {
        if let Some(title) = &patch.title {
            require_non_empty("title", title)?;
        }
        if let Some(url) = &patch.video_url {
            validate_url("videoUrl", url)?;
        }
        if let Some(url) = &patch.thumbnail_url {
            validate_url("thumbnailUrl", url)?;
        }
        if let Some(value) = patch.title {
            self.title = value;
        }
        if let Some(value) = patch.description {
            self.description = Some(value);
        }
        if let Some(value) = patch.video_url {
            self.video_url = value;
        }
        if let Some(value) = patch.thumbnail_url {
            self.thumbnail_url = Some(value);
        }
        Ok(())
    }
}

/// Insert `id` into the ordered list at `position` (clamped), or append.
pub fn insert_at(ordered: &mut Vec<i64>, id: i64, position: Option<usize>) -> usize {
    let index = position.map_or(ordered.len(), |p| p.min(ordered.len()));
    ordered.insert(index, id);
    index
}

/// Remove `id` from the ordered list. Returns false when absent.
pub fn remove_id(ordered: &mut Vec<i64>, id: i64) -> bool {
    let before = ordered.len();
    ordered.retain(|existing| *existing != id);
    ordered.len() != before
}

/// A reorder request must name every current item exactly once.
pub fn validate_permutation(current: &[i64], requested: &[i64]) -> Result<()> {
    if current.len() != requested.len() {
        return Err(EditoraError::ValidationFailed(format!(
            "reorder must list all {} portfolio items (got {})",
            current.len(),
            requested.len()
        )));
    }
    let known: HashSet<i64> = current.iter().copied().collect();
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !known.contains(id) {
            return Err(EditoraError::ValidationFailed(format!(
                "portfolio item {id} does not belong to this profile"
            )));
        }
        if !seen.insert(*id) {
            return Err(EditoraError::ValidationFailed(format!(
                "portfolio item {id} listed more than once"
            )));
        }
    }
    Ok(())
}

/// True when `orders` is exactly `0..n` in some arrangement.
#[must_use]
pub fn is_dense(orders: &[u32]) -> bool {
    let mut sorted = orders.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(index, order)| usize::try_from(*order).is_ok_and(|o| o == index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_clamps_position() {
        let mut ids = vec![10, 11];
        assert_eq!(insert_at(&mut ids, 12, Some(99)), 2);
        assert_eq!(insert_at(&mut ids, 13, Some(0)), 0);
        assert_eq!(insert_at(&mut ids, 14, None), 4);
        assert_eq!(ids, vec![13, 10, 11, 12, 14]);
    }

    #[test]
    fn remove_reports_presence() {
        let mut ids = vec![1, 2, 3];
        assert!(remove_id(&mut ids, 2));
        assert!(!remove_id(&mut ids, 2));
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn permutation_checks() {
        let current = [1, 2, 3];
        assert!(validate_permutation(&current, &[3, 1, 2]).is_ok());
        assert!(validate_permutation(&current, &[1, 2]).is_err());
        assert!(validate_permutation(&current, &[1, 1, 2]).is_err());
        assert!(validate_permutation(&current, &[1, 2, 4]).is_err());
    }

    #[test]
    fn density() {
        assert!(is_dense(&[]));
        assert!(is_dense(&[2, 0, 1]));
        assert!(!is_dense(&[0, 2]));
        assert!(!is_dense(&[0, 0, 1]));
    }

    #[test]
    fn new_item_requires_http_video() {
        let item = NewPortfolioItem {
            title: "Reel".into(),
            video_url: "vimeo.com/123".into(),
            ..NewPortfolioItem::default()
        };
        assert!(item.validate().is_err());
    }
}
