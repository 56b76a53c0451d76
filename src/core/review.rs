//! Client reviews of editor profiles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EditoraError, Result};

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: i64,
    pub profile_id: i64,
    pub reviewer_id: i64,
    pub rating: u8,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub profile_id: i64,
    pub reviewer_id: i64,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewReview {
    pub fn validate(&self) -> Result<()> {
        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(EditoraError::ValidationFailed(format!(
                "rating must be between {MIN_RATING} and {MAX_RATING} (got {})",
                self.rating
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    pub count: usize,
    pub average: Option<f64>,
}

impl RatingSummary {
    #[must_use]
    pub fn from_reviews(reviews: &[Review]) -> Self {
        if reviews.is_empty() {
            return Self {
                count: 0,
                average: None,
            };
        }
        let sum: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
        #[allow(clippy::cast_precision_loss)]
        let average = f64::from(sum) / reviews.len() as f64;
        Self {
            count: reviews.len(),
            average: Some((average * 100.0).round() / 100.0),
        }
    }
}
