//! Search criteria and permissive query-string parsing.
//!
//! Parsing never fails: malformed values are dropped and treated as absent,
//! so a bad parameter widens the search instead of erroring.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ProfessionalType;

/// Sort key for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    PriceLow,
    PriceHigh,
    Experience,
    #[default]
    Popularity,
}

impl SortBy {
    pub const ALL: [Self; 4] = [
        Self::PriceLow,
        Self::PriceHigh,
        Self::Experience,
        Self::Popularity,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PriceLow => "price_low",
            Self::PriceHigh => "price_high",
            Self::Experience => "experience",
            Self::Popularity => "popularity",
        }
    }

    /// Accepts `price_low`, `price-low` and `priceLow` spellings.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "pricelow" => Some(Self::PriceLow),
            "pricehigh" => Some(Self::PriceHigh),
            "experience" => Some(Self::Experience),
            "popularity" => Some(Self::Popularity),
            _ => None,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Experience bands over `yearsOfExperience`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    /// 0 to 2 years
    Beginner,
    /// 3 to 5 years
    Intermediate,
    /// more than 5 years
    Expert,
}

impl ExperienceLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
        }
    }

    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    #[must_use]
    pub const fn classify(years: u32) -> Self {
        match years {
            0..=2 => Self::Beginner,
            3..=5 => Self::Intermediate,
            _ => Self::Expert,
        }
    }

    #[must_use]
    pub fn contains(self, years: u32) -> bool {
        Self::classify(years) == self
    }
}

/// Request-scoped search criteria. Every field is optional and `None` means
/// "no constraint".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub software: Option<BTreeSet<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing_styles: Option<BTreeSet<u32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<ExperienceLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub professional_type: Option<ProfessionalType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expertise: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<SortBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
}

impl FilterSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string (`a=1&b=2,3`), with or without a leading `?`.
    #[must_use]
    pub fn from_query(raw: &str) -> Self {
        let pairs = raw
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| match pair.split_once('=') {
                Some((key, value)) => (decode_component(key), decode_component(value)),
                None => (decode_component(pair), String::new()),
            });
        Self::from_pairs(pairs)
    }

    /// Build from already-decoded key/value pairs. Repeated list keys
    /// accumulate; repeated scalar keys keep the last valid value.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filters = Self::default();
        let mut software = BTreeSet::new();
        let mut styles = BTreeSet::new();
        let mut countries = BTreeSet::new();
        let mut expertise = Vec::new();

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            match canonical_key(key.as_ref()).as_str() {
                "software" => software.extend(split_ids(value)),
                "editingstyles" => styles.extend(split_ids(value)),
                "country" => countries.extend(split_list(value)),
                "expertise" => {
                    for term in split_list(value) {
                        if !expertise
                            .iter()
                            .any(|t: &String| t.eq_ignore_ascii_case(&term))
                        {
                            expertise.push(term);
                        }
                    }
                }
                "maxrate" => {
                    if let Some(rate) = value.parse::<f64>().ok().filter(|r| r.is_finite()) {
                        filters.max_rate = Some(rate);
                    }
                }
                "experiencelevel" => {
                    if let Some(level) = ExperienceLevel::parse(value) {
                        filters.experience_level = Some(level);
                    }
                }
                "professionaltype" => {
                    if let Some(kind) = ProfessionalType::parse(value) {
                        filters.professional_type = Some(kind);
                    }
                }
                "sortby" => {
                    if let Some(sort) = SortBy::parse(value) {
                        filters.sort_by = Some(sort);
                    }
                }
                "page" => {
                    if let Ok(page) = value.parse::<i64>() {
                        filters.page = Some(page.max(1));
                    }
                }
                "limit" => {
                    if let Ok(limit) = value.parse::<i64>() {
                        filters.limit = Some(limit);
                    }
                }
                other => debug!(key = other, "ignoring unknown query key"),
            }
        }

        filters.software = non_empty(software);
        filters.editing_styles = non_empty(styles);
        filters.country = non_empty(countries);
        filters.expertise = (!expertise.is_empty()).then_some(expertise);
        filters
    }

    #[must_use]
    pub fn with_software(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.software = non_empty(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub fn with_editing_styles(mut self, ids: impl IntoIterator<Item = u32>) -> Self {
        self.editing_styles = non_empty(ids.into_iter().collect());
        self
    }

    #[must_use]
    pub const fn with_max_rate(mut self, rate: f64) -> Self {
        self.max_rate = Some(rate);
        self
    }

    #[must_use]
    pub const fn with_experience_level(mut self, level: ExperienceLevel) -> Self {
        self.experience_level = Some(level);
        self
    }

    #[must_use]
    pub const fn with_professional_type(mut self, kind: ProfessionalType) -> Self {
        self.professional_type = Some(kind);
        self
    }

    #[must_use]
    pub fn with_countries<S: Into<String>>(mut self, countries: impl IntoIterator<Item = S>) -> Self {
        self.country = non_empty(
            countries
                .into_iter()
                .map(Into::into)
                .filter(|c: &String| !c.trim().is_empty())
                .collect(),
        );
        self
    }

    #[must_use]
    pub fn with_expertise<S: Into<String>>(mut self, terms: impl IntoIterator<Item = S>) -> Self {
        let terms: Vec<String> = terms
            .into_iter()
            .map(Into::into)
            .filter(|t| !t.trim().is_empty())
            .collect();
        self.expertise = (!terms.is_empty()).then_some(terms);
        self
    }

    #[must_use]
    pub const fn with_sort(mut self, sort: SortBy) -> Self {
        self.sort_by = Some(sort);
        self
    }

    #[must_use]
    pub const fn with_page(mut self, page: i64, limit: i64) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// True when no filtering criterion is set (sort and paging aside).
    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        self.software.is_none()
            && self.editing_styles.is_none()
            && self.max_rate.is_none()
            && self.experience_level.is_none()
            && self.professional_type.is_none()
            && self.country.is_none()
            && self.expertise.is_none()
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}

/// `editing_styles`, `editingStyles` and `editing-styles` share one key.
fn canonical_key(key: &str) -> String {
    key.trim()
        .trim_end_matches("[]")
        .chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

fn split_list(value: &str) -> impl Iterator<Item = String> + '_ {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
}

fn split_ids(value: &str) -> impl Iterator<Item = u32> + '_ {
    split_list(value).filter_map(|item| item.parse::<u32>().ok())
}

fn non_empty<T: Ord>(set: BTreeSet<T>) -> Option<BTreeSet<T>> {
    (!set.is_empty()).then_some(set)
}
