//! Gated predicate pipeline.
//!
//! Each stage is skipped when its criterion is absent; active stages are
//! folded over the candidate list in a fixed order.

use std::collections::BTreeSet;

use tracing::trace;

use super::filters::{ExperienceLevel, FilterSpec};
use crate::core::{EditorProfile, ProfessionalType, User};

/// A profile joined with its owning user.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub profile: &'a EditorProfile,
    pub user: &'a User,
}

struct Stage {
    name: &'static str,
    keep: fn(&FilterSpec, &Candidate<'_>) -> Option<bool>,
}

/// `keep` returns `None` when the stage's criterion is absent.
const PIPELINE: [Stage; 7] = [
    Stage {
        name: "max_rate",
        keep: |f, c| f.max_rate.map(|max| within_rate(c.profile, max)),
    },
    Stage {
        name: "software",
        keep: |f, c| f.software.as_ref().map(|want| intersects(&c.profile.software, want)),
    },
    Stage {
        name: "editing_styles",
        keep: |f, c| {
            f.editing_styles
                .as_ref()
                .map(|want| intersects(&c.profile.editing_styles, want))
        },
    },
    Stage {
        name: "expertise",
        keep: |f, c| {
            f.expertise
                .as_ref()
                .map(|terms| expertise_matches(&c.profile.expertise, terms))
        },
    },
    Stage {
        name: "experience_level",
        keep: |f, c| f.experience_level.map(|level| experience_matches(c.user, level)),
    },
    Stage {
        name: "country",
        keep: |f, c| f.country.as_ref().map(|wanted| country_matches(c.user, wanted)),
    },
    Stage {
        name: "professional_type",
        keep: |f, c| f.professional_type.map(|kind| type_matches(c.profile, kind)),
    },
];

/// Apply every active stage to `candidates`, preserving their order.
pub fn apply<'a>(filters: &FilterSpec, candidates: Vec<Candidate<'a>>) -> Vec<Candidate<'a>> {
    PIPELINE.iter().fold(candidates, |mut remaining, stage| {
        let before = remaining.len();
        remaining.retain(|candidate| (stage.keep)(filters, candidate).unwrap_or(true));
        if remaining.len() != before {
            trace!(stage = stage.name, before, after = remaining.len(), "stage applied");
        }
        remaining
    })
}

/// Profiles without a basic rate never pass a rate ceiling.
#[must_use]
pub fn within_rate(profile: &EditorProfile, max_rate: f64) -> bool {
    profile.basic_rate.is_some_and(|rate| rate <= max_rate)
}

/// OR semantics: any shared id keeps the profile.
#[must_use]
pub fn intersects(have: &BTreeSet<u32>, want: &BTreeSet<u32>) -> bool {
    !have.is_disjoint(want)
}

/// Case-insensitive substring match of any term against any tag.
#[must_use]
pub fn expertise_matches(tags: &[String], terms: &[String]) -> bool {
    let terms: Vec<String> = terms.iter().map(|t| t.trim().to_lowercase()).collect();
    tags.iter().any(|tag| {
        let tag = tag.to_lowercase();
        terms.iter().any(|term| tag.contains(term.as_str()))
    })
}

/// Users without years of experience fail every level.
#[must_use]
pub fn experience_matches(user: &User, level: ExperienceLevel) -> bool {
    user.years_of_experience
        .is_some_and(|years| level.contains(years))
}

#[must_use]
pub fn country_matches(user: &User, wanted: &BTreeSet<String>) -> bool {
    let Some(country) = user.country.as_deref().map(|c| c.trim().to_lowercase()) else {
        return false;
    };
    wanted
        .iter()
        .any(|w| w.trim().to_lowercase() == country)
}

/// Profiles with no stored type count as generalist editors, so they match a
/// request for `editor` and nothing else. Unrecognized stored types match
/// no known kind.
#[must_use]
pub fn type_matches(profile: &EditorProfile, wanted: ProfessionalType) -> bool {
    match &profile.professional_type {
        Some(tag) => tag.known() == Some(wanted),
        None => wanted == ProfessionalType::Editor,
    }
}
