//! editora search - Search editor profiles

use clap::Args;

use crate::app::AppContext;
use crate::cli::formatters::SearchResultsView;
use crate::cli::output::emit_robot;
use crate::core::ProfessionalType;
use crate::error::Result;
use crate::search::{self, ExperienceLevel, FilterSpec, SortBy};

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Raw query string, as the HTTP API takes it (e.g. "software=1,2&maxRate=50")
    #[arg(long)]
    pub query: Option<String>,

    /// Software ids; any match qualifies
    #[arg(long, value_delimiter = ',')]
    pub software: Vec<u32>,

    /// Editing style ids; any match qualifies
    #[arg(long, value_delimiter = ',')]
    pub styles: Vec<u32>,

    /// Upper bound on the basic rate; NaN and infinities are ignored
    #[arg(long)]
    pub max_rate: Option<f64>,

    /// beginner (0-2 years), intermediate (3-5) or expert (6+)
    #[arg(long, value_parser = parse_level)]
    pub level: Option<ExperienceLevel>,

    #[arg(long = "type", value_parser = parse_type)]
    pub professional_type: Option<ProfessionalType>,

    /// Countries, case-insensitive
    #[arg(long, value_delimiter = ',')]
    pub country: Vec<String>,

    /// Expertise substrings, case-insensitive
    #[arg(long, value_delimiter = ',')]
    pub expertise: Vec<String>,

    /// price_low, price_high, experience or popularity
    #[arg(long, value_parser = parse_sort)]
    pub sort: Option<SortBy>,

    #[arg(long, short)]
    pub page: Option<i64>,

    #[arg(long, short)]
    pub limit: Option<i64>,
}

fn parse_level(value: &str) -> std::result::Result<ExperienceLevel, String> {
    ExperienceLevel::parse(value)
        .ok_or_else(|| format!("unknown experience level '{value}' (beginner|intermediate|expert)"))
}

fn parse_type(value: &str) -> std::result::Result<ProfessionalType, String> {
    ProfessionalType::parse(value).ok_or_else(|| format!("unknown professional type '{value}'"))
}

fn parse_sort(value: &str) -> std::result::Result<SortBy, String> {
    SortBy::parse(value).ok_or_else(|| {
        let known: Vec<&str> = SortBy::ALL.iter().map(|s| s.as_str()).collect();
        format!("unknown sort '{value}' ({})", known.join("|"))
    })
}

impl SearchArgs {
    /// Flags take precedence over the same criterion in `--query`.
    pub fn to_filters(&self) -> FilterSpec {
        let mut filters = self
            .query
            .as_deref()
            .map(FilterSpec::from_query)
            .unwrap_or_default();
        if !self.software.is_empty() {
            filters = filters.with_software(self.software.iter().copied());
        }
        if !self.styles.is_empty() {
            filters = filters.with_editing_styles(self.styles.iter().copied());
        }
        if let Some(rate) = self.max_rate.filter(|rate| rate.is_finite()) {
            filters = filters.with_max_rate(rate);
        }
        if let Some(level) = self.level {
            filters = filters.with_experience_level(level);
        }
        if let Some(kind) = self.professional_type {
            filters = filters.with_professional_type(kind);
        }
        if !self.country.is_empty() {
            filters = filters.with_countries(self.country.iter().cloned());
        }
        if !self.expertise.is_empty() {
            filters = filters.with_expertise(self.expertise.iter().cloned());
        }
        if let Some(sort) = self.sort {
            filters = filters.with_sort(sort);
        }
        if let Some(page) = self.page {
            filters.page = Some(page.max(1));
        }
        if self.limit.is_some() {
            filters.limit = self.limit;
        }
        filters
    }
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let filters = args.to_filters();
    let response = search::run(&ctx.db, &filters, &ctx.search_settings())?;

    if ctx.robot_mode {
        return emit_robot(&response, ctx.config.robot.include_metadata);
    }
    print!("{}", SearchResultsView::new(&response, &filters).render());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_query() {
        let args = SearchArgs {
            query: Some("maxRate=80&country=Chile&sortBy=price_low".into()),
            max_rate: Some(40.0),
            ..SearchArgs::default()
        };
        let filters = args.to_filters();
        assert_eq!(filters.max_rate, Some(40.0));
        assert_eq!(filters.sort_by, Some(SortBy::PriceLow));
        assert!(filters.country.is_some_and(|c| c.contains("Chile")));
    }

    #[test]
    fn page_flag_is_clamped() {
        let args = SearchArgs {
            page: Some(-3),
            ..SearchArgs::default()
        };
        assert_eq!(args.to_filters().page, Some(1));
    }

    #[test]
    fn no_flags_is_unconstrained() {
        assert!(SearchArgs::default().to_filters().is_unconstrained());
    }
}
