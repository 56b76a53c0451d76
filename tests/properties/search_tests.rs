use std::collections::BTreeSet;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use editora::core::{EditorProfile, User, UserType};
use editora::search::{FilterSpec, SearchCorpus, SearchSettings, search};

#[derive(Debug, Clone)]
struct Listing {
    views: u64,
    rate: Option<f64>,
    years: Option<u32>,
    software: Vec<u32>,
    orphan: bool,
    password: String,
}

fn listing() -> impl Strategy<Value = Listing> {
    (
        0u64..50,
        proptest::option::of(0.0f64..200.0),
        proptest::option::of(0u32..15),
        proptest::collection::vec(0u32..6, 0..4),
        proptest::bool::weighted(0.2),
        "[a-zA-Z0-9]{6,16}",
    )
        .prop_map(|(views, rate, years, software, orphan, password)| Listing {
            views,
            rate,
            years,
            software,
            orphan,
            password,
        })
}

fn corpus(listings: &[Listing]) -> SearchCorpus {
    let created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut corpus = SearchCorpus::default();
    for (index, listing) in (1i64..).zip(listings) {
        if !listing.orphan {
            corpus.users.push(User {
                id: index,
                username: format!("user{index}"),
                email: format!("user{index}@example.com"),
                password: listing.password.clone(),
                full_name: None,
                user_type: UserType::Editor,
                country: None,
                years_of_experience: listing.years,
                bio: None,
                created_at,
            });
        }
        corpus.profiles.push(EditorProfile {
            id: index,
            user_id: index,
            headline: None,
            about: None,
            software: listing.software.iter().copied().collect::<BTreeSet<_>>(),
            editing_styles: BTreeSet::new(),
            expertise: Vec::new(),
            equipment: Vec::new(),
            basic_rate: listing.rate,
            medium_rate: None,
            advanced_rate: None,
            view_count: listing.views,
            contact_click_count: 0,
            professional_type: None,
            created_at,
            updated_at: created_at,
        });
    }
    corpus
}

fn wide_open() -> SearchSettings {
    SearchSettings {
        default_limit: 1000,
        max_limit: 1000,
        ..SearchSettings::default()
    }
}

proptest! {
    #[test]
    fn unconstrained_search_is_every_owned_profile_by_views(
        listings in proptest::collection::vec(listing(), 0..30)
    ) {
        let corpus = corpus(&listings);
        let response = search(&corpus, &FilterSpec::new(), &wide_open());

        let owned = listings.iter().filter(|l| !l.orphan).count();
        prop_assert_eq!(response.results.len(), owned);
        prop_assert_eq!(response.pagination.total, owned);
        for pair in response.results.windows(2) {
            prop_assert!(pair[0].profile.view_count >= pair[1].profile.view_count);
        }
    }

    #[test]
    fn search_is_idempotent(
        listings in proptest::collection::vec(listing(), 0..30),
        query in "(maxRate=[0-9]{1,3}&)?(software=[0-5](,[0-5])?&)?(sortBy=(price_low|price_high|experience|popularity)&)?page=[1-3]&limit=[1-9]",
    ) {
        let corpus = corpus(&listings);
        let filters = FilterSpec::from_query(&query);
        let first = search(&corpus, &filters, &SearchSettings::default());
        let second = search(&corpus, &filters, &SearchSettings::default());
        prop_assert_eq!(first.results, second.results);
        prop_assert_eq!(first.pagination, second.pagination);
    }

    #[test]
    fn results_honor_filters_and_hide_passwords(
        listings in proptest::collection::vec(listing(), 0..30),
        max_rate in 0.0f64..200.0,
        wanted in 0u32..6,
    ) {
        let corpus = corpus(&listings);
        let filters = FilterSpec::new().with_max_rate(max_rate).with_software([wanted]);
        let response = search(&corpus, &filters, &wide_open());

        for hit in &response.results {
            prop_assert!(hit.profile.basic_rate.is_some_and(|rate| rate <= max_rate));
            prop_assert!(hit.profile.software.contains(&wanted));
        }
        let json = serde_json::to_string(&response).unwrap();
        prop_assert!(!json.contains("password"));
    }

    #[test]
    fn page_slices_are_bounded(
        listings in proptest::collection::vec(listing(), 0..40),
        page in 1i64..6,
        limit in 1i64..12,
    ) {
        let corpus = corpus(&listings);
        let response = search(&corpus, &FilterSpec::new().with_page(page, limit), &SearchSettings::default());

        let total = response.pagination.total;
        let limit = usize::try_from(limit).unwrap();
        let offset = (usize::try_from(page).unwrap() - 1) * limit;
        let expected = total.saturating_sub(offset).min(limit);
        prop_assert_eq!(response.results.len(), expected);
        prop_assert_eq!(response.pagination.total_pages, total.div_ceil(limit));
    }

    #[test]
    fn query_parsing_never_panics(raw in ".{0,120}") {
        let filters = FilterSpec::from_query(&raw);
        if let Some(page) = filters.page {
            prop_assert!(page >= 1);
        }
    }
}
