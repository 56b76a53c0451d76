use editora::core::{ProfessionalType, ProfilePatch};
use editora::search::{self, ExperienceLevel, FilterSpec, SearchResponse, SearchSettings, SortBy};
use editora::test_utils::{EditorSeed, MarketFixture};

fn run(fixture: &MarketFixture, filters: &FilterSpec) -> SearchResponse {
    search::run(&fixture.db, filters, &SearchSettings::default()).unwrap()
}

fn usernames(response: &SearchResponse) -> Vec<&str> {
    response
        .results
        .iter()
        .map(|hit| hit.user.username.as_str())
        .collect()
}

#[test]
fn rate_and_software_filters_keep_popularity_order() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("p1").rate(50.0).software(&[1, 2]).views(2));
    fixture.editor(EditorSeed::new("p2").rate(100.0).software(&[3]).views(9));
    fixture.editor(EditorSeed::new("p3").rate(75.0).software(&[1]).views(5));

    let filters = FilterSpec::new().with_max_rate(80.0).with_software([1]);
    let response = run(&fixture, &filters);

    assert_eq!(usernames(&response), vec!["p3", "p1"]);
    assert_eq!(response.pagination.total, 2);
}

#[test]
fn unset_type_counts_as_editor() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("generalist"));
    fixture.editor(EditorSeed::new("colorist").kind(ProfessionalType::Colorist));

    let editors = run(
        &fixture,
        &FilterSpec::new().with_professional_type(ProfessionalType::Editor),
    );
    assert_eq!(usernames(&editors), vec!["generalist"]);

    let colorists = run(
        &fixture,
        &FilterSpec::new().with_professional_type(ProfessionalType::Colorist),
    );
    assert_eq!(usernames(&colorists), vec!["colorist"]);
}

#[test]
fn unrecognized_stored_type_is_not_an_editor_and_survives_updates() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("generalist"));
    let (_, producer) = fixture.editor(EditorSeed::new("producer"));
    fixture
        .db
        .with_conn(|conn| {
            conn.execute(
                "UPDATE editor_profiles SET professional_type = 'Producer' WHERE id = ?1",
                [producer.id],
            )?;
            Ok(())
        })
        .unwrap();

    let editors = FilterSpec::new().with_professional_type(ProfessionalType::Editor);
    assert_eq!(usernames(&run(&fixture, &editors)), vec!["generalist"]);

    let updated = fixture
        .db
        .update_profile(
            producer.id,
            ProfilePatch {
                headline: Some("Ads and branded content".into()),
                ..ProfilePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.type_label(), "Producer");
    assert_eq!(usernames(&run(&fixture, &editors)), vec!["generalist"]);

    let everyone = run(&fixture, &FilterSpec::new());
    let stored = everyone
        .results
        .iter()
        .find(|hit| hit.user.username == "producer")
        .unwrap();
    let json = serde_json::to_value(stored).unwrap();
    assert_eq!(json["profile"]["professionalType"], "Producer");
}

#[test]
fn orphaned_profiles_never_surface() {
    let fixture = MarketFixture::new();
    let (gone, _) = fixture.editor(EditorSeed::new("gone").views(100));
    fixture.editor(EditorSeed::new("kept"));
    fixture.db.delete_user(gone.id).unwrap();

    let response = run(&fixture, &FilterSpec::new());
    assert_eq!(usernames(&response), vec!["kept"]);
    assert_eq!(response.pagination.total, 1);
}

#[test]
fn expert_filter_excludes_unknown_experience() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("veteran").years(9));
    fixture.editor(EditorSeed::new("unknown"));
    fixture.editor(EditorSeed::new("junior").years(1));

    let response = run(
        &fixture,
        &FilterSpec::new().with_experience_level(ExperienceLevel::Expert),
    );
    assert_eq!(usernames(&response), vec!["veteran"]);
}

#[test]
fn third_page_of_twenty_five() {
    let fixture = MarketFixture::new();
    for index in 0..25 {
        fixture.editor(EditorSeed::new(&format!("editor{index:02}")));
    }

    let response = run(&fixture, &FilterSpec::new().with_page(3, 10));
    assert_eq!(response.results.len(), 5);
    assert_eq!(response.pagination.total, 25);
    assert_eq!(response.pagination.total_pages, 3);
    assert_eq!(response.pagination.page, 3);
}

#[test]
fn page_past_the_end_is_empty_not_an_error() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("solo"));

    let response = run(&fixture, &FilterSpec::new().with_page(4, 10));
    assert!(response.results.is_empty());
    assert_eq!(response.pagination.total, 1);
    assert_eq!(response.pagination.total_pages, 1);
}

#[test]
fn repeated_search_is_identical() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("a").rate(30.0));
    fixture.editor(EditorSeed::new("b").rate(30.0));
    fixture.editor(EditorSeed::new("c").rate(20.0));

    let filters = FilterSpec::new().with_sort(SortBy::PriceLow);
    let first = run(&fixture, &filters);
    let second = run(&fixture, &filters);
    assert_eq!(first.results, second.results);
    assert_eq!(usernames(&first), vec!["c", "a", "b"]);
}

#[test]
fn unconstrained_search_returns_everyone_by_views() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("quiet").views(1));
    fixture.editor(EditorSeed::new("popular").views(7));
    fixture.editor(EditorSeed::new("middle").views(3));

    let response = run(&fixture, &FilterSpec::new());
    assert_eq!(usernames(&response), vec!["popular", "middle", "quiet"]);
}

#[test]
fn price_high_treats_missing_rate_as_zero() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("norate"));
    fixture.editor(EditorSeed::new("cheap").rate(10.0));
    fixture.editor(EditorSeed::new("pricey").rate(90.0));

    let response = run(&fixture, &FilterSpec::new().with_sort(SortBy::PriceHigh));
    assert_eq!(usernames(&response), vec!["pricey", "cheap", "norate"]);
}

#[test]
fn max_rate_excludes_missing_rate() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("norate"));
    fixture.editor(EditorSeed::new("cheap").rate(10.0));

    let response = run(&fixture, &FilterSpec::new().with_max_rate(1000.0));
    assert_eq!(usernames(&response), vec!["cheap"]);
}

#[test]
fn country_and_expertise_are_case_insensitive() {
    let fixture = MarketFixture::new();
    fixture.editor(
        EditorSeed::new("ana")
            .country("México")
            .expertise(&["Color Grading", "weddings"]),
    );
    fixture.editor(EditorSeed::new("bruno").country("Chile").expertise(&["motion"]));

    let filters = FilterSpec::new()
        .with_countries(["méxico"])
        .with_expertise(["grading"]);
    let response = run(&fixture, &filters);
    assert_eq!(usernames(&response), vec!["ana"]);
}

#[test]
fn featured_item_is_position_zero() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("reel"));
    let _ = fixture.item(profile.id, "First");
    let _ = fixture.item(profile.id, "Second");
    fixture.editor(EditorSeed::new("empty"));

    let response = run(&fixture, &FilterSpec::new().with_sort(SortBy::Experience));
    let reel = response
        .results
        .iter()
        .find(|hit| hit.user.username == "reel")
        .unwrap();
    assert_eq!(
        reel.featured_portfolio.as_ref().map(|item| item.title.as_str()),
        Some("First")
    );
    let empty = response
        .results
        .iter()
        .find(|hit| hit.user.username == "empty")
        .unwrap();
    assert!(empty.featured_portfolio.is_none());
}

#[test]
fn response_json_never_carries_passwords() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("secretive"));

    let response = run(&fixture, &FilterSpec::new());
    let json = serde_json::to_string(&response).unwrap();
    assert!(!json.contains("password"));
    assert!(!json.contains("secret\""));
    assert!(json.contains("\"featuredPortfolio\":null"));
    assert!(json.contains("\"totalPages\":1"));
}

#[test]
fn query_string_drives_the_same_search() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("p1").rate(50.0).software(&[1, 2]).views(2));
    fixture.editor(EditorSeed::new("p2").rate(100.0).software(&[3]).views(9));
    fixture.editor(EditorSeed::new("p3").rate(75.0).software(&[1]).views(5));

    let filters = FilterSpec::from_query("maxRate=80&software=1&sortBy=price_low&limit=abc");
    let response = run(&fixture, &filters);
    assert_eq!(usernames(&response), vec!["p1", "p3"]);
    assert_eq!(response.pagination.limit, 12);
}
