use editora::cli::formatters::SearchResultsView;
use editora::search::{self, FilterSpec, SearchSettings};
use editora::test_utils::{EditorSeed, MarketFixture};

#[test]
fn human_search_rendering() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(
        EditorSeed::new("valentina")
            .country("Chile")
            .years(7)
            .rate(45.0)
            .expertise(&["documentary", "color grading"])
            .views(3),
    );
    let _ = fixture.item(profile.id, "Showreel");

    let filters = FilterSpec::new();
    let response = search::run(&fixture.db, &filters, &SearchSettings::default()).unwrap();
    let text = SearchResultsView::new(&response, &filters).render();

    insta::assert_snapshot!(text.trim_end(), @r"
    1 editor matches (page 1 of 1, 12 per page)

    1. valentina (@valentina) [editor]
       valentina edits
       rates: $45.00 / - / -   experience: 7y   country: Chile
       expertise: documentary, color grading
       views: 3   contacts: 0
       featured: Showreel <https://vimeo.com/8>
    ");
}

#[test]
fn empty_filtered_rendering_suggests_relaxing() {
    let fixture = MarketFixture::new();
    fixture.editor(EditorSeed::new("pricey").rate(500.0));

    let filters = FilterSpec::new().with_max_rate(10.0);
    let response = search::run(&fixture.db, &filters, &SearchSettings::default()).unwrap();
    let text = SearchResultsView::new(&response, &filters).render();

    assert!(text.starts_with("! No editors found (page 1 of 0)"));
    assert!(text.contains("--max-rate"));
    assert!(!text.contains("\u{1b}["));
}
