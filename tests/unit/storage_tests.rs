use editora::core::{
    BriefStatus, NewBrief, NewReview, PortfolioPatch, ProfessionalType, ProfilePatch,
};
use editora::core::portfolio::is_dense;
use editora::test_utils::{EditorSeed, MarketFixture};

fn orders(fixture: &MarketFixture, profile_id: i64) -> Vec<u32> {
    fixture
        .db
        .list_portfolio_items(profile_id)
        .unwrap()
        .iter()
        .map(|item| item.order)
        .collect()
}

#[test]
fn portfolio_stays_dense_through_edits() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("dense"));
    let a = fixture.item(profile.id, "A");
    let b = fixture.item(profile.id, "B");
    let c = fixture.item(profile.id, "C");
    assert_eq!(orders(&fixture, profile.id), vec![0, 1, 2]);

    assert!(fixture.db.delete_portfolio_item(b.id).unwrap());
    assert!(is_dense(&orders(&fixture, profile.id)));

    let reordered = fixture.db.reorder_portfolio(profile.id, &[c.id, a.id]).unwrap();
    assert_eq!(
        reordered.iter().map(|item| item.id).collect::<Vec<_>>(),
        vec![c.id, a.id]
    );
    assert!(reordered[0].is_featured());
    assert!(is_dense(&orders(&fixture, profile.id)));
}

#[test]
fn bad_reorder_leaves_order_untouched() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("strict"));
    let a = fixture.item(profile.id, "A");
    let b = fixture.item(profile.id, "B");

    let err = fixture
        .db
        .reorder_portfolio(profile.id, &[b.id, b.id])
        .unwrap_err();
    assert_eq!(err.http_status(), 400);

    let ids: Vec<i64> = fixture
        .db
        .list_portfolio_items(profile.id)
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect();
    assert_eq!(ids, vec![a.id, b.id]);
}

#[test]
fn portfolio_edit_rejects_bad_url() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("links"));
    let item = fixture.item(profile.id, "Reel");

    let result = fixture.db.update_portfolio_item(
        item.id,
        PortfolioPatch {
            video_url: Some("not a url".into()),
            ..PortfolioPatch::default()
        },
    );
    assert!(result.is_err());
    let stored = fixture.db.get_portfolio_item(item.id).unwrap().unwrap();
    assert_eq!(stored.video_url, item.video_url);
}

#[test]
fn second_profile_for_user_conflicts() {
    let fixture = MarketFixture::new();
    let (user, _) = fixture.editor(EditorSeed::new("twice"));

    let err = fixture
        .db
        .create_profile(&editora::core::NewProfile {
            user_id: user.id,
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.code(), "conflict");
    assert_eq!(err.http_status(), 409);
}

#[test]
fn profile_update_is_a_shallow_merge() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("merge").rate(40.0).software(&[1, 2]));

    let updated = fixture
        .db
        .update_profile(
            profile.id,
            ProfilePatch {
                headline: Some("Now in 4K".into()),
                professional_type: Some(ProfessionalType::Vfx),
                ..ProfilePatch::default()
            },
        )
        .unwrap();
    assert_eq!(updated.headline.as_deref(), Some("Now in 4K"));
    assert_eq!(updated.basic_rate, Some(40.0));
    assert_eq!(updated.software.len(), 2);
    assert_eq!(updated.effective_type(), Some(ProfessionalType::Vfx));
}

#[test]
fn counters_increment_independently() {
    let fixture = MarketFixture::new();
    let (_, profile) = fixture.editor(EditorSeed::new("counted").views(2));

    let after = fixture.db.increment_contact_clicks(profile.id).unwrap();
    assert_eq!(after.view_count, 2);
    assert_eq!(after.contact_click_count, 1);

    let missing = fixture.db.increment_view_count(9_999).unwrap_err();
    assert!(missing.is_not_found());
}

#[test]
fn brief_lifecycle() {
    let fixture = MarketFixture::new();
    let client = fixture.client("studio");

    let brief = fixture
        .db
        .create_brief(&NewBrief {
            client_id: client.id,
            title: "Podcast clips".into(),
            budget: Some(250.0),
            ..NewBrief::default()
        })
        .unwrap();
    assert_eq!(brief.status, BriefStatus::Open);
    assert_eq!(fixture.db.list_briefs_by_status(BriefStatus::Open).unwrap().len(), 1);

    let started = fixture
        .db
        .set_brief_status(brief.id, BriefStatus::InProgress)
        .unwrap();
    assert_eq!(started.status, BriefStatus::InProgress);
    assert!(fixture.db.list_briefs_by_status(BriefStatus::Open).unwrap().is_empty());

    assert!(
        fixture
            .db
            .set_brief_status(brief.id, BriefStatus::Open)
            .is_err()
    );
    assert_eq!(fixture.db.list_briefs_by_client(client.id).unwrap().len(), 1);
}

#[test]
fn review_ratings_are_bounded() {
    let fixture = MarketFixture::new();
    let client = fixture.client("rater");
    let (_, profile) = fixture.editor(EditorSeed::new("rated"));

    for rating in [0u8, 6] {
        let err = fixture
            .db
            .create_review(&NewReview {
                profile_id: profile.id,
                reviewer_id: client.id,
                rating,
                comment: None,
            })
            .unwrap_err();
        assert_eq!(err.code(), "validation_failed");
    }

    for rating in [5u8, 4] {
        fixture
            .db
            .create_review(&NewReview {
                profile_id: profile.id,
                reviewer_id: client.id,
                rating,
                comment: None,
            })
            .unwrap();
    }
    let summary = fixture.db.rating_summary(profile.id).unwrap();
    assert_eq!(summary.count, 2);
    assert_eq!(summary.average, Some(4.5));
}

#[test]
fn stored_users_serialize_without_password() {
    let fixture = MarketFixture::new();
    let client = fixture.client("private");

    let stored = fixture.db.get_user(client.id).unwrap().unwrap();
    assert_eq!(stored.password, "secret");
    let json = serde_json::to_value(&stored).unwrap();
    assert!(json.get("password").is_none());
    assert_eq!(json["username"], "private");
}
