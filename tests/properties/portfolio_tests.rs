use proptest::prelude::*;

use editora::core::NewPortfolioItem;
use editora::core::portfolio::is_dense;
use editora::storage::Database;
use editora::test_utils::MarketFixture;

#[derive(Debug, Clone)]
enum Op {
    Add(Option<usize>),
    Remove(usize),
    Rotate(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        proptest::option::of(0usize..6).prop_map(Op::Add),
        (0usize..6).prop_map(Op::Remove),
        (0usize..6).prop_map(Op::Rotate),
    ]
}

fn apply(db: &Database, profile_id: i64, op: &Op) {
    let ids: Vec<i64> = db
        .list_portfolio_items(profile_id)
        .unwrap()
        .iter()
        .map(|item| item.id)
        .collect();
    match op {
        Op::Add(position) => {
            db.add_portfolio_item(
                profile_id,
                &NewPortfolioItem {
                    title: "clip".into(),
                    video_url: "https://vimeo.com/1".into(),
                    position: *position,
                    ..NewPortfolioItem::default()
                },
            )
            .unwrap();
        }
        Op::Remove(index) => {
            if let Some(id) = ids.get(index % ids.len().max(1)) {
                db.delete_portfolio_item(*id).unwrap();
            }
        }
        Op::Rotate(by) => {
            let mut ordered = ids;
            if !ordered.is_empty() {
                let by = by % ordered.len();
                ordered.rotate_left(by);
            }
            db.reorder_portfolio(profile_id, &ordered).unwrap();
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn positions_stay_dense(ops in proptest::collection::vec(op(), 1..20)) {
        let fixture = MarketFixture::new();
        let (_, profile) = fixture.editor(editora::test_utils::EditorSeed::new("prop"));
        for op in &ops {
            apply(&fixture.db, profile.id, op);
            let orders: Vec<u32> = fixture
                .db
                .list_portfolio_items(profile.id)
                .unwrap()
                .iter()
                .map(|item| item.order)
                .collect();
            prop_assert!(is_dense(&orders), "not dense after {:?}: {:?}", op, orders);
        }
    }
}
