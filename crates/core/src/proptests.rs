use chrono::NaiveDate;
use proptest::prelude::*;

use crate::article::{ArticleFields, Depot};
use crate::store::ArticleStore;
use crate::types::ArticleId;

fn depot() -> impl Strategy<Value = Depot> {
    prop_oneof![Just(Depot::BlocCentral), Just(Depot::Urgence)]
}

fn fields() -> impl Strategy<Value = ArticleFields> {
    ("[A-Za-zÉé0-9 ]{1,16}", depot(), 0u32..1_000, 0i64..3_650).prop_map(
        |(name, depot, quantity, offset)| ArticleFields {
            name,
            depot,
            expiry_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                + chrono::Duration::days(offset),
            quantity,
        },
    )
}

fn store_from(all: Vec<ArticleFields>) -> ArticleStore {
    let mut store = ArticleStore::new();
    for f in all {
        store.upsert(f, None).unwrap();
    }
    store
}

fn ids(store: &ArticleStore) -> Vec<ArticleId> {
    store.iter().map(|a| a.id).collect()
}

proptest! {
    #[test]
    fn filter_matches_are_exact_and_ordered(
        all in prop::collection::vec(fields(), 0..12),
        query in "[A-Za-zé ]{0,3}",
    ) {
        let store = store_from(all);
        let needle = query.to_lowercase();

        let expected: Vec<ArticleId> = store
            .iter()
            .filter(|a| a.name.to_lowercase().contains(&needle))
            .map(|a| a.id)
            .collect();
        let got: Vec<ArticleId> = store.filter(&query).iter().map(|a| a.id).collect();

        prop_assert_eq!(got, expected);
    }

    #[test]
    fn empty_filter_is_identity(all in prop::collection::vec(fields(), 0..12)) {
        let store = store_from(all);
        let got: Vec<ArticleId> = store.filter("").iter().map(|a| a.id).collect();
        prop_assert_eq!(got, ids(&store));
    }

    #[test]
    fn adjust_quantity_clamps_at_zero(start in 0u32..100, deltas in prop::collection::vec(-20i64..20, 1..20)) {
        let mut store = ArticleStore::new();
        let id = store
            .upsert(
                ArticleFields {
                    name: "X".into(),
                    depot: Depot::BlocCentral,
                    expiry_date: NaiveDate::from_ymd_opt(2024, 12, 29).unwrap(),
                    quantity: start,
                },
                None,
            )
            .unwrap()
            .id;

        let mut expected = i64::from(start);
        for delta in deltas {
            expected = (expected + delta).max(0);
            let article = store.adjust_quantity(id, delta).unwrap();
            prop_assert_eq!(i64::from(article.quantity), expected);
        }
    }

    #[test]
    fn removed_id_never_comes_back(all in prop::collection::vec(fields(), 1..10), pick in any::<prop::sample::Index>()) {
        let mut store = store_from(all);
        let before = ids(&store);
        let victim = before[pick.index(before.len())];

        store.remove(victim).unwrap();
        prop_assert!(store.filter("").iter().all(|a| a.id != victim));
        prop_assert_eq!(store.len(), before.len() - 1);

        // Unknown id: length-invariant.
        prop_assert!(store.remove(victim).is_err());
        prop_assert_eq!(store.len(), before.len() - 1);

        // Fresh inserts never reuse the removed id.
        let fresh = store.upsert(extra_fields(), None).unwrap().id;
        prop_assert!(!before.contains(&fresh));
    }

    #[test]
    fn upsert_replaces_exactly_one(all in prop::collection::vec(fields(), 1..10), pick in any::<prop::sample::Index>(), update in fields()) {
        let mut store = store_from(all);
        let before: Vec<_> = store.iter().cloned().collect();
        let index = pick.index(before.len());
        let target = before[index].id;

        store.upsert(update.clone(), Some(target)).unwrap();

        let after: Vec<_> = store.iter().cloned().collect();
        prop_assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(&after).enumerate() {
            prop_assert_eq!(old.id, new.id);
            if i == index {
                prop_assert_eq!(new.fields(), update.clone());
            } else {
                prop_assert_eq!(old, new);
            }
        }
    }

    #[test]
    fn upsert_without_id_appends_one_fresh(all in prop::collection::vec(fields(), 0..10), extra in fields()) {
        let mut store = store_from(all);
        let before = ids(&store);

        let id = store.upsert(extra, None).unwrap().id;

        prop_assert_eq!(store.len(), before.len() + 1);
        prop_assert!(!before.contains(&id));
        prop_assert_eq!(store.iter().last().map(|a| a.id), Some(id));
    }
}

fn extra_fields() -> ArticleFields {
    ArticleFields {
        name: "NOUVEL ARTICLE".into(),
        depot: Depot::Urgence,
        expiry_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        quantity: 1,
    }
}
