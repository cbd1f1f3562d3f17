use matchlink_core::traits::VectorStore;
use matchlink_embed::HashEmbedder;
use matchlink_vector::{LanceStore, MemoryStore};

fn memory_store() -> MemoryStore {
    MemoryStore::new(Box::new(HashEmbedder::default()))
}

#[test]
fn memory_reset_is_idempotent_and_clears_rows() {
    let store = memory_store();
    store.reset("people").expect("reset missing collection");
    store
        .upsert_all("people", &[("a".to_string(), "fundraising vc".to_string())])
        .expect("upsert");
    store.reset("people").expect("reset existing collection");
    let hits = store.query_by_text("people", "fundraising", 5).expect("query");
    assert!(hits.is_empty(), "reset drops previously indexed rows");
}

#[test]
fn memory_upsert_is_last_write_wins() {
    let store = memory_store();
    store.reset("people").expect("reset");
    store
        .upsert_all(
            "people",
            &[
                ("a".to_string(), "backend engineering".to_string()),
                ("a".to_string(), "fundraising vc intros".to_string()),
            ],
        )
        .expect("upsert");
    let hits = store.query_by_text("people", "fundraising vc intros", 5).expect("query");
    assert_eq!(hits.len(), 1, "duplicate ids collapse to one row");
    assert_eq!(hits[0].id, "a");
    assert!(hits[0].distance < 0.5, "row reflects the later document");
}

#[test]
fn memory_query_orders_by_ascending_distance_and_truncates() {
    let store = memory_store();
    store.reset("people").expect("reset");
    store
        .upsert_all(
            "people",
            &[
                ("far".to_string(), "pottery glazing kiln".to_string()),
                ("near".to_string(), "fundraising vc capital".to_string()),
                ("mid".to_string(), "fundraising operations".to_string()),
            ],
        )
        .expect("upsert");

    let hits = store.query_by_text("people", "fundraising vc", 2).expect("query");
    assert_eq!(hits.len(), 2, "limit truncates");
    assert_eq!(hits[0].id, "near");
    for pair in hits.windows(2) {
        assert!(pair[0].distance <= pair[1].distance, "ascending by distance");
    }
    for h in &hits {
        assert!(h.distance >= 0.0);
    }
}

#[test]
fn memory_query_on_unknown_collection_is_empty() {
    let store = memory_store();
    let hits = store.query_by_text("nowhere", "anything", 3).expect("query");
    assert!(hits.is_empty());
}

#[test]
fn lance_round_trip_through_the_trait_surface() {
    let tmp = tempfile::tempdir().expect("tempdir");
    let store =
        LanceStore::open(tmp.path(), Box::new(HashEmbedder::default())).expect("open lance db");

    store.reset("people").expect("reset");
    store
        .upsert_all(
            "people",
            &[
                ("a".to_string(), "fundraising vc capital intros".to_string()),
                ("b".to_string(), "backend engineering rust".to_string()),
            ],
        )
        .expect("upsert");

    let hits = store.query_by_text("people", "fundraising vc", 2).expect("query");
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].id, "a", "closest document first");
    assert!(hits[0].distance <= hits[1].distance);
    assert!(hits[0].distance >= 0.0);

    // Reset is idempotent and leaves an empty collection behind.
    store.reset("people").expect("second reset");
    let hits = store.query_by_text("people", "fundraising", 2).expect("query after reset");
    assert!(hits.is_empty());
}
