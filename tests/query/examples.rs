use user_dashboard::{
    apply, compute_stats, empty_state, Criteria, InvalidCriteriaError, Record, RecordStore,
    SortKey,
};

#[test]
fn go_users_by_version() {
    let records = vec![
        Record::new("a", "Ann", "Go", 2.0),
        Record::new("b", "Ben", "Rust", 9.0),
        Record::new("c", "Cat", "Go", 3.5),
        Record::new("d", "Dan", "Go", 1.0),
    ];
    let criteria = Criteria {
        category: "Go".into(),
        sort_key: SortKey::Version,
        page_size: 2,
        ..Criteria::default()
    };
    let page = apply(&records, &criteria).unwrap();

    let names: Vec<&str> = page.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Cat", "Ann"]);
    assert_eq!(page.pagination.total_items, 3);
    assert_eq!(page.pagination.total_pages, 2);
    assert_eq!(page.pagination.start_index, 1);
    assert_eq!(page.pagination.end_index, 2);
}

#[test]
fn empty_result_has_zero_bounds() {
    let records = vec![Record::new("a", "Ann", "Go", 2.0)];
    let criteria = Criteria {
        search_term: "zzz".into(),
        ..Criteria::default()
    };
    let page = apply(&records, &criteria).unwrap();

    assert!(page.is_empty());
    assert_eq!(page.pagination.current_page, 1);
    assert_eq!(page.pagination.total_pages, 0);
    assert_eq!(page.pagination.start_index, 0);
    assert_eq!(page.pagination.end_index, 0);
    assert_eq!(empty_state(&criteria).title, "No Search Results");
}

#[test]
fn zero_page_size_is_invalid() {
    let criteria = Criteria {
        page_size: 0,
        ..Criteria::default()
    };
    assert_eq!(
        apply(&[], &criteria),
        Err(InvalidCriteriaError::NonPositivePageSize)
    );
}

#[test]
fn stats_over_a_loaded_batch() {
    let mut store = RecordStore::new();
    store
        .load_json(&serde_json::json!([
            { "id": 1, "name": "A", "language": "Go", "bio": "", "version": 2 },
            { "id": 2, "name": "B", "language": "Rust", "bio": "", "version": "n/a" },
            { "id": 3, "name": "C", "language": "Go", "bio": "", "version": 4 },
            { "id": 3, "name": "C again", "language": "Zig", "bio": "", "version": 100 },
        ]))
        .unwrap();

    let stats = compute_stats(store.records());
    assert_eq!(stats.total_users, 3);
    assert_eq!(stats.total_languages, 2);
    assert_eq!(stats.avg_version, 3.0);
}
