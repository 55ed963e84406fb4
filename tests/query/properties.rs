use std::collections::BTreeSet;

use user_dashboard::{apply, filter_and_sort, Criteria, SortKey};

use crate::support::{ids, sample};

fn criteria(search: &str, category: &str, sort_key: SortKey, page_size: usize) -> Criteria {
    Criteria {
        search_term: search.into(),
        category: category.into(),
        sort_key,
        page: 1,
        page_size,
    }
}

#[test]
fn pages_partition_the_matched_records() {
    let records = sample();
    for page_size in 1..=4 {
        let mut base = criteria("", "all", SortKey::Name, page_size);
        let first = apply(&records, &base).unwrap();
        let total_pages = first.pagination.total_pages;

        let mut seen = Vec::new();
        for page in 1..=total_pages {
            base.page = page;
            let result = apply(&records, &base).unwrap();
            seen.extend(result.items.iter().map(|record| record.id.clone()));
        }

        let matched: Vec<_> = filter_and_sort(&records, &base)
            .into_iter()
            .map(|record| record.id.clone())
            .collect();
        assert_eq!(seen, matched, "page_size {page_size}");
        assert_eq!(
            seen.iter().collect::<BTreeSet<_>>().len(),
            records.len(),
            "no record twice"
        );
    }
}

#[test]
fn apply_is_idempotent() {
    let records = sample();
    let criteria = criteria("o", "all", SortKey::Version, 2);
    assert_eq!(apply(&records, &criteria), apply(&records, &criteria));
}

#[test]
fn equal_keys_keep_input_order() {
    let records = sample();
    let by_language = criteria("", "all", SortKey::Category, 25);
    let result = apply(&records, &by_language).unwrap();

    let go: Vec<&str> = result
        .items
        .iter()
        .filter(|record| record.language == "Go")
        .map(|record| record.id.as_str())
        .collect();
    assert_eq!(go, vec!["1", "3", "6"]);

    let by_name = criteria("bob", "all", SortKey::Name, 25);
    assert_eq!(ids(&apply(&records, &by_name).unwrap().items), vec!["1", "5"]);
}

#[test]
fn name_sort_ignores_case_and_accents() {
    let records = sample();
    let result = apply(&records, &criteria("", "all", SortKey::Name, 25)).unwrap();
    let names: Vec<&str> = result.items.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["alice", "Álvaro", "Bob", "Bob", "Carol", "dave", "Eve"]);
}

#[test]
fn missing_versions_sort_last() {
    let records = sample();
    let result = apply(&records, &criteria("", "all", SortKey::Version, 25)).unwrap();
    assert_eq!(ids(&result.items), vec!["3", "6", "2", "5", "1", "7", "4"]);
}

#[test]
fn out_of_range_pages_are_clamped() {
    let records = sample();
    let mut criteria = criteria("", "all", SortKey::Name, 3);
    criteria.page = 9999;
    let result = apply(&records, &criteria).unwrap();

    assert_eq!(result.pagination.current_page, 3);
    assert_eq!(result.pagination.total_pages, 3);
    assert_eq!(result.items.len(), 1);
    assert!(!result.pagination.has_next_page);
    assert!(result.pagination.has_prev_page);

    criteria.page = 0;
    assert_eq!(apply(&records, &criteria).unwrap().pagination.current_page, 1);
}
