use std::cmp::Ordering;

use tracing::debug;

use super::collate::CollationKey;
use super::{Criteria, InvalidCriteriaError, PageResult, PaginationInfo, SortKey};
use crate::record::Record;

/// Filter, sort and paginate `records` under `criteria`.
///
/// The requested page is clamped into `[1, max(total_pages, 1)]`, so asking
/// for page 9999 of a three-page result yields page 3.
pub fn apply(records: &[Record], criteria: &Criteria) -> Result<PageResult, InvalidCriteriaError> {
    if criteria.page_size == 0 {
        return Err(InvalidCriteriaError::NonPositivePageSize);
    }

    let matched = filter_and_sort(records, criteria);
    let page = paginate(&matched, criteria.page, criteria.page_size);
    debug!(
        matched = page.pagination.total_items,
        page = page.pagination.current_page,
        total_pages = page.pagination.total_pages,
        "applied criteria"
    );
    Ok(page)
}

/// Search, category filter and stable sort, without pagination.
pub fn filter_and_sort<'a>(records: &'a [Record], criteria: &Criteria) -> Vec<&'a Record> {
    let needle = criteria.search_term.to_lowercase();

    let mut matched: Vec<&Record> = records
        .iter()
        .filter(|record| needle.is_empty() || record.name.to_lowercase().contains(&needle))
        .filter(|record| !criteria.has_category() || record.language == criteria.category)
        .collect();

    // Both sorts below are stable; equal keys keep their filtered order.
    match criteria.sort_key {
        SortKey::Name => matched.sort_by_cached_key(|record| CollationKey::new(&record.name)),
        SortKey::Category => {
            matched.sort_by_cached_key(|record| CollationKey::new(&record.language))
        }
        SortKey::Version => matched.sort_by(|a, b| version_descending(a.version, b.version)),
    }

    matched
}

/// Slice one page out of an already filtered and sorted list.
///
/// `page_size` must be positive; [`apply`] checks this before calling.
pub fn paginate(matched: &[&Record], page: usize, page_size: usize) -> PageResult {
    let page_size = page_size.max(1);
    let total_items = matched.len();
    let total_pages = total_items.div_ceil(page_size);
    let current_page = page.clamp(1, total_pages.max(1));

    let start = ((current_page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let items = matched[start..end].iter().map(|record| (*record).clone()).collect();

    PageResult {
        items,
        pagination: PaginationInfo {
            current_page,
            total_pages,
            total_items,
            items_per_page: page_size,
            has_next_page: current_page < total_pages,
            has_prev_page: current_page > 1,
            start_index: if total_items == 0 { 0 } else { start + 1 },
            end_index: end,
        },
    }
}

/// Highest version first; `NaN` versions go last.
fn version_descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
