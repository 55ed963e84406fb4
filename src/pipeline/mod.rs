//! Pipeline - from records and criteria to everything the dashboard shows.
//!
//! [`derive_views`] is the pure half: one call produces the page, the stats,
//! the language list and the chart series. [`Dashboard`] is the stateful half
//! that owns the store, the criteria and the search debouncer, and recomputes
//! after every effective change.

mod dashboard;

use serde::Serialize;

use crate::chart::{dashboard_series, ChartScope, ChartSeries};
use crate::query::{filter_and_sort, paginate, Criteria, InvalidCriteriaError, PageResult};
use crate::record::{distinct_languages, Record};
use crate::stats::{compute_stats, Stats};

pub use dashboard::Dashboard;

/// Everything derived from one (records, criteria) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedViews {
    pub page: PageResult,
    /// Always over the whole collection.
    pub stats: Stats,
    pub languages: Vec<String>,
    pub charts: Vec<ChartSeries>,
}

pub fn derive_views(
    records: &[Record],
    criteria: &Criteria,
    chart_scope: ChartScope,
) -> Result<DerivedViews, InvalidCriteriaError> {
    if criteria.page_size == 0 {
        return Err(InvalidCriteriaError::NonPositivePageSize);
    }

    let matched = filter_and_sort(records, criteria);
    let page = paginate(&matched, criteria.page, criteria.page_size);
    let charts = match chart_scope {
        ChartScope::Collection => dashboard_series(&records.iter().collect::<Vec<_>>()),
        ChartScope::Filtered => dashboard_series(&matched),
    };
    tracing::debug!(
        matched = page.pagination.total_items,
        page = page.pagination.current_page,
        ?chart_scope,
        "derived dashboard views"
    );

    Ok(DerivedViews {
        page,
        stats: compute_stats(records),
        languages: distinct_languages(records),
        charts,
    })
}
