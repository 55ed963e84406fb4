use crate::pipeline::DerivedViews;
use crate::query::{Criteria, PaginationInfo, ALL_CATEGORIES};
use crate::record::Record;
use crate::stats::Stats;

use super::{
    CardView, DashboardView, EmptyState, FilterButton, NavButton, PageMarker, PageSizeOption,
    PaginationControls,
};

/// Page numbers shown around the current page.
pub const PAGE_WINDOW: usize = 5;

const IMAGE_SIZE: u32 = 400;

pub fn build_view(views: &DerivedViews, criteria: &Criteria, page_sizes: &[usize]) -> DashboardView {
    let cards: Vec<CardView> = views.page.items.iter().map(card_view).collect();
    let empty = cards.is_empty().then(|| empty_state(criteria));

    DashboardView {
        cards,
        empty_state: empty,
        filters: filter_buttons(&views.languages, &criteria.category),
        pagination: pagination_controls(&views.page.pagination, page_sizes),
        stats: views.stats,
        error: None,
    }
}

/// What is shown when the very first load fails and there is nothing to keep.
pub fn failed_view(message: String) -> DashboardView {
    DashboardView {
        cards: Vec::new(),
        empty_state: None,
        filters: filter_buttons(&[], ALL_CATEGORIES),
        pagination: None,
        stats: Stats::default(),
        error: Some(message),
    }
}

pub fn card_view(record: &Record) -> CardView {
    let version_label = if record.has_valid_version() {
        format!("Version: {}", record.version)
    } else {
        "Version: unknown".to_string()
    };

    CardView {
        id: record.id.to_string(),
        name: record.name.clone(),
        language: record.language.clone(),
        bio: record.bio.clone(),
        version_label,
        image_url: placeholder_image_url(&record.name),
    }
}

pub fn placeholder_image_url(name: &str) -> String {
    format!(
        "https://placehold.co/{IMAGE_SIZE}x{IMAGE_SIZE}/cccccc/666666?text={}",
        encode_component(name)
    )
}

/// Percent-encode everything but the URI-component unreserved set.
fn encode_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for byte in text.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

pub fn empty_state(criteria: &Criteria) -> EmptyState {
    let term = &criteria.search_term;
    let category = &criteria.category;

    let (title, description) = match (criteria.has_search(), criteria.has_category()) {
        (true, true) => (
            "No Matching Results",
            format!(
                "No users found matching \"{term}\" in {category}. Try different search terms or change the language filter."
            ),
        ),
        (true, false) => (
            "No Search Results",
            format!(
                "No users found matching \"{term}\". Check your spelling or try different search terms."
            ),
        ),
        (false, true) => (
            "No Users in This Language",
            format!(
                "No users found for {category}. Try selecting a different language or reset filters."
            ),
        ),
        (false, false) => (
            "No Users Found",
            "No users match your current search criteria. Try adjusting your filters or search terms."
                .to_string(),
        ),
    };

    EmptyState {
        title: title.to_string(),
        description,
    }
}

/// "All Languages" followed by one button per language.
pub fn filter_buttons(languages: &[String], active: &str) -> Vec<FilterButton> {
    std::iter::once(("All Languages", ALL_CATEGORIES))
        .chain(languages.iter().map(|language| (language.as_str(), language.as_str())))
        .map(|(label, value)| FilterButton {
            label: label.to_string(),
            value: value.to_string(),
            active: value == active,
        })
        .collect()
}

pub fn pagination_controls(info: &PaginationInfo, page_sizes: &[usize]) -> Option<PaginationControls> {
    if info.total_pages <= 1 {
        return None;
    }
    let current = info.current_page;
    let last = info.total_pages;

    Some(PaginationControls {
        summary: format!(
            "Showing {}-{} of {} users",
            info.start_index, info.end_index, info.total_items
        ),
        first: nav("«", "First page", 1, current == 1),
        prev: nav("‹", "Previous page", current.saturating_sub(1).max(1), !info.has_prev_page),
        pages: page_markers(current, last),
        next: nav("›", "Next page", (current + 1).min(last), !info.has_next_page),
        last: nav("»", "Last page", last, current == last),
        page_sizes: page_sizes
            .iter()
            .map(|&size| PageSizeOption {
                size,
                selected: size == info.items_per_page,
            })
            .collect(),
    })
}

fn nav(label: &'static str, title: &'static str, target: usize, disabled: bool) -> NavButton {
    NavButton {
        label,
        title,
        target,
        disabled,
    }
}

/// At most [`PAGE_WINDOW`] numbers centred on `current`, plus `1 …` and
/// `… last` when the window does not reach the ends.
pub fn page_markers(current: usize, total_pages: usize) -> Vec<PageMarker> {
    if total_pages == 0 {
        return Vec::new();
    }

    let mut start = current.saturating_sub(PAGE_WINDOW / 2).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total_pages);
    if end + 1 - start < PAGE_WINDOW {
        start = (end + 1).saturating_sub(PAGE_WINDOW).max(1);
    }

    let page = |number: usize| PageMarker::Page {
        number,
        active: number == current,
    };

    let mut markers = Vec::with_capacity(PAGE_WINDOW + 4);
    if start > 1 {
        markers.push(page(1));
        if start > 2 {
            markers.push(PageMarker::Ellipsis);
        }
    }
    markers.extend((start..=end).map(page));
    if end < total_pages {
        if end + 1 < total_pages {
            markers.push(PageMarker::Ellipsis);
        }
        markers.push(page(total_pages));
    }
    markers
}
