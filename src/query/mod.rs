//! Query - the filter/sort/paginate engine and the criteria it evaluates.
//!
//! [`apply`] is pure: the same records and criteria always produce the same
//! [`PageResult`], and no record is ever modified.
//!
//! ## Example
//!
//! ```ignore
//! use user_dashboard::{apply, Criteria, SortKey};
//!
//! let criteria = Criteria {
//!     category: "Go".into(),
//!     sort_key: SortKey::Version,
//!     page_size: 10,
//!     ..Criteria::default()
//! };
//! let page = apply(store.records(), &criteria)?;
//! println!("{} of {}", page.items.len(), page.pagination.total_items);
//! ```

mod collate;
mod engine;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::Record;

pub use collate::{locale_compare, CollationKey};
pub use engine::{apply, filter_and_sort, paginate};

/// Category sentinel meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Sort orders offered by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Ascending by name.
    #[default]
    Name,
    /// Ascending by language.
    #[serde(alias = "language")]
    Category,
    /// Highest version first.
    Version,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Category => "category",
            SortKey::Version => "version",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = InvalidCriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "category" | "language" => Ok(SortKey::Category),
            "version" => Ok(SortKey::Version),
            other => Err(InvalidCriteriaError::UnknownSortKey(other.to_string())),
        }
    }
}

/// The active search/filter/sort/page selections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Criteria {
    pub search_term: String,
    /// A language, or [`ALL_CATEGORIES`].
    pub category: String,
    pub sort_key: SortKey,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::Name,
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Criteria {
    pub fn has_search(&self) -> bool {
        !self.search_term.is_empty()
    }

    pub fn has_category(&self) -> bool {
        self.category != ALL_CATEGORIES
    }
}

/// Pagination metadata for one page. Display bounds are 1-based and inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub items_per_page: usize,
    pub has_next_page: bool,
    pub has_prev_page: bool,
    pub start_index: usize,
    pub end_index: usize,
}

/// One page of filtered and sorted records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageResult {
    pub items: Vec<Record>,
    pub pagination: PaginationInfo,
}

impl PageResult {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Criteria the engine cannot evaluate. UI-validated input never produces these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidCriteriaError {
    #[error("page size must be positive")]
    NonPositivePageSize,
    #[error("unknown sort key: {0}")]
    UnknownSortKey(String),
}
