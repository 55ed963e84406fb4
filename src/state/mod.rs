//! State - the active criteria, the last derived page, and change notification.
//!
//! All mutation goes through [`StateContainer::update_state`], which merges a
//! [`CriteriaUpdate`] into the current criteria. Readers get owned snapshots
//! from [`StateContainer::get_current_filters`].
//!
//! ## Example
//!
//! ```ignore
//! use user_dashboard::{CriteriaUpdate, SortKey, StateContainer};
//!
//! let mut state = StateContainer::new();
//! state.update_state(CriteriaUpdate::new().page(3));
//! let change = state.update_state(CriteriaUpdate::new().search_term("ann"));
//!
//! assert!(change.page_reset);
//! assert_eq!(state.get_current_filters().page, 1);
//! ```

mod emitter;

use serde::Serialize;

use crate::error::DashboardError;
use crate::pipeline::DerivedViews;
use crate::query::{Criteria, PageResult, SortKey};

pub use emitter::{StateEmitter, StateSubscriber};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StateTopic {
    CriteriaChanged,
    ViewsRecomputed,
    CollectionLoaded,
    LoadFailed,
    Reset,
}

/// Notification delivered to subscribers. Borrowed for the duration of delivery.
#[derive(Debug, Clone, Copy)]
pub enum StateEvent<'a> {
    CriteriaChanged {
        criteria: &'a Criteria,
        change: StateChange,
    },
    ViewsRecomputed {
        criteria: &'a Criteria,
        views: &'a DerivedViews,
    },
    CollectionLoaded {
        count: usize,
    },
    LoadFailed {
        error: &'a DashboardError,
    },
    Reset,
}

impl StateEvent<'_> {
    pub fn topic(&self) -> StateTopic {
        match self {
            StateEvent::CriteriaChanged { .. } => StateTopic::CriteriaChanged,
            StateEvent::ViewsRecomputed { .. } => StateTopic::ViewsRecomputed,
            StateEvent::CollectionLoaded { .. } => StateTopic::CollectionLoaded,
            StateEvent::LoadFailed { .. } => StateTopic::LoadFailed,
            StateEvent::Reset => StateTopic::Reset,
        }
    }
}

/// A partial criteria update. Present fields overwrite, absent ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CriteriaUpdate {
    pub search_term: Option<String>,
    pub category: Option<String>,
    pub sort_key: Option<SortKey>,
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl CriteriaUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search_term(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn sort_key(mut self, key: SortKey) -> Self {
        self.sort_key = Some(key);
        self
    }

    pub fn page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = Some(size);
        self
    }
}

/// Which fields an update actually changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateChange {
    pub search_term: bool,
    pub category: bool,
    pub sort_key: bool,
    pub page: bool,
    pub page_size: bool,
    /// The page went back to 1 because the result set was invalidated.
    pub page_reset: bool,
}

impl StateChange {
    pub fn is_empty(&self) -> bool {
        !(self.search_term || self.category || self.sort_key || self.page || self.page_size)
    }

    /// A new result set invalidates the previous page position.
    fn invalidates_page(&self) -> bool {
        self.search_term || self.category || self.page_size
    }
}

/// Current criteria plus the most recently derived page.
#[derive(Default)]
pub struct StateContainer {
    criteria: Criteria,
    current: Option<PageResult>,
    emitter: StateEmitter,
}

impl StateContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_criteria(criteria: Criteria) -> Self {
        Self {
            criteria,
            ..Self::default()
        }
    }

    /// Merge `update` into the current criteria and notify subscribers
    /// through [`StateEvent::CriteriaChanged`].
    ///
    /// A changed search term, category or page size sends the page back to 1
    /// unless the update names a page itself. Pages below 1 are raised to 1.
    pub fn update_state(&mut self, update: CriteriaUpdate) -> StateChange {
        let change = self.merge(update);
        self.announce(change);
        change
    }

    /// Merge `update` without notifying anyone. Pair with [`Self::announce`]
    /// once the change is known to stick, or [`Self::restore`] if it does not.
    pub fn merge(&mut self, update: CriteriaUpdate) -> StateChange {
        let mut change = StateChange::default();
        let criteria = &mut self.criteria;

        if let Some(term) = update.search_term {
            change.search_term = replace(&mut criteria.search_term, term);
        }
        if let Some(category) = update.category {
            change.category = replace(&mut criteria.category, category);
        }
        if let Some(key) = update.sort_key {
            change.sort_key = replace(&mut criteria.sort_key, key);
        }
        if let Some(size) = update.page_size {
            change.page_size = replace(&mut criteria.page_size, size);
        }

        match update.page {
            Some(page) => change.page = replace(&mut criteria.page, page.max(1)),
            None if change.invalidates_page() && criteria.page != 1 => {
                criteria.page = 1;
                change.page = true;
                change.page_reset = true;
            }
            None => {}
        }
        change
    }

    /// Tell subscribers about `change` against the criteria as they are now.
    /// Empty changes are not announced.
    pub fn announce(&mut self, change: StateChange) {
        if change.is_empty() {
            return;
        }
        self.emitter.emit(&StateEvent::CriteriaChanged {
            criteria: &self.criteria,
            change,
        });
    }

    /// Immutable snapshot of the active criteria.
    pub fn get_current_filters(&self) -> Criteria {
        self.criteria.clone()
    }

    pub fn current_page(&self) -> Option<&PageResult> {
        self.current.as_ref()
    }

    /// Store a freshly derived page and write its clamped page number back.
    pub fn record_page(&mut self, page: PageResult) {
        self.criteria.page = page.pagination.current_page.max(1);
        self.current = Some(page);
    }

    /// Roll criteria back to an earlier snapshot, e.g. after a failed recompute.
    pub fn restore(&mut self, criteria: Criteria) {
        self.criteria = criteria;
    }

    /// Back to `criteria`, dropping the derived page.
    pub fn reset(&mut self, criteria: Criteria) {
        self.criteria = criteria;
        self.current = None;
        self.emitter.emit(&StateEvent::Reset);
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn StateSubscriber>) {
        self.emitter.subscribe(subscriber);
    }

    pub fn emit(&mut self, event: &StateEvent<'_>) {
        self.emitter.emit(event);
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}
