use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::{derive_views, DerivedViews};
use crate::chart::ChartScope;
use crate::config::DashboardConfig;
use crate::debounce::{Clock, Debouncer, SystemClock};
use crate::error::DashboardError;
use crate::query::{Criteria, SortKey, ALL_CATEGORIES};
use crate::record::{CycleOutcome, FetchTicket, RecordStore};
use crate::source::{DataSource, DataSourceError};
use crate::state::{CriteriaUpdate, StateChange, StateContainer, StateEvent, StateSubscriber};

/// The interactive dashboard: collection, criteria and derived views.
///
/// Every user action runs to completion inside one call: the criteria are
/// merged, views recomputed and subscribers notified before it returns. The
/// only deferred action is search input, which waits in a [`Debouncer`] until
/// [`Dashboard::tick`] finds its quiet period over.
///
/// A failed recompute or load leaves the criteria, the store and the last
/// derived views exactly as they were.
pub struct Dashboard<C: Clock = SystemClock> {
    store: RecordStore,
    state: StateContainer,
    search: Debouncer<String>,
    clock: C,
    chart_scope: ChartScope,
    defaults: Criteria,
    views: Option<DerivedViews>,
}

impl Dashboard<SystemClock> {
    pub fn new(config: &DashboardConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> Dashboard<C> {
    pub fn with_clock(config: &DashboardConfig, clock: C) -> Self {
        let defaults = config.initial_criteria();
        Self {
            store: RecordStore::new(),
            state: StateContainer::with_criteria(defaults.clone()),
            search: Debouncer::new(config.debounce()),
            clock,
            chart_scope: config.chart_scope,
            defaults,
            views: None,
        }
    }

    pub fn subscribe(&mut self, subscriber: Box<dyn StateSubscriber>) {
        self.state.subscribe(subscriber);
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn criteria(&self) -> Criteria {
        self.state.get_current_filters()
    }

    /// Views from the last successful recompute.
    pub fn views(&self) -> Option<&DerivedViews> {
        self.views.as_ref()
    }

    pub fn has_pending_search(&self) -> bool {
        self.search.is_pending()
    }

    /// One complete fetch cycle against `source`.
    pub fn load_from(&mut self, source: &dyn DataSource) -> Result<CycleOutcome, DashboardError> {
        let ticket = self.begin_fetch();
        let result = source.fetch();
        self.finish_fetch(ticket, result)
    }

    /// Start a fetch cycle, superseding any cycle still in flight.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let ticket = self.store.begin_cycle();
        debug!(ticket = ticket.sequence(), "fetch cycle started");
        ticket
    }

    /// Finish the cycle `ticket` with whatever the fetch produced.
    ///
    /// Superseded cycles are discarded, failed or not. A failure on the
    /// current cycle is reported to subscribers and returned; the store
    /// keeps its previous collection.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Value, DataSourceError>,
    ) -> Result<CycleOutcome, DashboardError> {
        if let Some(discarded) = self.store.superseded(ticket) {
            return Ok(discarded);
        }

        let batch = match result {
            Ok(batch) => batch,
            Err(err) => return Err(self.fail_load(err.into())),
        };
        let outcome = match self.store.complete_cycle(ticket, &batch) {
            Ok(outcome) => outcome,
            Err(err) => return Err(self.fail_load(err.into())),
        };

        if let CycleOutcome::Applied { count } = outcome {
            info!(count, "collection loaded");
            self.state.emit(&StateEvent::CollectionLoaded { count });
            self.recompute()?;
        }
        Ok(outcome)
    }

    /// Queue a search term; it is applied once input has been quiet for the
    /// debounce delay. A newer term replaces a pending one.
    pub fn search_input(&mut self, term: impl Into<String>) {
        let term = term.into();
        debug!(%term, "search input scheduled");
        self.search.schedule(term, self.clock.now());
    }

    /// Apply the pending search if its quiet period is over. Returns whether
    /// a search was applied.
    pub fn tick(&mut self) -> Result<bool, DashboardError> {
        match self.search.poll(self.clock.now()) {
            Some(term) => self.apply_search(term),
            None => Ok(false),
        }
    }

    /// Apply the pending search now, regardless of its deadline.
    pub fn flush_search(&mut self) -> Result<bool, DashboardError> {
        match self.search.flush() {
            Some(term) => self.apply_search(term),
            None => Ok(false),
        }
    }

    pub fn select_category(
        &mut self,
        category: impl Into<String>,
    ) -> Result<StateChange, DashboardError> {
        self.apply_update(CriteriaUpdate::new().category(category))
    }

    pub fn select_sort(&mut self, key: SortKey) -> Result<StateChange, DashboardError> {
        self.apply_update(CriteriaUpdate::new().sort_key(key))
    }

    pub fn go_to_page(&mut self, page: usize) -> Result<StateChange, DashboardError> {
        self.apply_update(CriteriaUpdate::new().page(page))
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<StateChange, DashboardError> {
        self.apply_update(CriteriaUpdate::new().page_size(size))
    }

    /// Clear search and category and go back to the first page. Any pending
    /// search input is dropped.
    pub fn reset_filters(&mut self) -> Result<StateChange, DashboardError> {
        self.search.cancel();
        self.apply_update(
            CriteriaUpdate::new()
                .search_term("")
                .category(ALL_CATEGORIES)
                .page(1),
        )
    }

    /// Back to the configured starting criteria, sort and page size included.
    pub fn reset(&mut self) -> Result<(), DashboardError> {
        self.search.cancel();
        self.state.reset(self.defaults.clone());
        self.recompute()
    }

    /// Merge `update`, then recompute. On failure the previous criteria are
    /// restored, the last views stay current and subscribers hear nothing.
    /// On success the change is announced against the clamped criteria.
    pub fn apply_update(&mut self, update: CriteriaUpdate) -> Result<StateChange, DashboardError> {
        let previous = self.state.get_current_filters();
        let mut change = self.state.merge(update);
        if change.is_empty() {
            return Ok(change);
        }

        let views = match self.derive() {
            Ok(views) => views,
            Err(err) => {
                self.state.restore(previous);
                return Err(err);
            }
        };

        let page = self.state.get_current_filters().page;
        change.page = page != previous.page;
        change.page_reset &= change.page;
        self.state.announce(change);
        self.publish(views);
        Ok(change)
    }

    /// Derive views for the current criteria and publish them.
    pub fn recompute(&mut self) -> Result<(), DashboardError> {
        let views = self.derive()?;
        self.publish(views);
        Ok(())
    }

    /// Derive views and clamp the criteria page to them. Nothing is emitted.
    fn derive(&mut self) -> Result<DerivedViews, DashboardError> {
        let criteria = self.state.get_current_filters();
        let views = derive_views(self.store.records(), &criteria, self.chart_scope).map_err(|err| {
            error!(%err, page_size = criteria.page_size, "failed to recompute views");
            err
        })?;
        self.state.record_page(views.page.clone());
        Ok(views)
    }

    fn publish(&mut self, views: DerivedViews) {
        let criteria = self.state.get_current_filters();
        self.state.emit(&StateEvent::ViewsRecomputed {
            criteria: &criteria,
            views: &views,
        });
        self.views = Some(views);
    }

    fn apply_search(&mut self, term: String) -> Result<bool, DashboardError> {
        self.apply_update(CriteriaUpdate::new().search_term(term))?;
        Ok(true)
    }

    fn fail_load(&mut self, error: DashboardError) -> DashboardError {
        warn!(kind = error.kind(), %error, "failed to load users");
        self.state.emit(&StateEvent::LoadFailed { error: &error });
        error
    }
}
