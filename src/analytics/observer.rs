use super::{AnalyticsCollector, AnalyticsEvent, AnalyticsSink};
use crate::debounce::{Clock, SystemClock};
use crate::state::{StateEvent, StateSubscriber};

/// Feeds dashboard state events into an [`AnalyticsCollector`].
///
/// Criteria changes become interaction events, loads and load failures
/// become custom and error events. Every recompute also gives the collector
/// a chance to flush on its interval.
pub struct AnalyticsObserver<S: AnalyticsSink, C: Clock = SystemClock> {
    collector: AnalyticsCollector<S, C>,
}

impl<S: AnalyticsSink, C: Clock> AnalyticsObserver<S, C> {
    pub fn new(collector: AnalyticsCollector<S, C>) -> Self {
        Self { collector }
    }

    pub fn collector(&self) -> &AnalyticsCollector<S, C> {
        &self.collector
    }

    pub fn collector_mut(&mut self) -> &mut AnalyticsCollector<S, C> {
        &mut self.collector
    }
}

impl<S: AnalyticsSink, C: Clock> StateSubscriber for AnalyticsObserver<S, C> {
    fn on_event(&mut self, event: &StateEvent<'_>) {
        match event {
            StateEvent::CriteriaChanged { criteria, change } => {
                if change.search_term {
                    self.collector.track(
                        AnalyticsEvent::interaction("input", "search")
                            .with_property("term", criteria.search_term.as_str()),
                    );
                }
                if change.category {
                    self.collector.track(
                        AnalyticsEvent::interaction("button", "filter")
                            .with_property("category", criteria.category.as_str()),
                    );
                }
                if change.sort_key {
                    self.collector.track(
                        AnalyticsEvent::interaction("select", "sort")
                            .with_property("sortKey", criteria.sort_key.as_str()),
                    );
                }
                if change.page && !change.page_reset {
                    self.collector.track(
                        AnalyticsEvent::interaction("button", "paginate")
                            .with_property("page", criteria.page),
                    );
                }
                if change.page_size {
                    self.collector.track(
                        AnalyticsEvent::interaction("select", "page_size")
                            .with_property("pageSize", criteria.page_size),
                    );
                }
            }
            StateEvent::CollectionLoaded { count } => {
                self.collector
                    .track(AnalyticsEvent::custom("collection_loaded").with_property("count", *count));
            }
            StateEvent::LoadFailed { error } => {
                self.collector
                    .track(AnalyticsEvent::error(error.kind(), error.to_string()));
            }
            StateEvent::ViewsRecomputed { .. } => {
                // Send failures are already logged and requeued.
                let _ = self.collector.tick();
            }
            StateEvent::Reset => {
                self.collector.track(AnalyticsEvent::custom("filters_reset"));
            }
        }
    }
}
