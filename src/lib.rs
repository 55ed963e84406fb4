mod analytics;
mod chart;
mod config;
mod debounce;
mod error;
mod pipeline;
mod query;
mod record;
mod render;
mod source;
mod state;
mod stats;

#[cfg(feature = "http")]
pub mod logging;
#[cfg(feature = "http")]
pub mod server;

pub use analytics::{
    AnalyticsBatch, AnalyticsCollector, AnalyticsError, AnalyticsEvent, AnalyticsObserver,
    AnalyticsSink, BufferSink, CollectorStats, Properties,
};
#[cfg(feature = "fetch")]
pub use analytics::HttpSink;
pub use chart::{
    dashboard_series, dataset_comparison, language_distribution, version_distribution,
    version_profile, CaptureChartSink, ChartKind, ChartScope, ChartSeries, ChartSink, Dataset,
    SeriesSpec, VERSION_BUCKETS,
};
pub use config::{AnalyticsConfig, ConfigError, DashboardConfig, ServerConfig, CONFIG_PATH_ENV};
pub use debounce::{Clock, Debouncer, ManualClock, SystemClock, DEFAULT_DEBOUNCE};
pub use error::DashboardError;
pub use pipeline::{derive_views, Dashboard, DerivedViews};
pub use query::{
    apply, filter_and_sort, locale_compare, paginate, CollationKey, Criteria,
    InvalidCriteriaError, PageResult, PaginationInfo, SortKey, ALL_CATEGORIES, DEFAULT_PAGE_SIZE,
};
pub use record::{CycleOutcome, FetchTicket, InvalidDataError, Record, RecordId, RecordStore};
pub use render::{
    build_view, card_view, empty_state, failed_view, filter_buttons, page_markers,
    pagination_controls, placeholder_image_url, CaptureRenderSink, CardView, DashboardView,
    EmptyState, FilterButton, NavButton, PageMarker, PageSizeOption, PaginationControls,
    RenderCoordinator, RenderSink, PAGE_WINDOW,
};
#[cfg(feature = "fetch")]
pub use source::HttpSource;
pub use source::{parse_payload, DataSource, DataSourceError, StaticSource, DEFAULT_DATA_URL};
pub use state::{
    CriteriaUpdate, StateChange, StateContainer, StateEmitter, StateEvent, StateSubscriber,
    StateTopic,
};
pub use stats::{compute_stats, Stats};
