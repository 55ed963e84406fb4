//! Analytics - usage events queued and shipped in batches.
//!
//! Events are buffered by an [`AnalyticsCollector`] and handed to an
//! [`AnalyticsSink`] either when the queue reaches the batch size or when
//! [`AnalyticsCollector::tick`] finds the flush interval elapsed. Nothing
//! here blocks the dashboard: a failing sink only costs a warning.
//!
//! ## Example
//!
//! ```ignore
//! use user_dashboard::{AnalyticsCollector, AnalyticsConfig, AnalyticsEvent, BufferSink};
//!
//! let mut analytics = AnalyticsCollector::new(BufferSink::new(), AnalyticsConfig::default());
//! analytics.track(AnalyticsEvent::page_view("/users"));
//! analytics.flush()?;
//! ```

mod observer;
mod sink;

use std::collections::VecDeque;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::AnalyticsConfig;
use crate::debounce::{Clock, SystemClock};

pub use observer::AnalyticsObserver;
#[cfg(feature = "fetch")]
pub use sink::HttpSink;
pub use sink::{AnalyticsSink, BufferSink};

pub type Properties = Map<String, Value>;

/// One tracked event. Timestamps are milliseconds since the Unix epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AnalyticsEvent {
    PageView {
        page: String,
        timestamp: u64,
        #[serde(default)]
        properties: Properties,
    },
    UserInteraction {
        element: String,
        action: String,
        timestamp: u64,
        #[serde(default)]
        properties: Properties,
    },
    Performance {
        timestamp: u64,
        #[serde(default)]
        properties: Properties,
    },
    Error {
        timestamp: u64,
        #[serde(default)]
        properties: Properties,
    },
    Custom {
        #[serde(rename = "eventName")]
        event_name: String,
        timestamp: u64,
        #[serde(default)]
        properties: Properties,
    },
}

impl AnalyticsEvent {
    pub fn page_view(page: impl Into<String>) -> Self {
        AnalyticsEvent::PageView {
            page: page.into(),
            timestamp: now_millis(),
            properties: Properties::new(),
        }
    }

    pub fn interaction(element: impl Into<String>, action: impl Into<String>) -> Self {
        AnalyticsEvent::UserInteraction {
            element: element.into(),
            action: action.into(),
            timestamp: now_millis(),
            properties: Properties::new(),
        }
    }

    pub fn performance(metrics: Properties) -> Self {
        AnalyticsEvent::Performance {
            timestamp: now_millis(),
            properties: metrics,
        }
    }

    /// An error event carrying `name` and `message` properties.
    pub fn error(name: &str, message: impl Into<String>) -> Self {
        let mut properties = Properties::new();
        properties.insert("name".into(), Value::from(name));
        properties.insert("message".into(), Value::from(message.into()));
        AnalyticsEvent::Error {
            timestamp: now_millis(),
            properties,
        }
    }

    pub fn custom(event_name: impl Into<String>) -> Self {
        AnalyticsEvent::Custom {
            event_name: event_name.into(),
            timestamp: now_millis(),
            properties: Properties::new(),
        }
    }

    /// Add one property, replacing any earlier value under `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties_mut().insert(key.into(), value.into());
        self
    }

    pub fn properties(&self) -> &Properties {
        match self {
            AnalyticsEvent::PageView { properties, .. }
            | AnalyticsEvent::UserInteraction { properties, .. }
            | AnalyticsEvent::Performance { properties, .. }
            | AnalyticsEvent::Error { properties, .. }
            | AnalyticsEvent::Custom { properties, .. } => properties,
        }
    }

    fn properties_mut(&mut self) -> &mut Properties {
        match self {
            AnalyticsEvent::PageView { properties, .. }
            | AnalyticsEvent::UserInteraction { properties, .. }
            | AnalyticsEvent::Performance { properties, .. }
            | AnalyticsEvent::Error { properties, .. }
            | AnalyticsEvent::Custom { properties, .. } => properties,
        }
    }
}

/// The payload shipped to a sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsBatch {
    pub events: Vec<AnalyticsEvent>,
    pub session_id: String,
    pub user_id: String,
    pub timestamp: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalyticsError {
    #[error("failed to send analytics events: {0}")]
    Transport(String),
    #[error("analytics endpoint answered {0}")]
    Status(u16),
    #[error("analytics buffer poisoned")]
    BufferPoisoned,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectorStats {
    pub events_tracked: usize,
    pub batches_sent: usize,
    pub events_sent: usize,
    pub sends_failed: usize,
    pub events_dropped: usize,
}

/// Queues events and flushes them to `S` in batches.
pub struct AnalyticsCollector<S: AnalyticsSink, C: Clock = SystemClock> {
    sink: S,
    clock: C,
    config: AnalyticsConfig,
    queue: VecDeque<AnalyticsEvent>,
    first_queued: Option<Instant>,
    failures: u32,
    session_id: String,
    user_id: String,
    stats: CollectorStats,
}

impl<S: AnalyticsSink> AnalyticsCollector<S, SystemClock> {
    pub fn new(sink: S, config: AnalyticsConfig) -> Self {
        Self::with_clock(sink, config, SystemClock)
    }
}

impl<S: AnalyticsSink, C: Clock> AnalyticsCollector<S, C> {
    pub fn with_clock(sink: S, config: AnalyticsConfig, clock: C) -> Self {
        Self {
            sink,
            clock,
            config,
            queue: VecDeque::new(),
            first_queued: None,
            failures: 0,
            session_id: generate_id(),
            user_id: generate_id(),
            stats: CollectorStats::default(),
        }
    }

    /// Use a known user id instead of a generated one.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    pub fn stats(&self) -> CollectorStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Queue `event`; a full queue is flushed right away.
    pub fn track(&mut self, event: AnalyticsEvent) {
        self.queue.push_back(event);
        self.stats.events_tracked += 1;
        if self.first_queued.is_none() {
            self.first_queued = Some(self.clock.now());
        }

        if self.queue.len() >= self.config.batch_size {
            // Failures are logged and requeued by flush.
            let _ = self.flush();
        }
    }

    /// Flush if the oldest queued event has waited a full flush interval.
    pub fn tick(&mut self) -> Result<usize, AnalyticsError> {
        match self.first_queued {
            Some(since) if due(since, self.config.flush_interval(), self.clock.now()) => self.flush(),
            _ => Ok(0),
        }
    }

    /// Send everything queued as one batch. Returns the number of events sent.
    ///
    /// A failed send puts the batch back at the front of the queue, until
    /// `max_retries` consecutive failures drop it.
    pub fn flush(&mut self) -> Result<usize, AnalyticsError> {
        if self.queue.is_empty() {
            return Ok(0);
        }

        let batch = AnalyticsBatch {
            events: self.queue.drain(..).collect(),
            session_id: self.session_id.clone(),
            user_id: self.user_id.clone(),
            timestamp: now_millis(),
        };
        self.first_queued = None;
        let count = batch.events.len();

        match self.sink.send(&batch) {
            Ok(()) => {
                debug!(count, "analytics batch sent");
                self.failures = 0;
                self.stats.batches_sent += 1;
                self.stats.events_sent += count;
                Ok(count)
            }
            Err(err) => {
                self.failures += 1;
                self.stats.sends_failed += 1;
                if self.failures >= self.config.max_retries {
                    warn!(%err, count, attempts = self.failures, "dropping analytics batch");
                    self.failures = 0;
                    self.stats.events_dropped += count;
                } else {
                    warn!(%err, count, attempt = self.failures, "analytics send failed, requeueing");
                    for event in batch.events.into_iter().rev() {
                        self.queue.push_front(event);
                    }
                    self.first_queued = Some(self.clock.now());
                }
                Err(err)
            }
        }
    }
}

pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// An interval too large to represent never comes due.
fn due(since: Instant, interval: Duration, now: Instant) -> bool {
    since.checked_add(interval).is_some_and(|deadline| now >= deadline)
}

fn generate_id() -> String {
    format!("id_{}", Uuid::new_v4().simple())
}
