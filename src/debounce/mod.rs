//! Debounce - a cancellable delayed task driven by the host's event loop.
//!
//! Scheduling a value cancels whatever was pending and re-arms the deadline,
//! so only the last value scheduled within one quiet window is delivered.
//! Nothing runs on its own thread: the host calls [`Debouncer::poll`] from its
//! loop (or timer callback) and acts on what comes back.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use user_dashboard::{Clock, Debouncer, ManualClock};
//!
//! let clock = ManualClock::new();
//! let mut search = Debouncer::new(Duration::from_millis(300));
//!
//! search.schedule("a", clock.now());
//! search.schedule("ab", clock.now());
//! clock.advance(Duration::from_millis(300));
//!
//! assert_eq!(search.poll(clock.now()), Some("ab"));
//! ```

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Source of the current instant.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to. Clone-friendly via Arc.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Arc::new(Mutex::new(Instant::now())),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Holds at most one pending value and the instant it becomes due. A delay
/// too large to represent leaves the value pending until flushed.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Option<Instant>)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replace any pending value and restart the quiet window from `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now.checked_add(self.delay)));
    }

    /// Take the pending value if its deadline has been reached.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, Some(due))) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drop the pending value. Returns whether anything was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().and_then(|(_, due)| *due)
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}
