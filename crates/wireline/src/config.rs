//! Counter configuration for metered pipeline stages.
//!
//! A stage is metered by attaching an [`ObjectCounter`] to its wire. This
//! module provides the declarative form: a [`CounterConfig`] can live in a
//! larger (de)serialized pipeline description and is turned into a concrete
//! counter with [`CounterConfig::build`].

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::counter::{BackpressureCounter, ObjectCounter, StandardCounter};

/// Default interval a blocked submitter sleeps between admission retries.
///
/// Chosen to keep retry traffic negligible while staying well below the
/// latencies at which a stalled pipeline stage becomes observable. Stages
/// with tighter latency budgets should set their own interval via
/// [`CounterConfig::with_poll_interval`].
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Configuration for a stage counter.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use wireline::CounterConfig;
///
/// // Bound a hot stage at 4096 in-flight items, polling every millisecond.
/// let hot = CounterConfig::bounded(4096).with_poll_interval(Duration::from_millis(1));
///
/// // Count a stage without ever pushing back.
/// let audit = CounterConfig::unbounded();
/// # let _ = (hot.build(), audit.build());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterConfig {
    /// Maximum number of in-flight objects, or `None` for an unbounded
    /// counter.
    capacity: Option<u64>,

    /// Sleep interval used while blocked on admission or drain.
    poll_interval: Duration,
}

impl CounterConfig {
    /// A counter that tracks in-flight objects without a capacity.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            capacity: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// A counter bounded at `capacity` in-flight objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn bounded(capacity: u64) -> Self {
        assert!(capacity > 0, "capacity must be ≥ 1");
        Self {
            capacity: Some(capacity),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the blocked-submitter poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Returns the configured capacity, if any.
    #[inline]
    pub fn capacity(&self) -> Option<u64> {
        self.capacity
    }

    /// Returns the configured poll interval.
    #[inline]
    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Builds the counter this configuration describes.
    pub fn build(&self) -> Arc<dyn ObjectCounter> {
        match self.capacity {
            Some(capacity) => Arc::new(BackpressureCounter::new(capacity, self.poll_interval)),
            None => Arc::new(StandardCounter::new(self.poll_interval)),
        }
    }
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self::unbounded()
    }
}
