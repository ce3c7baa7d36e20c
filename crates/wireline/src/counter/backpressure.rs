//! Bounded counter enforcing a per-stage capacity.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use super::ObjectCounter;
use super::blocking::{CapacityBlocker, DrainBlocker, try_admit};
use crate::error::AdmissionCancelled;

/// A counter that refuses to grow past a fixed capacity.
///
/// Admission is optimistic: the delta is applied with a single atomic add
/// and rolled back if the result overshoots the capacity. Only when that
/// fails does [`on_ramp`](ObjectCounter::on_ramp) fall back to the capacity
/// blocker, which sleeps `poll_interval` between retries.
#[derive(Debug)]
pub struct BackpressureCounter {
    count: AtomicI64,
    capacity: i64,
    poll_interval: Duration,
}

impl BackpressureCounter {
    /// Creates a counter bounded at `capacity` in-flight objects.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn new(capacity: u64, poll_interval: Duration) -> Self {
        assert!(capacity > 0, "capacity must be ≥ 1");
        Self {
            count: AtomicI64::new(0),
            capacity: capacity as i64,
            poll_interval,
        }
    }

    /// The configured capacity.
    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity as u64
    }
}

#[async_trait]
impl ObjectCounter for BackpressureCounter {
    async fn on_ramp_many(&self, delta: u64) {
        let delta = delta as i64;
        if try_admit(&self.count, self.capacity, delta) {
            return;
        }
        trace!(capacity = self.capacity, "backpressure engaged");
        CapacityBlocker::new(&self.count, self.capacity, self.poll_interval)
            .admit(delta)
            .await;
        trace!(capacity = self.capacity, "backpressure released");
    }

    async fn on_ramp_cancellable_many(
        &self,
        delta: u64,
        cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled> {
        let delta = delta as i64;
        if try_admit(&self.count, self.capacity, delta) {
            return Ok(());
        }
        CapacityBlocker::new(&self.count, self.capacity, self.poll_interval)
            .admit_cancellable(delta, cancel)
            .await
    }

    fn try_on_ramp_many(&self, delta: u64) -> bool {
        try_admit(&self.count, self.capacity, delta as i64)
    }

    fn force_on_ramp_many(&self, delta: u64) {
        self.count.fetch_add(delta as i64, Ordering::AcqRel);
    }

    fn off_ramp_many(&self, delta: u64) {
        self.count.fetch_sub(delta as i64, Ordering::AcqRel);
    }

    fn count(&self) -> u64 {
        self.count.load(Ordering::Acquire).max(0) as u64
    }

    async fn wait_until_empty(&self) {
        DrainBlocker::new(&self.count, self.poll_interval)
            .drained()
            .await;
    }
}
