//! Cooperative blocking used while a counter is saturated or draining.
//!
//! Both strategies sleep on the runtime instead of busy-spinning, so a
//! blocked submitter yields its worker slot to other runnable tasks and the
//! pool keeps its throughput under backpressure.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::AdmissionCancelled;

/// Optimistic admission test shared by every bounded entry point.
///
/// Applies `delta` first and rolls it back if the result overshoots
/// `capacity`. The uncontended path is a single atomic read-modify-write.
pub(crate) fn try_admit(count: &AtomicI64, capacity: i64, delta: i64) -> bool {
    let admitted = count.fetch_add(delta, Ordering::AcqRel) + delta;
    if admitted > capacity {
        count.fetch_sub(delta, Ordering::AcqRel);
        return false;
    }
    true
}

/// Sleeps a fixed interval, then re-runs the same optimistic admission test,
/// until `delta` fits under `capacity`.
pub(crate) struct CapacityBlocker<'a> {
    count: &'a AtomicI64,
    capacity: i64,
    poll_interval: Duration,
}

impl<'a> CapacityBlocker<'a> {
    pub(crate) fn new(count: &'a AtomicI64, capacity: i64, poll_interval: Duration) -> Self {
        Self {
            count,
            capacity,
            poll_interval,
        }
    }

    /// Suspends until `delta` has been admitted.
    pub(crate) async fn admit(&self, delta: i64) {
        while !try_admit(self.count, self.capacity, delta) {
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Suspends until `delta` has been admitted or `cancel` fires,
    /// whichever comes first.
    pub(crate) async fn admit_cancellable(
        &self,
        delta: i64,
        cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled> {
        while !try_admit(self.count, self.capacity, delta) {
            tokio::select! {
                _ = cancel.cancelled() => return Err(AdmissionCancelled),
                _ = tokio::time::sleep(self.poll_interval) => {}
            }
        }
        Ok(())
    }
}

/// Readiness is an empty counter. Lets a drain park without pinning a
/// worker and without holding back new admissions.
pub(crate) struct DrainBlocker<'a> {
    count: &'a AtomicI64,
    poll_interval: Duration,
}

impl<'a> DrainBlocker<'a> {
    pub(crate) fn new(count: &'a AtomicI64, poll_interval: Duration) -> Self {
        Self {
            count,
            poll_interval,
        }
    }

    /// Suspends until the count reaches zero.
    pub(crate) async fn drained(&self) {
        while self.count.load(Ordering::Acquire) > 0 {
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
