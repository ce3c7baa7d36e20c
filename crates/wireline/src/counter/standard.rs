//! Unbounded counter: counts in-flight objects but never pushes back.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ObjectCounter;
use super::blocking::DrainBlocker;
use crate::config::DEFAULT_POLL_INTERVAL;
use crate::error::AdmissionCancelled;

/// A counter with no capacity. Every admission succeeds immediately; the
/// poll interval is only used while [`wait_until_empty`] drains.
///
/// [`wait_until_empty`]: ObjectCounter::wait_until_empty
#[derive(Debug)]
pub struct StandardCounter {
    count: AtomicI64,
    poll_interval: Duration,
}

impl StandardCounter {
    /// Creates an unbounded counter.
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        Self {
            count: AtomicI64::new(0),
            poll_interval,
        }
    }
}

impl Default for StandardCounter {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

#[async_trait]
impl ObjectCounter for StandardCounter {
    async fn on_ramp_many(&self, delta: u64) {
        self.count.fetch_add(delta as i64, Ordering::AcqRel);
    }

    async fn on_ramp_cancellable_many(
        &self,
        delta: u64,
        _cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled> {
        self.count.fetch_add(delta as i64, Ordering::AcqRel);
        Ok(())
    }

    fn try_on_ramp_many(&self, delta: u64) -> bool {
        self.count.fetch_add(delta as i64, Ordering::AcqRel);
        true
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
