//! Counter that does nothing, for unmetered wires.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::ObjectCounter;
use crate::error::AdmissionCancelled;

/// Performs no bookkeeping. Wires without a configured counter use this so
/// the submission paths stay free of `Option` checks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCounter;

impl NoOpCounter {
    /// Creates the no-op counter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ObjectCounter for NoOpCounter {
    async fn on_ramp_many(&self, _delta: u64) {}

    async fn on_ramp_cancellable_many(
        &self,
        _delta: u64,
        _cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled> {
        Ok(())
    }

    fn try_on_ramp_many(&self, _delta: u64) -> bool {
        true
    }

    fn force_on_ramp_many(&self, _delta: u64) {}

    fn off_ramp_many(&self, _delta: u64) {}

    fn count(&self) -> u64 {
        0
    }

    async fn wait_until_empty(&self) {}
}
