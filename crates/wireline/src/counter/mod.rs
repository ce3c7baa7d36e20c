//! In-flight object counters for metering pipeline stages.
//!
//! A counter tracks how many objects are currently "in flight" at a stage:
//! submissions on-ramp, the scheduled work off-ramps as its first action.
//! The [`BackpressureCounter`] additionally enforces a capacity, making
//! on-ramps wait cooperatively once the stage is full; [`StandardCounter`]
//! only counts; [`NoOpCounter`] does no bookkeeping at all, which lets
//! unmetered wires skip an `Option` check on every submission.

mod backpressure;
mod blocking;
mod noop;
mod standard;

pub use backpressure::BackpressureCounter;
pub use noop::NoOpCounter;
pub use standard::StandardCounter;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::AdmissionCancelled;

/// Tracks objects currently in flight at a pipeline stage.
///
/// All mutation goes through atomic read-modify-write operations; a counter
/// is safe to share across any number of submitting and executing tasks.
#[async_trait]
pub trait ObjectCounter: Send + Sync + std::fmt::Debug {
    /// Admits `delta` objects, suspending cooperatively while the stage is
    /// at capacity.
    async fn on_ramp_many(&self, delta: u64);

    /// Like [`on_ramp_many`](Self::on_ramp_many), but gives up and returns
    /// an error once `cancel` fires.
    async fn on_ramp_cancellable_many(
        &self,
        delta: u64,
        cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled>;

    /// Admits `delta` objects only if capacity allows. Never suspends.
    fn try_on_ramp_many(&self, delta: u64) -> bool;

    /// Admits `delta` objects unconditionally, bypassing any capacity.
    ///
    /// This is the escape valve for must-admit items such as flush markers;
    /// while it is in use, [`count`](Self::count) may transiently exceed the
    /// configured capacity.
    fn force_on_ramp_many(&self, delta: u64);

    /// Releases `delta` objects.
    fn off_ramp_many(&self, delta: u64);

    /// Current in-flight count. Approximate while forced admission is in
    /// use concurrently.
    fn count(&self) -> u64;

    /// Suspends until the count reaches zero.
    ///
    /// Waiting does not hold back new admissions, so under continuous load
    /// this may never return.
    async fn wait_until_empty(&self);

    /// Admits a single object, suspending while the stage is at capacity.
    async fn on_ramp(&self) {
        self.on_ramp_many(1).await;
    }

    /// Admits a single object unless `cancel` fires first.
    async fn on_ramp_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> Result<(), AdmissionCancelled> {
        self.on_ramp_cancellable_many(1, cancel).await
    }

    /// Admits a single object only if capacity allows. Never suspends.
    fn try_on_ramp(&self) -> bool {
        self.try_on_ramp_many(1)
    }

    /// Admits a single object unconditionally.
    fn force_on_ramp(&self) {
        self.force_on_ramp_many(1);
    }

    /// Releases a single object.
    fn off_ramp(&self) {
        self.off_ramp_many(1);
    }
}
