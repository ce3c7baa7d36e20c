//! Named sinks pairing a consumer with ordered or unordered execution.

mod builder;
mod concurrent;
mod sequential;
mod task;

pub use builder::WireBuilder;

use std::sync::Arc;

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;

use crate::counter::ObjectCounter;
use crate::error::Cancelled;
use concurrent::ConcurrentWire;
use sequential::SequentialWire;
use task::Payload;

/// Boxed asynchronous consumer invoked once per delivered item.
pub type Consumer<T> = Arc<dyn Fn(T) -> BoxFuture<'static, ()> + Send + Sync>;

/// Execution mode of a wire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Concurrency {
    /// Strict FIFO in `put` order; consumer invocations never overlap.
    #[default]
    Sequential,
    /// No ordering guarantee; items run in parallel on the pool.
    Concurrent,
}

enum Dispatcher<T> {
    Sequential(SequentialWire<T>),
    Concurrent(ConcurrentWire<T>),
}

/// A named sink accepting items and delivering them to a downstream
/// consumer, optionally serialized and optionally capacity-limited.
///
/// Submission and execution are decoupled: the `put` family waits, at most,
/// for *admission* (a metered wire at capacity), never for the consumer.
/// Cloning is cheap and every clone feeds the same consumer.
///
/// There is no cancellation primitive for scheduled work. Once admitted, an
/// item always eventually runs. On a sequential wire, a consumer that never
/// returns permanently stalls every later item, since each link of the
/// chain transitively depends on the one before it.
pub struct Wire<T> {
    name: String,
    metered: bool,
    flushable: bool,
    counter: Arc<dyn ObjectCounter>,
    dispatcher: Arc<Dispatcher<T>>,
}

impl<T> Clone for Wire<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            metered: self.metered,
            flushable: self.flushable,
            counter: Arc::clone(&self.counter),
            dispatcher: Arc::clone(&self.dispatcher),
        }
    }
}

impl<T> std::fmt::Debug for Wire<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wire")
            .field("name", &self.name)
            .field("metered", &self.metered)
            .field("flushable", &self.flushable)
            .finish_non_exhaustive()
    }
}

impl<T: Send + 'static> Wire<T> {
    /// The wire's informational name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Admits `item` and schedules its delivery.
    ///
    /// Suspends cooperatively while a metered wire is at capacity; never
    /// waits on the consumer itself. Cancellation of the returned future is
    /// ignored in the sense that no error is reported; use
    /// [`put_cancellable`](Self::put_cancellable) to get the item back.
    pub async fn put(&self, item: T) {
        self.counter.on_ramp().await;
        self.dispatch(item);
    }

    /// Non-suspending counterpart of [`put`](Self::put).
    ///
    /// Returns `false` without scheduling anything when the wire is at
    /// capacity, leaving the item with the caller and the count untouched.
    pub fn offer(&self, item: T) -> bool {
        if !self.counter.try_on_ramp() {
            return false;
        }
        self.dispatch(item);
        true
    }

    /// Like [`put`](Self::put), but propagates cancellation: when `cancel`
    /// fires before admission, the item is handed back unscheduled.
    pub async fn put_cancellable(
        &self,
        item: T,
        cancel: &CancellationToken,
    ) -> Result<(), Cancelled<T>> {
        match self.counter.on_ramp_cancellable(cancel).await {
            Ok(()) => {
                self.dispatch(item);
                Ok(())
            }
            Err(_) => Err(Cancelled { item }),
        }
    }

    /// Fire-and-forget submission: forces admission past any capacity and
    /// schedules delivery without suspending.
    ///
    /// The entry point for must-admit items on a metered wire, and the
    /// natural one for the unmetered concurrent case.
    pub fn accept(&self, item: T) {
        self.counter.force_on_ramp();
        self.dispatch(item);
    }

    /// Number of admitted items whose execution has not yet started, or
    /// `-1` when the wire is unmetered.
    pub fn unprocessed_task_count(&self) -> i64 {
        if !self.metered {
            return -1;
        }
        self.counter.count() as i64
    }

    /// Suspends until every admitted item has started executing. Returns
    /// immediately on an unmetered wire.
    ///
    /// This tracks *starts*, not completions; use [`flush`](Self::flush) to
    /// wait until prior submissions have been fully handled.
    pub async fn wait_until_empty(&self) {
        self.counter.wait_until_empty().await;
    }

    /// Waits until everything submitted before this call has been handled.
    ///
    /// On a sequential wire this force-admits a marker task at the current
    /// end of the chain and waits for it to run; the marker occupies a slot
    /// in the unprocessed count like any other task. On a concurrent wire
    /// it degrades to [`wait_until_empty`](Self::wait_until_empty).
    /// Flushing an idle wire returns promptly.
    ///
    /// # Panics
    ///
    /// Panics unless the wire was built with
    /// [`with_flushing`](WireBuilder::with_flushing).
    pub async fn flush(&self) {
        assert!(
            self.flushable,
            "wire '{}' was built without flushing enabled",
            self.name
        );
        match &*self.dispatcher {
            Dispatcher::Sequential(wire) => {
                let (done, handled) = oneshot::channel();
                self.counter.force_on_ramp();
                wire.schedule(Payload::FlushMarker(done));
                // The chain always runs, so the marker cannot be lost.
                let _ = handled.await;
            }
            Dispatcher::Concurrent(_) => self.counter.wait_until_empty().await,
        }
    }

    fn dispatch(&self, item: T) {
        match &*self.dispatcher {
            Dispatcher::Sequential(wire) => wire.schedule(Payload::Item(item)),
            Dispatcher::Concurrent(wire) => wire.schedule(item),
        }
    }
}
