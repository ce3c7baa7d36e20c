//! Unordered delivery: each item forks straight onto the pool.

use std::sync::Arc;

use tokio::runtime::Handle;

use super::Consumer;
use crate::counter::ObjectCounter;

/// The concurrent scheduling engine behind an unordered wire. No ordering
/// guarantee among submissions; no backpressure unless metered.
pub(crate) struct ConcurrentWire<T> {
    consumer: Consumer<T>,
    counter: Arc<dyn ObjectCounter>,
    executor: Handle,
}

impl<T: Send + 'static> ConcurrentWire<T> {
    pub(crate) fn new(
        consumer: Consumer<T>,
        counter: Arc<dyn ObjectCounter>,
        executor: Handle,
    ) -> Self {
        Self {
            consumer,
            counter,
            executor,
        }
    }

    /// Forks the consumer invocation for an already-admitted item.
    pub(crate) fn schedule(&self, item: T) {
        let consumer = Arc::clone(&self.consumer);
        let counter = Arc::clone(&self.counter);
        self.executor.spawn(async move {
            // Off-ramp before the consumer body so the count reflects
            // admitted-but-not-yet-started items.
            counter.off_ramp();
            consumer(item).await;
        });
    }
}
