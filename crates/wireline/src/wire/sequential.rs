//! Ordered delivery: a forward-only chain of dependency-counted tasks.

use std::sync::Arc;
use std::sync::atomic::{AtomicPtr, Ordering};

use tokio::runtime::Handle;

use super::Consumer;
use super::task::{ChainedTask, Payload};
use crate::counter::ObjectCounter;

/// State shared by every link of one chain.
pub(crate) struct ChainShared<T> {
    pub(crate) consumer: Consumer<T>,
    pub(crate) counter: Arc<dyn ObjectCounter>,
    pub(crate) executor: Handle,
}

/// The sequential scheduling engine behind an ordered wire.
///
/// Items are delivered to the consumer in exactly the order they were
/// scheduled, one at a time, on whichever pool worker picks up each link.
/// FIFO ordering and mutual exclusion come from the task chain alone; chain
/// extension is a single lock-free pointer swap.
pub(crate) struct SequentialWire<T> {
    shared: Arc<ChainShared<T>>,
    /// Most recently chained, not-yet-supplied task. Always owns exactly
    /// one strong reference to the task it points at.
    tail: AtomicPtr<ChainedTask<T>>,
}

impl<T: Send + 'static> SequentialWire<T> {
    pub(crate) fn new(
        consumer: Consumer<T>,
        counter: Arc<dyn ObjectCounter>,
        executor: Handle,
    ) -> Self {
        let shared = Arc::new(ChainShared {
            consumer,
            counter,
            executor,
        });
        let head = ChainedTask::first(Arc::clone(&shared));
        Self {
            shared,
            tail: AtomicPtr::new(Arc::into_raw(head).cast_mut()),
        }
    }

    /// Chains `payload` behind everything already scheduled.
    ///
    /// A fresh task (dependency count 2) becomes the new tail; the swapped
    /// out predecessor receives the payload and the new task as successor,
    /// which resolves its "data supplied" dependency.
    pub(crate) fn schedule(&self, payload: Payload<T>) {
        let next = ChainedTask::chained(Arc::clone(&self.shared));
        let next_ptr = Arc::into_raw(Arc::clone(&next)).cast_mut();
        let prev_ptr = self.tail.swap(next_ptr, Ordering::AcqRel);
        // SAFETY: the tail held exactly one strong reference to the task
        // behind `prev_ptr`, and the swap transfers it to exactly one
        // caller. Nothing else reads the pointer after the swap.
        let prev = unsafe { Arc::from_raw(prev_ptr) };
        prev.supply(payload, next);
    }
}

impl<T> Drop for SequentialWire<T> {
    fn drop(&mut self) {
        let tail = *self.tail.get_mut();
        // SAFETY: reclaims the strong reference the tail pointer owned.
        // `&mut self` rules out concurrent schedulers.
        unsafe { drop(Arc::from_raw(tail)) };
    }
}
