//! Dependency-counted tasks forming an ordered execution chain.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::oneshot;

use super::sequential::ChainShared;

/// Work carried by one chain link.
pub(crate) enum Payload<T> {
    /// An item destined for the consumer.
    Item(T),
    /// A flush marker: completes the sender instead of invoking the
    /// consumer.
    FlushMarker(oneshot::Sender<()>),
}

struct Slot<T> {
    payload: Payload<T>,
    successor: Arc<ChainedTask<T>>,
}

/// A schedulable unit with an atomic count of unmet dependencies.
///
/// The first link of a chain starts with one unmet dependency ("data
/// supplied"); every later link starts with two ("predecessor finished" and
/// "data supplied"). [`send`](ChainedTask::send) resolves one dependency;
/// when the count reaches zero the task forks onto the pool, runs exactly
/// once, and resolves the outstanding dependency of its successor.
pub(crate) struct ChainedTask<T> {
    pending: AtomicUsize,
    slot: Mutex<Option<Slot<T>>>,
    shared: Arc<ChainShared<T>>,
}

impl<T: Send + 'static> ChainedTask<T> {
    /// First link of a chain: no predecessor to wait for.
    pub(crate) fn first(shared: Arc<ChainShared<T>>) -> Arc<Self> {
        Self::with_pending(shared, 1)
    }

    /// A later link: waits for its predecessor and its data.
    pub(crate) fn chained(shared: Arc<ChainShared<T>>) -> Arc<Self> {
        Self::with_pending(shared, 2)
    }

    fn with_pending(shared: Arc<ChainShared<T>>, pending: usize) -> Arc<Self> {
        Arc::new(Self {
            pending: AtomicUsize::new(pending),
            slot: Mutex::new(None),
            shared,
        })
    }

    /// Hands the link its payload and successor, resolving the "data
    /// supplied" dependency.
    pub(crate) fn supply(self: Arc<Self>, payload: Payload<T>, successor: Arc<ChainedTask<T>>) {
        let replaced = self
            .slot
            .lock()
            .unwrap()
            .replace(Slot { payload, successor });
        debug_assert!(replaced.is_none(), "a chain link is supplied exactly once");
        self.send();
    }

    /// Resolves one dependency; the last resolution forks the task.
    pub(crate) fn send(self: Arc<Self>) {
        if self.pending.fetch_sub(1, Ordering::AcqRel) == 1 {
            let executor = self.shared.executor.clone();
            executor.spawn(async move { self.run().await });
        }
    }

    async fn run(&self) {
        let Some(Slot { payload, successor }) = self.slot.lock().unwrap().take() else {
            unreachable!("a chain link forks only after its payload is supplied");
        };
        // Off-ramp before the consumer body so the count reflects
        // admitted-but-not-yet-started items.
        self.shared.counter.off_ramp();
        match payload {
            Payload::Item(item) => (self.shared.consumer)(item).await,
            Payload::FlushMarker(done) => {
                let _ = done.send(());
            }
        }
        successor.send();
    }
}
