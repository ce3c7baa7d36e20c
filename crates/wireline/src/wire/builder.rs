//! Builder wiring a name, an execution mode, a counter, and a consumer
//! into a [`Wire`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tracing::debug;

use super::concurrent::ConcurrentWire;
use super::sequential::SequentialWire;
use super::{Concurrency, Consumer, Dispatcher, Wire};
use crate::counter::{BackpressureCounter, NoOpCounter, ObjectCounter};

/// Builder for [`Wire`].
///
/// ```
/// use std::time::Duration;
/// use wireline::{Concurrency, WireBuilder};
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let wire = WireBuilder::new("ingest")
///     .with_concurrency(Concurrency::Concurrent)
///     .with_capacity(1024, Duration::from_millis(1))
///     .bind(|batch: Vec<u8>| async move {
///         let _ = batch;
///     });
/// # let _ = wire;
/// # }
/// ```
pub struct WireBuilder {
    name: String,
    concurrency: Concurrency,
    counter: Option<Arc<dyn ObjectCounter>>,
    flushing: bool,
    executor: Option<Handle>,
}

impl WireBuilder {
    /// Starts a builder for a wire called `name`.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty or contains anything other than ASCII
    /// alphanumerics and underscores.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "wire name must not be empty");
        assert!(
            name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'),
            "wire name may only contain alphanumerics and underscores, got {name:?}"
        );
        Self {
            name,
            concurrency: Concurrency::default(),
            counter: None,
            flushing: false,
            executor: None,
        }
    }

    /// Choose ordered or unordered execution. Defaults to
    /// [`Concurrency::Sequential`].
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: Concurrency) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Meter the wire with an externally owned counter. Sharing one counter
    /// between wires meters them as a unit.
    #[must_use]
    pub fn with_counter(mut self, counter: Arc<dyn ObjectCounter>) -> Self {
        self.counter = Some(counter);
        self
    }

    /// Meter the wire with an internal bounded counter.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0.
    #[must_use]
    pub fn with_capacity(mut self, capacity: u64, poll_interval: Duration) -> Self {
        self.counter = Some(Arc::new(BackpressureCounter::new(capacity, poll_interval)));
        self
    }

    /// Enables [`Wire::flush`].
    #[must_use]
    pub fn with_flushing(mut self, enabled: bool) -> Self {
        self.flushing = enabled;
        self
    }

    /// Runs the wire's work on `executor` instead of the ambient runtime.
    #[must_use]
    pub fn with_executor(mut self, executor: Handle) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Binds the consumer and builds the wire.
    ///
    /// # Panics
    ///
    /// Panics when no executor was provided and the call is made from
    /// outside a tokio runtime.
    pub fn bind<T, F, Fut>(self, handler: F) -> Wire<T>
    where
        T: Send + 'static,
        F: Fn(T) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let consumer: Consumer<T> = Arc::new(move |item| Box::pin(handler(item)));
        let executor = self.executor.unwrap_or_else(Handle::current);
        let metered = self.counter.is_some();
        let counter = self
            .counter
            .unwrap_or_else(|| Arc::new(NoOpCounter::new()));

        debug!(
            name = %self.name,
            concurrency = ?self.concurrency,
            metered,
            "wire bound"
        );

        let dispatcher = match self.concurrency {
            Concurrency::Sequential => Dispatcher::Sequential(SequentialWire::new(
                consumer,
                Arc::clone(&counter),
                executor,
            )),
            Concurrency::Concurrent => Dispatcher::Concurrent(ConcurrentWire::new(
                consumer,
                Arc::clone(&counter),
                executor,
            )),
        };

        Wire {
            name: self.name,
            metered,
            flushable: self.flushing,
            counter,
            dispatcher: Arc::new(dispatcher),
        }
    }
}
