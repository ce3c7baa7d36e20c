//! In-process dataflow wiring with bounded backpressure.
//!
//! Wireline connects the processing stages of a long-running node into a
//! pipeline. Each stage is fronted by a [`Wire`]: a named sink that hands
//! submitted items to a consumer, either strictly in submission order
//! ([`Concurrency::Sequential`]) or in parallel
//! ([`Concurrency::Concurrent`]). A wire can be metered by an
//! [`ObjectCounter`], which bounds the number of in-flight items at the
//! stage and makes submitters wait cooperatively once the bound is reached.
//!
//! The library rides on the tokio multi-thread runtime: blocked submitters
//! suspend at an `.await` point instead of pinning a worker, ordered chains
//! execute link by link on whichever worker steals them, and no wire owns a
//! thread of its own.
//!
//! # Example
//!
//! ```
//! use wireline::{Concurrency, WireBuilder};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let wire = WireBuilder::new("deliveries")
//!     .with_concurrency(Concurrency::Sequential)
//!     .bind(|order: u64| async move {
//!         println!("processing order {order}");
//!     });
//!
//! wire.put(7).await;
//! # }
//! ```

pub mod config;
pub mod counter;
pub mod error;
pub mod wire;

pub use config::{CounterConfig, DEFAULT_POLL_INTERVAL};
pub use counter::{BackpressureCounter, NoOpCounter, ObjectCounter, StandardCounter};
pub use error::{AdmissionCancelled, Cancelled};
pub use wire::{Concurrency, Consumer, Wire, WireBuilder};
