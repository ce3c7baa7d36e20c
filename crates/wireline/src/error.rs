//! Typed errors for wire submission.

use std::fmt;

use thiserror::Error;

/// Returned by [`ObjectCounter::on_ramp_cancellable`] when the caller's
/// cancellation token fired before the counter admitted the delta.
///
/// [`ObjectCounter::on_ramp_cancellable`]: crate::counter::ObjectCounter::on_ramp_cancellable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("admission wait was cancelled")]
pub struct AdmissionCancelled;

/// Returned by [`Wire::put_cancellable`] when cancellation won the race
/// against admission. The item was never scheduled and is handed back to
/// the caller.
///
/// [`Wire::put_cancellable`]: crate::wire::Wire::put_cancellable
#[derive(Error)]
#[error("submission was cancelled before admission")]
pub struct Cancelled<T> {
    /// The rejected item.
    pub item: T,
}

impl<T> fmt::Debug for Cancelled<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cancelled").finish_non_exhaustive()
    }
}
