//! Cooperative cancellation for in-flight classify calls.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A caller-supplied token for cancelling a queued or running classify call.
///
/// The pipeline checks the token before preprocessing begins and again before
/// the forward pass; the forward pass itself is not preemptible. A cancelled
/// call still delivers exactly one outcome
/// ([`ClassifyError::Cancelled`](crate::core::ClassifyError::Cancelled)).
///
/// Tokens are cheaply cloneable; all clones observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a new, non-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns true if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
