//! Cancellation tokens for interactive wallet verification
//!
//! A verification may fetch several pointers; the admin UI needs to be able
//! to abandon an in-flight run (field edited, dialog closed) without
//! corrupting state. Tokens are checked between pointer fetches.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// Generic cancellation token trait
pub trait CancellationToken: Send + Sync + std::fmt::Debug {
    /// Check if cancellation has been requested
    fn is_cancelled(&self) -> bool;

    /// Request cancellation of the operation
    fn cancel(&self);
}

/// Simple atomic boolean-based cancellation token
///
/// Clones share the same underlying flag, so one clone can be handed to the
/// verification task and another kept to trigger cancellation.
#[derive(Debug, Clone, Default)]
pub struct AtomicCancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl AtomicCancellationToken {
    /// Create a new token in the not-cancelled state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the token for reuse
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::Relaxed);
    }
}

impl CancellationToken for AtomicCancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

/// A cancellation token that never cancels
///
/// Useful as a default when a caller has no cancellation source.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancelToken;

impl CancellationToken for NeverCancelToken {
    fn is_cancelled(&self) -> bool {
        false
    }

    fn cancel(&self) {
        // This token never cancels
    }
}
