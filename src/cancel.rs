//! Cooperative Cancellation
//!
//! A [`CancelToken`] is shared between the caller and a running pipeline.
//! The core never enforces timeouts itself; callers flip the token and the
//! pipeline observes it at coarse boundaries — between kNN, filtration,
//! complex build, H0, H1 and feature extraction, and between the edge sort
//! and the reduction loop inside the persistence computations. On
//! observation the failing stage releases its intermediates and returns
//! [`TopoError::Cancelled`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{Result, TopoError};

/// Shared cancellation flag. Cloning yields a handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Has cancellation been requested?
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Stage-boundary check: `Err(Cancelled)` once the token is flipped.
    pub fn checkpoint(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(TopoError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_clear() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(token.checkpoint().is_ok());
    }

    #[test]
    fn test_cancel_observed_by_clone() {
        let token = CancelToken::new();
        let handle = token.clone();
        handle.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(token.checkpoint(), Err(TopoError::Cancelled)));
    }
}
