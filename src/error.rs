//! Error Taxonomy for the Stream-Finding Core
//!
//! Every fallible operation in the crate returns [`Result`]. The variants
//! mirror the status codes surfaced at the pipeline boundary:
//!
//! - `InvalidArgument`: pre-condition violation on shapes, sizes, or
//!   non-finite inputs
//! - `OutOfMemory`: host allocation would exceed addressable bounds
//! - `AcceleratorUnavailable`: no device present when one was required
//! - `AcceleratorAllocFailed` / `AcceleratorCopyFailed` /
//!   `AcceleratorKernelFailed`: device-side failures, fatal (not retried
//!   on host)
//! - `Cancelled`: a cooperative cancellation token was observed
//! - `Internal`: an invariant violation discovered at runtime — a bug
//!   signal, not recoverable
//!
//! Errors carry a human-readable message and no stack trace; logging is
//! the caller's decision.

use thiserror::Error;

/// Error type for all core operations.
#[derive(Debug, Error)]
pub enum TopoError {
    /// Pre-condition violation on shapes, sizes, or NaN/∞ inputs.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Host allocation failure or an allocation that would overflow.
    #[error("out of memory: {0}")]
    OutOfMemory(String),

    /// No accelerator device present when `Required` was configured.
    #[error("accelerator unavailable: {0}")]
    AcceleratorUnavailable(String),

    /// Device memory allocation failed.
    #[error("accelerator allocation failed: {0}")]
    AcceleratorAllocFailed(String),

    /// Host/device transfer failed.
    #[error("accelerator copy failed: {0}")]
    AcceleratorCopyFailed(String),

    /// Device kernel launch or execution failed.
    #[error("accelerator kernel failed: {0}")]
    AcceleratorKernelFailed(String),

    /// Cooperative cancellation was observed at a stage boundary.
    #[error("operation cancelled")]
    Cancelled,

    /// Invariant violation — indicates a bug in the core, not bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl TopoError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::OutOfMemory(_) => "OUT_OF_MEMORY",
            Self::AcceleratorUnavailable(_) => "ACCELERATOR_UNAVAILABLE",
            Self::AcceleratorAllocFailed(_) => "ACCELERATOR_ALLOC_FAILED",
            Self::AcceleratorCopyFailed(_) => "ACCELERATOR_COPY_FAILED",
            Self::AcceleratorKernelFailed(_) => "ACCELERATOR_KERNEL_FAILED",
            Self::Cancelled => "CANCELLED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// True for the three fatal device-side failures.
    ///
    /// `AcceleratorUnavailable` is deliberately excluded: it is the only
    /// accelerator condition eligible for silent host fallback.
    pub fn is_accelerator_fatal(&self) -> bool {
        matches!(
            self,
            Self::AcceleratorAllocFailed(_)
                | Self::AcceleratorCopyFailed(_)
                | Self::AcceleratorKernelFailed(_)
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TopoError>;
