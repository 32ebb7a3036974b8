//! Compute Backend Capability
//!
//! The scan-style operations of the pipeline — kNN, density filtration,
//! radius queries — exist in host and accelerated forms. Rather than
//! branching on device availability at every call site, a capability
//! object is selected once at pipeline construction and call sites invoke
//! through it.
//!
//! This crate compiles the host implementation only. The trait is public
//! so an accelerated backend (CUDA, wgpu, ...) can be supplied through
//! [`crate::pipeline::StreamPipeline::with_backend`]; such a backend
//! reports its own `AcceleratorAllocFailed` / `AcceleratorCopyFailed` /
//! `AcceleratorKernelFailed` conditions, which are fatal — only
//! `AcceleratorUnavailable` at selection time is eligible for silent
//! host fallback under [`AcceleratorMode::Auto`].

use ndarray::{Array1, ArrayView1, ArrayView2};

use crate::config::AcceleratorMode;
use crate::error::{Result, TopoError};
use crate::filtration::density_filtration;
use crate::knn::{knn, radius_query, KnnResult};

/// The operation set shared by host and accelerated implementations.
///
/// Implementations must be observably identical: the pipeline's
/// bit-exactness contract across `use_accelerator` settings holds only
/// for backends that reproduce the host ordering and arithmetic.
pub trait ComputeBackend: Send + Sync + std::fmt::Debug {
    /// Short backend identifier for logs.
    fn name(&self) -> &'static str;

    /// k-nearest-neighbor search, self excluded (see [`crate::knn::knn`]).
    fn knn(&self, points: ArrayView2<f64>, k: usize) -> Result<KnnResult>;

    /// Superlevel-set density filtration from kth-neighbor distances.
    fn density_filtration(&self, kth: ArrayView1<f64>, epsilon: f64) -> Result<Array1<f64>>;

    /// Inclusive radius query (see [`crate::knn::radius_query`]).
    fn radius_query(
        &self,
        points: ArrayView2<f64>,
        center: ArrayView1<f64>,
        radius: f64,
    ) -> Result<Vec<i32>>;
}

/// Host implementation: brute-force scans parallelized across worker
/// threads with rayon.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostBackend;

impl ComputeBackend for HostBackend {
    fn name(&self) -> &'static str {
        "host"
    }

    fn knn(&self, points: ArrayView2<f64>, k: usize) -> Result<KnnResult> {
        knn(points, k)
    }

    fn density_filtration(&self, kth: ArrayView1<f64>, epsilon: f64) -> Result<Array1<f64>> {
        Ok(density_filtration(kth, epsilon))
    }

    fn radius_query(
        &self,
        points: ArrayView2<f64>,
        center: ArrayView1<f64>,
        radius: f64,
    ) -> Result<Vec<i32>> {
        radius_query(points, center, radius)
    }
}

/// Probe for an accelerator device. None is compiled into this crate.
fn probe_accelerator() -> Option<Box<dyn ComputeBackend>> {
    None
}

/// Select the backend for a pipeline, once, at construction time.
///
/// `Auto` falls back to the host when no device is present; any other
/// accelerator condition would surface as-is. `Required` fails with
/// `AcceleratorUnavailable` when the probe finds nothing.
pub fn select_backend(mode: AcceleratorMode) -> Result<Box<dyn ComputeBackend>> {
    match mode {
        AcceleratorMode::Off => Ok(Box::new(HostBackend)),
        AcceleratorMode::Required => probe_accelerator().ok_or_else(|| {
            TopoError::AcceleratorUnavailable("no accelerator device present".into())
        }),
        AcceleratorMode::Auto => Ok(probe_accelerator().unwrap_or_else(|| {
            tracing::debug!("no accelerator present, falling back to host backend");
            Box::new(HostBackend)
        })),
    }
}
