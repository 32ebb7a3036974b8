//! Stream-Finding Pipeline
//!
//! Single-shot orchestration of the core: kNN search, density filtration,
//! complex construction, H0/H1 persistence, and feature extraction. Data
//! flows strictly forward; each stage's output is the next stage's input,
//! and all intermediates are released on exit whether the invocation
//! succeeds or fails.
//!
//! ## Resource policy
//!
//! Peak memory is dominated by the (n, k) neighbor arrays and the H1
//! boundary columns. The neighbor arrays are dropped as soon as the
//! complex is built — feature-extraction radius queries are served from
//! the original point cloud alone — so the two peaks never coexist.
//!
//! ## Cancellation
//!
//! A [`CancelToken`] is observed between stages (and between sort and
//! reduction inside the persistence computations); on observation the
//! invocation returns [`TopoError::Cancelled`] with intermediates freed.

use ndarray::{Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

use crate::backend::{select_backend, ComputeBackend};
use crate::cancel::CancelToken;
use crate::complex::build_complex;
use crate::config::PipelineConfig;
use crate::error::{Result, TopoError};
use crate::features::{extract_features, FeatureCandidate, SignificanceThreshold};
use crate::persistence::{persistence_h0, persistence_h1, PersistenceDiagram};

/// Parameters and counts describing a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetadata {
    pub n: usize,
    pub d: usize,
    pub k: usize,
    pub sigma: f64,
    pub epsilon: f64,
    pub h0_count: usize,
    pub h1_count: usize,
}

/// Output of a pipeline invocation: finite persistence diagrams and the
/// significant feature candidates per homology dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamAnalysis {
    pub diagram: PersistenceDiagram,
    pub h0_candidates: Vec<FeatureCandidate>,
    pub h1_candidates: Vec<FeatureCandidate>,
    pub metadata: RunMetadata,
}

/// The configured pipeline. The compute backend is selected once at
/// construction; call sites never branch on device availability.
pub struct StreamPipeline {
    config: PipelineConfig,
    backend: Box<dyn ComputeBackend>,
}

impl std::fmt::Debug for StreamPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamPipeline")
            .field("config", &self.config)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl StreamPipeline {
    /// Build a pipeline, selecting the backend per the configured
    /// accelerator policy.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        let backend = select_backend(config.accelerator)?;
        tracing::info!(backend = backend.name(), k = config.k, "pipeline constructed");
        Ok(Self { config, backend })
    }

    /// Build a pipeline around a caller-supplied backend (for example an
    /// accelerated implementation of [`ComputeBackend`]).
    pub fn with_backend(config: PipelineConfig, backend: Box<dyn ComputeBackend>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    /// Run the full pipeline with a fresh (never-cancelled) token.
    pub fn run(&self, points: ArrayView2<f64>) -> Result<StreamAnalysis> {
        self.run_cancellable(points, &CancelToken::new())
    }

    /// Run the full pipeline, observing `cancel` at stage boundaries.
    pub fn run_cancellable(
        &self,
        points: ArrayView2<f64>,
        cancel: &CancelToken,
    ) -> Result<StreamAnalysis> {
        validate_points(&points)?;
        let (n, d) = points.dim();
        tracing::info!(n, d, k = self.config.k, "starting stream analysis");

        let knn = self.backend.knn(points, self.config.k)?;
        cancel.checkpoint()?;

        let kth = knn.kth_distances();
        let filtration = self
            .backend
            .density_filtration(kth.view(), self.config.epsilon_density)?;
        cancel.checkpoint()?;

        let complex = build_complex(&knn.indices, &filtration, 1)?;
        drop(knn); // neighbor arrays are not needed past this point
        cancel.checkpoint()?;

        let h0 = persistence_h0(filtration.view(), &complex.edges, cancel)?;
        cancel.checkpoint()?;

        let h1 = persistence_h1(&complex.edges, &complex.triangles, cancel)?;
        drop(complex);
        cancel.checkpoint()?;

        let threshold = SignificanceThreshold::Sigma(self.config.sigma);
        let h0_candidates =
            extract_features(&h0, points, filtration.view(), threshold, self.backend.as_ref())?;
        let h1_candidates =
            extract_features(&h1, points, filtration.view(), threshold, self.backend.as_ref())?;

        let metadata = RunMetadata {
            n,
            d,
            k: self.config.k,
            sigma: self.config.sigma,
            epsilon: self.config.epsilon_density,
            h0_count: h0.len(),
            h1_count: h1.len(),
        };
        tracing::info!(
            h0_pairs = metadata.h0_count,
            h1_pairs = metadata.h1_count,
            h0_candidates = h0_candidates.len(),
            h1_candidates = h1_candidates.len(),
            "stream analysis complete"
        );

        Ok(StreamAnalysis {
            diagram: PersistenceDiagram { h0, h1 },
            h0_candidates,
            h1_candidates,
            metadata,
        })
    }

    /// The configuration this pipeline was built with.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }
}

fn validate_points(points: &ArrayView2<f64>) -> Result<()> {
    let (n, d) = points.dim();
    if n < 2 {
        return Err(TopoError::InvalidArgument(format!(
            "need at least 2 points, got {n}"
        )));
    }
    if d < 1 {
        return Err(TopoError::InvalidArgument(
            "points must have at least one feature dimension".into(),
        ));
    }
    if points.iter().any(|v| !v.is_finite()) {
        return Err(TopoError::InvalidArgument(
            "point matrix contains non-finite values".into(),
        ));
    }
    Ok(())
}

/// Standardize features to zero mean and unit variance per column.
///
/// Preprocessing for heterogeneous phase-space coordinates (positions in
/// degrees against proper motions in mas/yr); the pipeline itself never
/// rescales. Constant columns are left centered.
pub fn standardize_points(points: ArrayView2<f64>) -> Array2<f64> {
    let n = points.nrows() as f64;
    let mut out = points.to_owned();
    for mut column in out.axis_iter_mut(Axis(1)) {
        let mean = column.sum() / n;
        let variance = column.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let scale = if std > 0.0 { std } else { 1.0 };
        column.mapv_inplace(|v| (v - mean) / scale);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_rejects_degenerate_inputs() {
        let pipeline = StreamPipeline::new(PipelineConfig::with_k(1)).unwrap();

        let one = array![[0.0, 0.0]];
        assert!(pipeline.run(one.view()).is_err());

        let bad = array![[0.0, 0.0], [f64::INFINITY, 0.0]];
        assert!(pipeline.run(bad.view()).is_err());
    }

    #[test]
    fn test_k_must_be_below_n() {
        let pipeline = StreamPipeline::new(PipelineConfig::with_k(3)).unwrap();
        let points = array![[0.0], [1.0], [2.0]];
        let err = pipeline.run(points.view()).unwrap_err();
        assert_eq!(err.code(), "INVALID_ARGUMENT");
    }

    #[test]
    fn test_metadata_reflects_run() {
        let pipeline = StreamPipeline::new(PipelineConfig::with_k(2)).unwrap();
        let points = array![[0.0], [0.1], [0.2], [0.45], [0.7], [0.8], [0.9]];
        let analysis = pipeline.run(points.view()).unwrap();

        assert_eq!(analysis.metadata.n, 7);
        assert_eq!(analysis.metadata.d, 1);
        assert_eq!(analysis.metadata.k, 2);
        assert_eq!(analysis.metadata.h0_count, analysis.diagram.count(0));
        assert_eq!(analysis.metadata.h1_count, analysis.diagram.count(1));
    }

    #[test]
    fn test_cancelled_token_aborts() {
        let pipeline = StreamPipeline::new(PipelineConfig::with_k(1)).unwrap();
        let points = array![[0.0], [1.0]];
        let token = CancelToken::new();
        token.cancel();
        let err = pipeline.run_cancellable(points.view(), &token).unwrap_err();
        assert_eq!(err.code(), "CANCELLED");
    }

    #[test]
    fn test_standardize_columns() {
        let points = array![[0.0, 100.0], [2.0, 100.0], [4.0, 100.0]];
        let scaled = standardize_points(points.view());

        // First column: mean 2, population std sqrt(8/3).
        let std = (8.0f64 / 3.0).sqrt();
        assert!((scaled[[0, 0]] + 2.0 / std).abs() < 1e-12);
        assert!((scaled[[1, 0]]).abs() < 1e-12);
        assert!((scaled[[2, 0]] - 2.0 / std).abs() < 1e-12);

        // Constant column is centered, not divided.
        assert_eq!(scaled.column(1), ndarray::array![0.0, 0.0, 0.0]);
    }
}
