//! Pipeline Configuration
//!
//! The recognized options are exactly: `k` (neighbors for density
//! estimation, default 32), `sigma` (significance threshold in standard
//! deviations, default 3.0), `accelerator` (tri-state device policy,
//! default [`AcceleratorMode::Auto`]) and `epsilon_density` (clamp for the
//! density inversion, default 1e-10). No other tunable is part of the
//! contract.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TopoError};

/// Device selection policy, evaluated once at pipeline construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AcceleratorMode {
    /// Use an accelerator if one is present, otherwise fall back to host.
    Auto,
    /// Fail with `AcceleratorUnavailable` when no device is present.
    Required,
    /// Host computation only.
    Off,
}

impl Default for AcceleratorMode {
    fn default() -> Self {
        Self::Auto
    }
}

/// Configuration for a pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Number of nearest neighbors for density estimation.
    pub k: usize,
    /// Significance threshold: lifetime > mean + sigma · stddev.
    pub sigma: f64,
    /// Device selection policy.
    pub accelerator: AcceleratorMode,
    /// Clamp applied to kth-neighbor distances before inversion.
    pub epsilon_density: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            k: 32,
            sigma: 3.0,
            accelerator: AcceleratorMode::Auto,
            epsilon_density: 1e-10,
        }
    }
}

impl PipelineConfig {
    /// Default configuration with a custom neighbor count.
    pub fn with_k(k: usize) -> Self {
        Self { k, ..Self::default() }
    }

    /// Set the significance threshold.
    pub fn sigma(mut self, sigma: f64) -> Self {
        self.sigma = sigma;
        self
    }

    /// Set the accelerator policy.
    pub fn accelerator(mut self, mode: AcceleratorMode) -> Self {
        self.accelerator = mode;
        self
    }

    /// Check option-level invariants. Shape-dependent checks (k < n)
    /// happen when the pipeline sees the point cloud.
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(TopoError::InvalidArgument("k must be positive".into()));
        }
        if !(self.sigma > 0.0 && self.sigma.is_finite()) {
            return Err(TopoError::InvalidArgument(format!(
                "sigma must be a positive real, got {}",
                self.sigma
            )));
        }
        if !(self.epsilon_density > 0.0 && self.epsilon_density.is_finite()) {
            return Err(TopoError::InvalidArgument(format!(
                "epsilon_density must be a positive real, got {}",
                self.epsilon_density
            )));
        }
        Ok(())
    }
}
