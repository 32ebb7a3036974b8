//! Persistence Diagram Containers
//!
//! A [`PersistencePair`] marks the filtration values at which a feature
//! appears and is filled in. Diagrams hold finite pairs only — essential
//! classes are suppressed at the source — so every stored pair satisfies
//! `death > birth`.

use serde::{Deserialize, Serialize};

/// A finite (birth, death) pair in filtration scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PersistencePair {
    pub birth: f64,
    pub death: f64,
}

impl PersistencePair {
    pub fn new(birth: f64, death: f64) -> Self {
        Self { birth, death }
    }

    /// Lifetime of the feature.
    pub fn lifetime(&self) -> f64 {
        self.death - self.birth
    }

    /// View in the positive density scale: the filtration is F = −1/kth,
    /// so a filtration-scale pair (b, d) corresponds to the density
    /// interval (−d, −b).
    pub fn density_scale(&self) -> (f64, f64) {
        (-self.death, -self.birth)
    }
}

/// Persistence diagrams for homology dimensions 0 and 1.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersistenceDiagram {
    pub h0: Vec<PersistencePair>,
    pub h1: Vec<PersistencePair>,
}

impl PersistenceDiagram {
    /// Pairs for dimension `dim` (0 or 1).
    pub fn dim(&self, dim: usize) -> &[PersistencePair] {
        match dim {
            0 => &self.h0,
            _ => &self.h1,
        }
    }

    /// Number of pairs in dimension `dim`.
    pub fn count(&self, dim: usize) -> usize {
        self.dim(dim).len()
    }

    /// Lifetimes (death − birth) in dimension `dim`.
    pub fn lifetimes(&self, dim: usize) -> Vec<f64> {
        self.dim(dim).iter().map(|p| p.lifetime()).collect()
    }

    /// Longest lifetime in dimension `dim`, 0 when empty.
    pub fn max_lifetime(&self, dim: usize) -> f64 {
        self.dim(dim)
            .iter()
            .map(|p| p.lifetime())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifetime_and_density_scale() {
        let pair = PersistencePair::new(-10.0, -4.0);
        assert_eq!(pair.lifetime(), 6.0);
        assert_eq!(pair.density_scale(), (4.0, 10.0));
    }

    #[test]
    fn test_diagram_accessors() {
        let diagram = PersistenceDiagram {
            h0: vec![PersistencePair::new(-5.0, -1.0), PersistencePair::new(-3.0, -2.0)],
            h1: vec![],
        };
        assert_eq!(diagram.count(0), 2);
        assert_eq!(diagram.count(1), 0);
        assert_eq!(diagram.lifetimes(0), vec![4.0, 1.0]);
        assert_eq!(diagram.max_lifetime(0), 4.0);
        assert_eq!(diagram.max_lifetime(1), 0.0);
    }
}
