//! Density Filtration
//!
//! Converts kth-neighbor distances into per-point filtration values:
//!
//!   F[i] = −1 / max(kth[i], ε)
//!
//! The kth-neighbor distance is a density proxy (density ≈ 1 / kth), and
//! the negation converts the "higher density ⇒ earlier birth"
//! superlevel-set problem into a sublevel-set filtration usable by
//! standard persistence machinery. The ε clamp prevents division blow-up
//! when input points coincide.

use ndarray::{Array1, ArrayView1};

/// Map kth-neighbor distances to superlevel-set filtration values.
///
/// Monotone: a ≤ b implies F(a) ≤ F(b) ≤ 0, with every value below
/// `epsilon` clamped to F(epsilon).
pub fn density_filtration(kth_distances: ArrayView1<f64>, epsilon: f64) -> Array1<f64> {
    kth_distances.mapv(|d| -1.0 / d.max(epsilon))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    const EPS: f64 = 1e-10;

    #[test]
    fn test_basic_mapping() {
        let kth = array![1.0, 2.0, 0.5, 4.0];
        let filt = density_filtration(kth.view(), EPS);
        assert_eq!(filt, array![-1.0, -0.5, -2.0, -0.25]);
    }

    #[test]
    fn test_clamp_avoids_division_by_zero() {
        let kth = array![0.0, 1e-15, 1.0];
        let filt = density_filtration(kth.view(), EPS);
        assert!(filt.iter().all(|v| v.is_finite()));
        assert_eq!(filt[0], -1.0 / EPS);
        assert_eq!(filt[1], -1.0 / EPS);
    }

    #[test]
    fn test_monotone_and_nonpositive() {
        let kth = array![0.1, 0.2, 0.3, 5.0, 100.0];
        let filt = density_filtration(kth.view(), EPS);
        for w in filt.as_slice().unwrap().windows(2) {
            assert!(w[0] <= w[1]);
        }
        assert!(filt.iter().all(|&v| v < 0.0));
    }
}
