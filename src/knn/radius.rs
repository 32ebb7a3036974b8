//! Inclusive Radius Queries
//!
//! Used by feature extraction to enumerate the members of a significant
//! persistence pair. A brute-force scan over the point cloud is the
//! reference implementation; comparisons are on squared distances so the
//! boundary case (a point at exactly `radius`) is decided without a
//! square root.

use ndarray::{ArrayView1, ArrayView2};
use rayon::prelude::*;

use crate::error::{Result, TopoError};

/// All indices whose Euclidean distance to `center` is ≤ `radius`,
/// ascending. Ties at exactly `radius` are included.
pub fn radius_query(
    points: ArrayView2<f64>,
    center: ArrayView1<f64>,
    radius: f64,
) -> Result<Vec<i32>> {
    let (n, d) = points.dim();
    if n == 0 || d == 0 {
        return Err(TopoError::InvalidArgument(format!(
            "point matrix must be non-empty, got shape ({n}, {d})"
        )));
    }
    if center.len() != d {
        return Err(TopoError::InvalidArgument(format!(
            "query point has dimension {}, expected {d}",
            center.len()
        )));
    }
    if !radius.is_finite() || radius < 0.0 {
        return Err(TopoError::InvalidArgument(format!(
            "radius must be finite and non-negative, got {radius}"
        )));
    }

    let radius_sq = radius * radius;
    let members: Vec<i32> = (0..n)
        .into_par_iter()
        .filter_map(|i| {
            let dist_sq: f64 = points
                .row(i)
                .iter()
                .zip(center.iter())
                .map(|(p, q)| {
                    let diff = p - q;
                    diff * diff
                })
                .sum();
            (dist_sq <= radius_sq).then_some(i as i32)
        })
        .collect();

    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_boundary_point_included() {
        let points = array![[0.0, 0.0], [1.0, 0.0], [0.0, 2.0]];
        let center = array![0.0, 0.0];
        let members = radius_query(points.view(), center.view(), 1.0).unwrap();
        assert_eq!(members, vec![0, 1]);
    }

    #[test]
    fn test_empty_result() {
        let points = array![[10.0, 10.0]];
        let center = array![0.0, 0.0];
        let members = radius_query(points.view(), center.view(), 0.1).unwrap();
        assert!(members.is_empty());
    }

    #[test]
    fn test_all_match() {
        let points = Array2::<f64>::zeros((5, 2));
        let center = array![0.0, 0.0];
        let members = radius_query(points.view(), center.view(), 1.0).unwrap();
        assert_eq!(members, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let points = array![[0.0, 0.0]];
        let center = array![0.0, 0.0, 0.0];
        assert!(radius_query(points.view(), center.view(), 1.0).is_err());
    }

    #[test]
    fn test_negative_radius_rejected() {
        let points = array![[0.0]];
        let center = array![0.0];
        assert!(radius_query(points.view(), center.view(), -1.0).is_err());
        assert!(radius_query(points.view(), center.view(), f64::NAN).is_err());
    }
}
