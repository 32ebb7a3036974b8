//! Brute-Force k-Nearest-Neighbor Search
//!
//! For each query point the k smallest (distance, index) pairs with
//! index ≠ query are maintained in a bounded max-heap over squared
//! distances; the square root is taken once per retained neighbor.
//!
//! ## Ordering
//!
//! Within a row, neighbors are strictly ascending by distance with ties
//! broken by ascending index, so the result is a function of the input
//! alone regardless of how queries are scheduled across worker threads.

use ndarray::{Array2, ArrayView2};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, TopoError};

/// Output of a kNN computation: row i holds the k nearest neighbors of
/// point i, self excluded, sorted ascending by (distance, index).
#[derive(Debug, Clone)]
pub struct KnnResult {
    /// Euclidean distances, shape (n, k), each row non-decreasing.
    pub distances: Array2<f64>,
    /// Neighbor indices, shape (n, k), `indices[[i, j]] != i`.
    pub indices: Array2<i32>,
}

impl KnnResult {
    /// Distance to the kth (last) neighbor for each point.
    pub fn kth_distances(&self) -> ndarray::Array1<f64> {
        let k = self.distances.ncols();
        self.distances.column(k - 1).to_owned()
    }
}

/// Candidate neighbor ordered by (squared distance, index); the heap
/// maximum is the current worst retained candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Neighbor {
    dist_sq: f64,
    index: u32,
}

impl Eq for Neighbor {}

impl PartialOrd for Neighbor {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Neighbor {
    fn cmp(&self, other: &Self) -> Ordering {
        self.dist_sq
            .total_cmp(&other.dist_sq)
            .then(self.index.cmp(&other.index))
    }
}

fn validate(points: &ArrayView2<f64>, k: usize) -> Result<()> {
    let (n, d) = points.dim();
    if n == 0 || d == 0 {
        return Err(TopoError::InvalidArgument(format!(
            "point matrix must be non-empty, got shape ({n}, {d})"
        )));
    }
    if k == 0 {
        return Err(TopoError::InvalidArgument("k must be positive".into()));
    }
    if k >= n {
        return Err(TopoError::InvalidArgument(format!(
            "k = {k} must be smaller than the number of points n = {n}"
        )));
    }
    if n > i32::MAX as usize {
        return Err(TopoError::InvalidArgument(format!(
            "n = {n} exceeds the i32 neighbor-index range"
        )));
    }
    if points.iter().any(|v| !v.is_finite()) {
        return Err(TopoError::InvalidArgument(
            "point matrix contains non-finite values".into(),
        ));
    }
    // The (n, k) output pair must be addressable on the host.
    let cells = n
        .checked_mul(k)
        .and_then(|c| c.checked_mul(std::mem::size_of::<f64>()))
        .ok_or_else(|| {
            TopoError::OutOfMemory(format!("neighbor arrays of shape ({n}, {k}) overflow"))
        })?;
    if cells > isize::MAX as usize {
        return Err(TopoError::OutOfMemory(format!(
            "neighbor arrays of shape ({n}, {k}) exceed addressable memory"
        )));
    }
    Ok(())
}

/// Squared Euclidean distance between two rows, accumulated in f64.
#[inline]
fn dist_sq(a: ndarray::ArrayView1<f64>, b: ndarray::ArrayView1<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = x - y;
            diff * diff
        })
        .sum()
}

/// The k smallest (distance, index) pairs for query row `i`, ascending.
fn neighbors_of(points: &ArrayView2<f64>, i: usize, k: usize) -> Vec<Neighbor> {
    let n = points.nrows();
    let query = points.row(i);

    let mut heap: BinaryHeap<Neighbor> = BinaryHeap::with_capacity(k + 1);
    for j in 0..n {
        if j == i {
            continue;
        }
        let candidate = Neighbor {
            dist_sq: dist_sq(query, points.row(j)),
            index: j as u32,
        };
        if heap.len() < k {
            heap.push(candidate);
        } else if heap.peek().is_some_and(|worst| candidate < *worst) {
            heap.push(candidate);
            heap.pop();
        }
    }
    heap.into_sorted_vec()
}

/// Compute the k nearest neighbors of every point, excluding self.
///
/// Fails with `InvalidArgument` when the matrix is empty, contains
/// non-finite values, or `k` is not in `1..n`.
pub fn knn(points: ArrayView2<f64>, k: usize) -> Result<KnnResult> {
    validate(&points, k)?;
    let (n, d) = points.dim();
    tracing::debug!(n, d, k, "computing brute-force kNN");

    let rows: Vec<Vec<Neighbor>> = (0..n)
        .into_par_iter()
        .map(|i| neighbors_of(&points, i, k))
        .collect();

    let mut distances = Array2::<f64>::zeros((n, k));
    let mut indices = Array2::<i32>::zeros((n, k));
    for (i, row) in rows.into_iter().enumerate() {
        for (r, neighbor) in row.into_iter().enumerate() {
            distances[[i, r]] = neighbor.dist_sq.sqrt();
            indices[[i, r]] = neighbor.index as i32;
        }
    }

    Ok(KnnResult { distances, indices })
}
