//! Complex Builder: kNN Graph to Filtered Simplices
//!
//! ## Upper-star filtration
//!
//! Every simplex inherits the latest filtration value among its vertices:
//! an edge (i, j) appears at max(F[i], F[j]), a triangle at the maximum of
//! its three edges. Faces therefore always precede cofaces.
//!
//! ## Enumeration
//!
//! Each directed neighbor pair (i → j) contributes one undirected edge
//! keyed on (min, max); duplicates are dropped by keyed deduplication.
//! Triangles are found by scanning each vertex's neighbor list for pairs
//! (j, c) with i < j < c and testing the closing edge (j, c) against a
//! hashed edge lookup — bounded by neighbor-list sizes, not an O(n³) scan.

use ndarray::{Array1, Array2};
use std::collections::HashMap;

use crate::error::{Result, TopoError};

/// Undirected edge with `src < dst` and upper-star filtration value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub src: i32,
    pub dst: i32,
    pub filt: f64,
}

/// Triangle with sorted vertices `v0 < v1 < v2` and the maximum of its
/// three edge filtration values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: i32,
    pub v1: i32,
    pub v2: i32,
    pub filt: f64,
}

/// Simplicial input to the persistence computations. Owns its simplex
/// lists; destroyed once persistence pairs have been extracted.
#[derive(Debug, Clone)]
pub struct FilteredComplex {
    /// Per-vertex filtration values.
    pub vertex_filt: Array1<f64>,
    /// Deduplicated undirected edges.
    pub edges: Vec<Edge>,
    /// All triangles closed in the edge set (empty when `max_dim` = 0).
    pub triangles: Vec<Triangle>,
}

/// Build the filtered complex from kNN indices and vertex filtration.
///
/// `max_dim` = 0 builds the 1-skeleton only; `max_dim` ≥ 1 also
/// enumerates triangles. Neighbor indices must lie in `[0, n)` and never
/// equal their own row index.
pub fn build_complex(
    indices: &Array2<i32>,
    vertex_filt: &Array1<f64>,
    max_dim: usize,
) -> Result<FilteredComplex> {
    let (n, k) = indices.dim();
    if vertex_filt.len() != n {
        return Err(TopoError::InvalidArgument(format!(
            "filtration length {} does not match {} neighbor rows",
            vertex_filt.len(),
            n
        )));
    }

    // Keyed deduplication: both (i → j) and (j → i) resolve to (min, max).
    let mut edge_filt: HashMap<(u32, u32), f64> = HashMap::with_capacity(n * k);
    let mut edges: Vec<Edge> = Vec::with_capacity(n * k);
    for i in 0..n {
        for r in 0..k {
            let j = indices[[i, r]];
            if j < 0 || j as usize >= n {
                return Err(TopoError::InvalidArgument(format!(
                    "neighbor index {j} out of range for {n} points"
                )));
            }
            let j = j as usize;
            if j == i {
                return Err(TopoError::InvalidArgument(format!(
                    "neighbor row {i} refers to itself"
                )));
            }
            let key = (i.min(j) as u32, i.max(j) as u32);
            if let std::collections::hash_map::Entry::Vacant(entry) = edge_filt.entry(key) {
                let filt = vertex_filt[i].max(vertex_filt[j]);
                entry.insert(filt);
                edges.push(Edge {
                    src: key.0 as i32,
                    dst: key.1 as i32,
                    filt,
                });
            }
        }
    }

    let triangles = if max_dim >= 1 {
        find_triangles(n, &edges, &edge_filt)
    } else {
        Vec::new()
    };

    tracing::debug!(
        n_vertices = n,
        n_edges = edges.len(),
        n_triangles = triangles.len(),
        "built filtered complex"
    );

    Ok(FilteredComplex {
        vertex_filt: vertex_filt.clone(),
        edges,
        triangles,
    })
}

/// Enumerate all triangles closed in the undirected edge set.
fn find_triangles(
    n: usize,
    edges: &[Edge],
    edge_filt: &HashMap<(u32, u32), f64>,
) -> Vec<Triangle> {
    // Ascending adjacency lists give deterministic enumeration order.
    let mut adjacency: Vec<Vec<u32>> = vec![Vec::new(); n];
    for edge in edges {
        adjacency[edge.src as usize].push(edge.dst as u32);
        adjacency[edge.dst as usize].push(edge.src as u32);
    }
    for list in &mut adjacency {
        list.sort_unstable();
    }

    let mut triangles = Vec::new();
    for i in 0..n as u32 {
        let neighbors = &adjacency[i as usize];
        for (a, &j) in neighbors.iter().enumerate() {
            if j <= i {
                continue;
            }
            for &c in &neighbors[a + 1..] {
                // neighbors is ascending, so c > j here.
                if let Some(&closing) = edge_filt.get(&(j, c)) {
                    let filt = edge_filt[&(i, j)].max(edge_filt[&(i, c)]).max(closing);
                    triangles.push(Triangle {
                        v0: i as i32,
                        v1: j as i32,
                        v2: c as i32,
                        filt,
                    });
                }
            }
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_dedup_and_upper_star() {
        // Two points referencing each other: one undirected edge.
        let indices = array![[1], [0]];
        let filt = array![-5.0, -2.0];
        let complex = build_complex(&indices, &filt, 1).unwrap();

        assert_eq!(complex.edges.len(), 1);
        let edge = complex.edges[0];
        assert_eq!((edge.src, edge.dst), (0, 1));
        assert_eq!(edge.filt, -2.0);
        assert!(complex.triangles.is_empty());
    }

    #[test]
    fn test_triangle_closure() {
        // 3-cycle in the neighbor graph closes one triangle.
        let indices = array![[1], [2], [0]];
        let filt = array![-3.0, -2.0, -1.0];
        let complex = build_complex(&indices, &filt, 1).unwrap();

        assert_eq!(complex.edges.len(), 3);
        assert_eq!(complex.triangles.len(), 1);
        let tri = complex.triangles[0];
        assert_eq!((tri.v0, tri.v1, tri.v2), (0, 1, 2));
        assert_eq!(tri.filt, -1.0);
    }

    #[test]
    fn test_square_has_no_triangles() {
        // 4-cycle without diagonals: closure test fails everywhere.
        let indices = array![[1, 3], [0, 2], [1, 3], [2, 0]];
        let filt = array![-1.0, -1.0, -1.0, -1.0];
        let complex = build_complex(&indices, &filt, 1).unwrap();

        assert_eq!(complex.edges.len(), 4);
        assert!(complex.triangles.is_empty());
    }

    #[test]
    fn test_skeleton_only() {
        let indices = array![[1], [2], [0]];
        let filt = array![0.0, 0.0, 0.0];
        let complex = build_complex(&indices, &filt, 0).unwrap();
        assert_eq!(complex.edges.len(), 3);
        assert!(complex.triangles.is_empty());
    }

    #[test]
    fn test_triangle_filt_is_max_of_edges() {
        // Closing edge carries the latest filtration value.
        let indices = array![[1, 2], [0, 2], [0, 1]];
        let filt = array![-9.0, -4.0, -7.0];
        let complex = build_complex(&indices, &filt, 1).unwrap();

        assert_eq!(complex.triangles.len(), 1);
        // Edges: (0,1) = -4, (0,2) = -7, (1,2) = -4.
        assert_eq!(complex.triangles[0].filt, -4.0);
    }

    #[test]
    fn test_rejects_bad_indices() {
        let filt = array![0.0, 0.0];
        assert!(build_complex(&array![[5], [0]], &filt, 0).is_err());
        assert!(build_complex(&array![[0], [0]], &filt, 0).is_err());
        assert!(build_complex(&array![[-1], [0]], &filt, 0).is_err());
    }
}
