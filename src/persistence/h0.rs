//! H0 Persistence via Sorted-Edge Union-Find
//!
//! Components are born at their vertex filtration values. Processing
//! edges in (filt, src, dst) order, each merge of two distinct components
//! kills the one with the later birth; the survivor keeps the earlier
//! birth. A merge whose dying birth equals the edge filtration is a
//! zero-persistence event and is suppressed. Components that never merge
//! are essential classes and produce no output.
//!
//! The union-find is an arena of (parent, rank, birth) arrays indexed by
//! vertex id, with path halving inside `find` and union by rank.

use ndarray::ArrayView1;

use crate::cancel::CancelToken;
use crate::complex::Edge;
use crate::error::Result;
use crate::persistence::PersistencePair;

struct UnionFind {
    parent: Vec<u32>,
    rank: Vec<u8>,
    birth: Vec<f64>,
}

impl UnionFind {
    fn new(vertex_filt: ArrayView1<f64>) -> Self {
        let n = vertex_filt.len();
        Self {
            parent: (0..n as u32).collect(),
            rank: vec![0; n],
            birth: vertex_filt.to_vec(),
        }
    }

    /// Root of `x` with path halving.
    fn find(&mut self, mut x: u32) -> u32 {
        while self.parent[x as usize] != x {
            let grandparent = self.parent[self.parent[x as usize] as usize];
            self.parent[x as usize] = grandparent;
            x = grandparent;
        }
        x
    }

    /// Union by rank; the new root carries the surviving (earlier) birth.
    fn union(&mut self, ru: u32, rv: u32, surviving_birth: f64) {
        let root = if self.rank[ru as usize] < self.rank[rv as usize] {
            self.parent[ru as usize] = rv;
            rv
        } else if self.rank[ru as usize] > self.rank[rv as usize] {
            self.parent[rv as usize] = ru;
            ru
        } else {
            self.parent[rv as usize] = ru;
            self.rank[ru as usize] += 1;
            ru
        };
        self.birth[root as usize] = surviving_birth;
    }
}

/// Reduce the 1-skeleton to finite H0 (birth, death) pairs, one per
/// merge event with `birth < death`, in merge order.
pub fn persistence_h0(
    vertex_filt: ArrayView1<f64>,
    edges: &[Edge],
    cancel: &CancelToken,
) -> Result<Vec<PersistencePair>> {
    cancel.checkpoint()?;

    let mut order: Vec<usize> = (0..edges.len()).collect();
    order.sort_unstable_by(|&a, &b| {
        edges[a]
            .filt
            .total_cmp(&edges[b].filt)
            .then(edges[a].src.cmp(&edges[b].src))
            .then(edges[a].dst.cmp(&edges[b].dst))
    });

    cancel.checkpoint()?;

    let mut uf = UnionFind::new(vertex_filt);
    let mut pairs = Vec::new();

    for &e in &order {
        let edge = edges[e];
        let ru = uf.find(edge.src as u32);
        let rv = uf.find(edge.dst as u32);
        if ru == rv {
            continue;
        }

        // The component with the later (larger) birth dies.
        let birth_u = uf.birth[ru as usize];
        let birth_v = uf.birth[rv as usize];
        let dying_birth = birth_u.max(birth_v);
        let surviving_birth = birth_u.min(birth_v);

        if dying_birth < edge.filt {
            pairs.push(PersistencePair::new(dying_birth, edge.filt));
        }
        uf.union(ru, rv, surviving_birth);
    }

    tracing::debug!(n_pairs = pairs.len(), "H0 reduction complete");
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn edge(src: i32, dst: i32, filt: f64) -> Edge {
        Edge { src, dst, filt }
    }

    #[test]
    fn test_single_merge() {
        // Component 1 born later (-2); dies when the edge at -1 joins it.
        let filt = array![-5.0, -2.0];
        let edges = vec![edge(0, 1, -1.0)];
        let pairs = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], PersistencePair::new(-2.0, -1.0));
    }

    #[test]
    fn test_equal_filtration_merge_suppressed() {
        let filt = array![-1.0, -1.0];
        let edges = vec![edge(0, 1, -1.0)];
        let pairs = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_empty_edge_set() {
        let filt = array![-1.0, -2.0, -3.0, -4.0, -5.0];
        let pairs = persistence_h0(filt.view(), &[], &CancelToken::new()).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn test_finite_pair_count_bound() {
        // A chain of merges: at most n - 1 finite pairs; the survivor of
        // each merge keeps the earlier birth.
        let filt = array![-10.0, -8.0, -6.0, -4.0];
        let edges = vec![edge(0, 1, -7.0), edge(1, 2, -5.0), edge(2, 3, -1.0)];
        let pairs = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();

        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs[0], PersistencePair::new(-8.0, -7.0));
        assert_eq!(pairs[1], PersistencePair::new(-6.0, -5.0));
        assert_eq!(pairs[2], PersistencePair::new(-4.0, -1.0));
    }

    #[test]
    fn test_elder_birth_survives_through_merges() {
        // Two components, each with internal structure, merged last: the
        // dying birth is the younger component's oldest vertex.
        let filt = array![-10.0, -9.0, -7.0, -6.0];
        let edges = vec![
            edge(0, 1, -9.0), // zero persistence, suppressed
            edge(2, 3, -6.0), // zero persistence, suppressed
            edge(1, 2, -2.0), // (-7, -2): component {2,3} born at -7 dies
        ];
        let pairs = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();

        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0], PersistencePair::new(-7.0, -2.0));
    }

    #[test]
    fn test_redundant_edges_skipped() {
        let filt = array![-3.0, -2.0, -1.0];
        let edges = vec![
            edge(0, 1, -1.5),
            edge(1, 2, -0.5),
            edge(0, 2, -0.1), // same component by now, no event
        ];
        let pairs = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], PersistencePair::new(-2.0, -1.5));
        assert_eq!(pairs[1], PersistencePair::new(-1.0, -0.5));
    }

    #[test]
    fn test_deterministic_under_tied_filtrations() {
        // All edges tie on filt; the (src, dst) secondary key fixes the
        // merge order and therefore the output sequence.
        let filt = array![-4.0, -3.0, -2.0, -1.0];
        let mut edges = vec![
            edge(2, 3, -0.5),
            edge(0, 1, -0.5),
            edge(1, 2, -0.5),
        ];
        let a = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();
        edges.reverse();
        let b = persistence_h0(filt.view(), &edges, &CancelToken::new()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
        // Sorted order: (0,1) then (1,2) then (2,3).
        assert_eq!(a[0], PersistencePair::new(-3.0, -0.5));
        assert_eq!(a[1], PersistencePair::new(-2.0, -0.5));
        assert_eq!(a[2], PersistencePair::new(-1.0, -0.5));
    }

    #[test]
    fn test_cancelled_before_reduction() {
        let token = CancelToken::new();
        token.cancel();
        let filt = array![-1.0, -2.0];
        let edges = vec![edge(0, 1, -0.5)];
        assert!(persistence_h0(filt.view(), &edges, &token).is_err());
    }
}
