//! H1 Persistence via Z/2 Boundary-Matrix Reduction
//!
//! Rows are edges in (filt, src, dst) order; columns are triangles in
//! (filt, v0, v1, v2) order. Each column stores the rows of its three
//! boundary edges in descending order, so the pivot (the lowest non-zero
//! entry in matrix terms) is the first element. Columns are reduced left
//! to right: while the current column's pivot is already owned, the
//! column is replaced by its symmetric difference with the owner — a
//! linear merge of two descending lists over Z/2. A column that acquires
//! a fresh pivot pairs its pivot edge (birth) with its triangle (death);
//! pairs with death == birth are suppressed.
//!
//! Columns are owned vectors; replacement is a move. Paired columns stay
//! live only as reduction operands in the owner map, and columns that
//! reduce to zero are dropped immediately.

use std::collections::HashMap;

use crate::cancel::CancelToken;
use crate::complex::{Edge, Triangle};
use crate::error::{Result, TopoError};
use crate::persistence::PersistencePair;

/// Symmetric difference of two descending row lists (XOR over Z/2).
fn xor_descending(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Greater => {
                out.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Less => {
                out.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    out.extend_from_slice(&a[i..]);
    out.extend_from_slice(&b[j..]);
    out
}

/// Reduce the 2-skeleton to finite H1 (birth, death) pairs.
///
/// Every triangle's three edges must be present in `edges`; a missing
/// edge is an invariant violation surfaced as `Internal`.
pub fn persistence_h1(
    edges: &[Edge],
    triangles: &[Triangle],
    cancel: &CancelToken,
) -> Result<Vec<PersistencePair>> {
    cancel.checkpoint()?;
    if triangles.is_empty() {
        return Ok(Vec::new());
    }

    // Edge rows in filtration order.
    let mut edge_order: Vec<usize> = (0..edges.len()).collect();
    edge_order.sort_unstable_by(|&a, &b| {
        edges[a]
            .filt
            .total_cmp(&edges[b].filt)
            .then(edges[a].src.cmp(&edges[b].src))
            .then(edges[a].dst.cmp(&edges[b].dst))
    });
    let mut edge_row: HashMap<(i32, i32), u32> = HashMap::with_capacity(edges.len());
    let mut row_filt: Vec<f64> = Vec::with_capacity(edges.len());
    for (row, &e) in edge_order.iter().enumerate() {
        edge_row.insert((edges[e].src, edges[e].dst), row as u32);
        row_filt.push(edges[e].filt);
    }

    // Triangle columns in filtration order.
    let mut tri_order: Vec<usize> = (0..triangles.len()).collect();
    tri_order.sort_unstable_by(|&a, &b| {
        triangles[a]
            .filt
            .total_cmp(&triangles[b].filt)
            .then(triangles[a].v0.cmp(&triangles[b].v0))
            .then(triangles[a].v1.cmp(&triangles[b].v1))
            .then(triangles[a].v2.cmp(&triangles[b].v2))
    });

    cancel.checkpoint()?;

    let row_of = |u: i32, v: i32| -> Result<u32> {
        edge_row.get(&(u, v)).copied().ok_or_else(|| {
            TopoError::Internal(format!("triangle edge ({u}, {v}) missing from edge set"))
        })
    };

    let mut owners: HashMap<u32, Vec<u32>> = HashMap::new();
    let mut pairs = Vec::new();

    for &t in &tri_order {
        let tri = triangles[t];
        let mut column = vec![
            row_of(tri.v0, tri.v1)?,
            row_of(tri.v0, tri.v2)?,
            row_of(tri.v1, tri.v2)?,
        ];
        column.sort_unstable_by(|a, b| b.cmp(a));

        loop {
            let Some(&pivot) = column.first() else {
                break; // boundary is a sum of earlier columns
            };
            match owners.get(&pivot) {
                Some(owner) => column = xor_descending(&column, owner),
                None => {
                    let birth = row_filt[pivot as usize];
                    if birth < tri.filt {
                        pairs.push(PersistencePair::new(birth, tri.filt));
                    }
                    owners.insert(pivot, column);
                    break;
                }
            }
        }
    }

    tracing::debug!(n_pairs = pairs.len(), "H1 reduction complete");
    Ok(pairs)
}
