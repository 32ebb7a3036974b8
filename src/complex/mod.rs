//! Filtered Complex Construction
//!
//! Builds the simplicial input to persistence from the kNN graph and the
//! per-point filtration: a vertex filtration vector, a deduplicated
//! undirected edge list, and (for H1) the list of all triangles closed in
//! the edge set.

mod builder;

pub use builder::{build_complex, Edge, FilteredComplex, Triangle};
