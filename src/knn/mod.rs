//! k-Nearest-Neighbor Search and Radius Queries
//!
//! Brute-force all-pairs Euclidean search over a dense point cloud. This
//! is the leaf of the pipeline: everything downstream (density filtration,
//! complex construction, feature membership) is derived from the neighbor
//! structure computed here.
//!
//! The observable results are independent of parallelization strategy:
//! every query row is determined solely by the input, with ties on
//! distance broken by ascending point index.

mod brute;
mod radius;

pub use brute::{knn, KnnResult};
pub use radius::radius_query;
