//! Persistent Homology
//!
//! Two reductions over the filtered complex:
//!
//! - `h0`: sorted-edge union-find over the 1-skeleton. Components are
//!   born at their vertex filtration values; each merge event pairs the
//!   later-born component with the merging edge.
//!
//! - `h1`: left-to-right boundary-matrix column reduction over Z/2 on the
//!   2-skeleton. Each triangle column that acquires a fresh pivot pairs
//!   its pivot edge (the cycle's birth) with the triangle (its death).
//!
//! Both outputs are deterministic functions of the input: sorting uses
//! lexicographic secondary keys, and pairs with death == birth are
//! suppressed.
//!
//! ## Reference
//!
//! Edelsbrunner, Letscher, Zomorodian (2002). "Topological Persistence
//! and Simplification". Discrete & Computational Geometry.

mod diagram;
mod h0;
mod h1;

pub use diagram::{PersistenceDiagram, PersistencePair};
pub use h0::persistence_h0;
pub use h1::persistence_h1;
