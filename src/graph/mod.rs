//! Directed graph for the delivery route network.
//!
//! The structure itself lives in `digraph` with its adjacency-list
//! storage and handle bookkeeping, while `traversal` adds the
//! breadth-first path finder and the depth-first and breadth-first
//! walks on top of it.

mod digraph;
mod traversal;
mod vertex;

pub use digraph::*;
pub use vertex::*;
