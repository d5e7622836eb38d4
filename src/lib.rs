pub mod graph;
pub mod links;
pub mod seed;
pub mod stats;
pub mod tree;
