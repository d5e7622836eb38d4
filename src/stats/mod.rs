//! Usage statistics for a dashboard session.
//!
//! Counts mutations, lookups and snapshot rows across all structures,
//! and prints one summary line at the end of a run.

mod stats;
pub use stats::*;
