//! Singly-linked structures for the service window and the sales log.
//!
//! Both containers keep their nodes in a slab arena and chain them by
//! slot index, so all rewiring happens in safe code and released nodes
//! are recycled instead of churning the allocator.

mod list;
mod queue;
mod slots;

pub use list::*;
pub use queue::*;
