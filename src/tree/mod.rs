//! Balanced search tree backing the client registry.

mod avl;
pub use avl::*;
