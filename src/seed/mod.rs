//! Sample records and fixture loading for the dashboard demos.
//!
//! The record shapes mirror what the back office tracks: clients,
//! window tickets, sales, sites and delivery routes. A bundled JSON
//! fixture ships inside the binary, and any file with the same shape
//! can be substituted from the command line.

mod loader;
mod records;

pub use loader::*;
pub use records::*;
