//! Graph construction and representation
//!
//! [`GraphStore`] is built incrementally from link records; [`CsrGraph`] is
//! the frozen view the rank engine iterates over.

pub mod builder;
pub mod csr;

pub use builder::{GraphNode, GraphStore};
pub use csr::CsrGraph;
