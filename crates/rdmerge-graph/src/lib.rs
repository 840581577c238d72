//! Dependency graph of resource dictionaries.
//!
//! Discovery (in `rdmerge-core`) registers one [`ResourceDocument`] per
//! dictionary file into a [`DependencyGraph`]; this crate owns the ordering:
//! a generic depth-first [`topological_sort`] that emits dependencies before
//! dependents, detects cycles explicitly, and keeps ties in insertion order
//! so repeated runs stay byte-stable.

pub mod error;
pub mod graph;
pub mod node;
pub mod sorter;

pub use error::{GraphError, GraphResult};
pub use graph::DependencyGraph;
pub use node::ResourceDocument;
pub use sorter::{topological_sort, SortError};
