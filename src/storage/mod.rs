//! Graph storage layer
//!
//! CSR representation, edge-list text loader, binary sidecar cache and the
//! cache-first loader that ties them together.

pub mod cache;
pub mod csr;
pub mod loader;
pub mod text;

pub use cache::CacheError;
pub use csr::{CsrGraph, NodeId};
pub use loader::{cache_path_for, load_graph, LoadSource, LoadedGraph};
