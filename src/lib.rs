//! neuronet: CSR graph engine for large edge-list datasets
//!
//! # Overview
//!
//! neuronet turns an edge-list text file (SNAP style, `#` comment header) into
//! a Compressed Sparse Row graph, keeps a binary sidecar cache next to the
//! source so later loads skip parsing, and answers two queries: the node with
//! the highest out-degree and a depth-bounded BFS that reports visited edges.
//!
//! # Quick Start
//!
//! ```no_run
//! use neuronet::{bfs_edges, critical_node, load_graph, LoadConfig, NodeId};
//!
//! # fn example() -> anyhow::Result<()> {
//! // First call parses the text and writes roadNet-CA.txt.bin,
//! // later calls decode the cache instead
//! let loaded = load_graph("roadNet-CA.txt", &LoadConfig::default())?;
//! let graph = loaded.graph;
//!
//! let hub = critical_node(&graph).unwrap_or(NodeId(0));
//! let edges = bfs_edges(&graph, hub, 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Storage**: immutable CSR arrays (`row_offsets`, `col_indices`)
//! - **Ingestion**: three-pass streaming parser, exact-size allocation
//! - **Persistence**: unversioned little-endian sidecar cache, never invalidated
//! - **Queries**: bounded BFS and critical node over borrowed CSR slices
//! - **Contract**: [`GraphEngine`] trait for swappable backends

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod algorithms;
pub mod config;
pub mod engine;
pub mod storage;

// Re-export core types
pub use algorithms::{bfs_edges, critical_node, GraphStats};
pub use config::LoadConfig;
pub use engine::{GraphEngine, SparseGraph};
pub use storage::{
    cache_path_for, load_graph, CacheError, CsrGraph, LoadSource, LoadedGraph, NodeId,
};

// Error type
pub use anyhow::{Error, Result};
