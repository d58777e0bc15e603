//! Graph engine capability contract
//!
//! [`GraphEngine`] is the surface a driver (CLI, GUI, bindings) talks to. It is
//! object safe so backends can be swapped behind `Box<dyn GraphEngine>`.
//! [`SparseGraph`] is the CSR-backed implementation.

use crate::algorithms::{bfs_edges, critical_node, GraphStats};
use crate::config::LoadConfig;
use crate::storage::{load_graph, CsrGraph, LoadSource};
use crate::NodeId;
use anyhow::Result;
use std::path::Path;

/// Operations every graph backend provides
pub trait GraphEngine {
    /// Load a dataset, replacing whatever was loaded before
    ///
    /// # Errors
    ///
    /// Returns error if the dataset cannot be loaded; the engine then holds no graph
    fn load(&mut self, path: &Path) -> Result<()>;

    /// Highest out-degree node (lowest id on ties), `None` while nothing is loaded
    fn critical_node(&self) -> Option<NodeId>;

    /// Edges visited by a BFS from `start` that expands nodes closer than `max_depth`
    fn bfs(&self, start: NodeId, max_depth: u32) -> Vec<(u32, u32)>;

    /// Number of node slots
    fn node_count(&self) -> usize;

    /// Number of directed edges
    fn edge_count(&self) -> usize;

    /// Nodes, edges and critical node in one call
    fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            critical: self.critical_node(),
        }
    }
}

/// CSR-backed [`GraphEngine`] with a sidecar cache
///
/// # Example
///
/// ```no_run
/// use neuronet::{GraphEngine, NodeId, SparseGraph};
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// let mut engine = SparseGraph::new();
/// engine.load(Path::new("web-Google.txt"))?; // writes web-Google.txt.bin
///
/// let hub = engine.critical_node().unwrap_or(NodeId(0));
/// let edges = engine.bfs(hub, 2);
/// println!("{} edges within two hops of {}", edges.len(), hub.0);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SparseGraph {
    config: LoadConfig,
    graph: Option<CsrGraph>,
    source: Option<LoadSource>,
}

impl SparseGraph {
    /// Engine with the default cache configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine with a custom cache configuration
    #[must_use]
    pub fn with_config(config: LoadConfig) -> Self {
        Self {
            config,
            graph: None,
            source: None,
        }
    }

    /// Currently loaded graph
    #[must_use]
    pub fn graph(&self) -> Option<&CsrGraph> {
        self.graph.as_ref()
    }

    /// How the current graph was obtained
    #[must_use]
    pub fn source(&self) -> Option<LoadSource> {
        self.source
    }
}

impl GraphEngine for SparseGraph {
    fn load(&mut self, path: &Path) -> Result<()> {
        self.graph = None;
        self.source = None;

        let loaded = load_graph(path, &self.config)?;
        self.graph = Some(loaded.graph);
        self.source = Some(loaded.source);

        Ok(())
    }

    fn critical_node(&self) -> Option<NodeId> {
        self.graph.as_ref().and_then(critical_node)
    }

    fn bfs(&self, start: NodeId, max_depth: u32) -> Vec<(u32, u32)> {
        self.graph
            .as_ref()
            .map(|graph| bfs_edges(graph, start, max_depth))
            .unwrap_or_default()
    }

    fn node_count(&self) -> usize {
        self.graph.as_ref().map_or(0, CsrGraph::num_nodes)
    }

    fn edge_count(&self) -> usize {
        self.graph.as_ref().map_or(0, CsrGraph::num_edges)
    }
}
