//! Degree analytics: critical node and summary statistics

use crate::storage::CsrGraph;
use crate::NodeId;

/// Node with the largest out-degree, lowest id on ties
///
/// Returns `None` only for a graph without nodes, such as `CsrGraph::new()`.
/// Any loaded graph has at least node 0, so a file without edges yields node 0.
///
/// # Example
///
/// ```
/// use neuronet::{critical_node, CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[
///     (NodeId(0), NodeId(1)),
///     (NodeId(0), NodeId(2)),
///     (NodeId(1), NodeId(2)),
/// ])
/// .unwrap();
///
/// assert_eq!(critical_node(&graph), Some(NodeId(0)));
/// ```
#[must_use]
#[allow(clippy::cast_possible_truncation)] // Node ids are u32 by construction
pub fn critical_node(graph: &CsrGraph) -> Option<NodeId> {
    let (row_offsets, _) = graph.csr_components();

    let mut best: Option<(usize, u32)> = None;
    for (node, window) in row_offsets.windows(2).enumerate() {
        let degree = window[1] - window[0];
        // Strict comparison keeps the first (lowest id) maximum
        if best.map_or(true, |(_, max)| degree > max) {
            best = Some((node, degree));
        }
    }

    best.map(|(node, _)| NodeId(node as u32))
}

/// Headline numbers for a loaded graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphStats {
    /// Number of node slots
    pub nodes: usize,
    /// Number of directed edges
    pub edges: usize,
    /// Highest out-degree node, if any
    pub critical: Option<NodeId>,
}

impl GraphStats {
    /// Compute statistics for `graph`
    #[must_use]
    pub fn of(graph: &CsrGraph) -> Self {
        Self {
            nodes: graph.num_nodes(),
            edges: graph.num_edges(),
            critical: critical_node(graph),
        }
    }
}
