//! CSR (Compressed Sparse Row) graph representation
//!
//! # CSR Format
//!
//! ```text
//! Graph: 0 → 1, 0 → 2, 1 → 2
//!
//! CSR:
//!   row_offsets: [0, 2, 3, 3]  // Node 0: edges [0..2), Node 1: [2..3), Node 2: [3..3)
//!   col_indices: [1, 2, 2]      // Edge 0 → node 1, edge 1 → node 2, edge 2 → node 2
//! ```
//!
//! Every store, whether parsed from text, decoded from the sidecar cache or
//! built from an in-memory edge list, satisfies:
//!
//! - `row_offsets[0] == 0`
//! - `row_offsets` is non-decreasing
//! - `row_offsets[num_nodes] == num_edges`
//! - every entry of `col_indices` is `< num_nodes`

use anyhow::{anyhow, bail, ensure, Result};

/// Node identifier (zero-indexed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Immutable CSR graph
///
/// Built once (from text, cache or an edge list) and then only read.
///
/// # Example
///
/// ```
/// use neuronet::{CsrGraph, NodeId};
///
/// let edges = [(NodeId(0), NodeId(1)), (NodeId(0), NodeId(2))];
/// let graph = CsrGraph::from_edge_list(&edges).unwrap();
///
/// let neighbors = graph.outgoing_neighbors(NodeId(0)).unwrap();
/// assert_eq!(neighbors, &[1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrGraph {
    /// node i's edges start at `row_offsets`[i]
    /// Length: `num_nodes` + 1
    row_offsets: Vec<u32>,

    /// Edge targets, grouped by source
    /// Length: `num_edges`
    col_indices: Vec<u32>,

    num_nodes: usize,
}

impl CsrGraph {
    /// Create new empty graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            row_offsets: vec![0],
            col_indices: Vec::new(),
            num_nodes: 0,
        }
    }

    /// Assemble a graph from raw CSR arrays, checking the CSR invariants
    ///
    /// # Errors
    ///
    /// Returns error if `row_offsets` is empty or the arrays violate any CSR invariant
    pub fn from_raw_parts(row_offsets: Vec<u32>, col_indices: Vec<u32>) -> Result<Self> {
        let num_nodes = row_offsets
            .len()
            .checked_sub(1)
            .ok_or_else(|| anyhow!("row_offsets must hold at least one entry"))?;

        let graph = Self {
            row_offsets,
            col_indices,
            num_nodes,
        };
        graph.validate()?;

        Ok(graph)
    }

    /// Create graph from an in-memory edge list
    ///
    /// Uses the same histogram / prefix-sum / placement scheme as the text
    /// loader, so destinations keep their input order per source. Like the
    /// text loader, the highest id starts at 0: an empty list gives a single
    /// isolated node.
    ///
    /// # Errors
    ///
    /// Returns error if the edge count does not fit in `u32` or the arrays
    /// cannot be allocated
    pub fn from_edge_list(edges: &[(NodeId, NodeId)]) -> Result<Self> {
        ensure!(
            u32::try_from(edges.len()).is_ok(),
            "Edge list of {} edges exceeds u32 range",
            edges.len()
        );

        let max_node = edges
            .iter()
            .flat_map(|(src, dst)| [src.0, dst.0])
            .max()
            .unwrap_or(0);
        let num_nodes = max_node as usize + 1;

        let mut degrees = zeroed(num_nodes, "node slots")?;
        for (src, _) in edges {
            degrees[src.0 as usize] += 1;
        }
        let row_offsets = prefix_sum(&degrees)?;

        let mut col_indices = zeroed(edges.len(), "edge slots")?;
        let mut cursor = zeroed(num_nodes, "cursor slots")?;
        cursor.copy_from_slice(&row_offsets[..num_nodes]);
        for (src, dst) in edges {
            let slot = &mut cursor[src.0 as usize];
            col_indices[*slot as usize] = dst.0;
            *slot += 1;
        }

        Ok(Self {
            row_offsets,
            col_indices,
            num_nodes,
        })
    }

    /// Check the CSR invariants
    ///
    /// # Errors
    ///
    /// Returns error describing the first violated invariant
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.row_offsets.len() == self.num_nodes + 1,
            "row_offsets has {} entries, expected {}",
            self.row_offsets.len(),
            self.num_nodes + 1
        );
        ensure!(
            self.row_offsets[0] == 0,
            "row_offsets[0] is {}, expected 0",
            self.row_offsets[0]
        );

        if let Some(i) = self.row_offsets.windows(2).position(|w| w[0] > w[1]) {
            bail!(
                "row_offsets decreases at node {i}: {} > {}",
                self.row_offsets[i],
                self.row_offsets[i + 1]
            );
        }

        let last = self.row_offsets[self.num_nodes] as usize;
        ensure!(
            last == self.col_indices.len(),
            "row_offsets ends at {last} but there are {} edges",
            self.col_indices.len()
        );

        if let Some(&bad) = self
            .col_indices
            .iter()
            .find(|&&dst| dst as usize >= self.num_nodes)
        {
            bail!(
                "Edge target {bad} out of bounds for {} nodes",
                self.num_nodes
            );
        }

        Ok(())
    }

    /// Get outgoing neighbors of a node, in input order
    ///
    /// # Errors
    ///
    /// Returns error if node ID is out of bounds
    pub fn outgoing_neighbors(&self, node: NodeId) -> Result<&[u32]> {
        if (node.0 as usize) >= self.num_nodes {
            return Err(anyhow!("Node ID {} out of bounds", node.0));
        }

        let idx = node.0 as usize;
        let start = self.row_offsets[idx] as usize;
        let end = self.row_offsets[idx + 1] as usize;

        Ok(&self.col_indices[start..end])
    }

    /// Out-degree of a node, `None` if the id is out of bounds
    #[must_use]
    pub fn out_degree(&self, node: NodeId) -> Option<usize> {
        let idx = node.0 as usize;
        if idx >= self.num_nodes {
            return None;
        }
        Some((self.row_offsets[idx + 1] - self.row_offsets[idx]) as usize)
    }

    /// Get number of nodes
    #[must_use]
    pub const fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Get number of edges
    #[must_use]
    pub fn num_edges(&self) -> usize {
        self.col_indices.len()
    }

    /// Get CSR components (`row_offsets`, `col_indices`)
    #[must_use]
    pub fn csr_components(&self) -> (&[u32], &[u32]) {
        (&self.row_offsets, &self.col_indices)
    }

    /// Build from arrays the caller has already sized and filled consistently
    pub(crate) fn from_parts_unchecked(row_offsets: Vec<u32>, col_indices: Vec<u32>) -> Self {
        debug_assert!(!row_offsets.is_empty());
        let num_nodes = row_offsets.len() - 1;
        Self {
            row_offsets,
            col_indices,
            num_nodes,
        }
    }
}

impl Default for CsrGraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Zero-filled array of `len` slots, or an error if it cannot be allocated
///
/// Lengths come from ids in untrusted input.
pub(crate) fn zeroed(len: usize, what: &str) -> Result<Vec<u32>> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(len)
        .map_err(|_| anyhow!("Cannot allocate {len} {what}"))?;
    slots.resize(len, 0);
    Ok(slots)
}

/// Exclusive prefix sum of per-node degrees: `out[0] = 0`, `out[i + 1] = out[i] + degrees[i]`
pub(crate) fn prefix_sum(degrees: &[u32]) -> Result<Vec<u32>> {
    let mut row_offsets = Vec::new();
    row_offsets
        .try_reserve_exact(degrees.len() + 1)
        .map_err(|_| anyhow!("Cannot allocate {} row offsets", degrees.len() + 1))?;

    let mut offset = 0_u32;
    row_offsets.push(offset);

    for &degree in degrees {
        offset += degree;
        row_offsets.push(offset);
    }

    Ok(row_offsets)
}
