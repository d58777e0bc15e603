//! Depth-bounded BFS over the CSR structure
//!
//! The traversal reports the edges it walks rather than the nodes it reaches,
//! which is what a front end needs to draw the explored neighborhood.

use crate::storage::CsrGraph;
use crate::NodeId;
use std::collections::VecDeque;

const UNVISITED: u32 = u32::MAX;

/// Breadth-first search from `start`, expanding nodes closer than `max_depth`
///
/// Every outgoing edge of an expanded node is reported as `(source, target)`,
/// including edges into nodes that were already discovered; each node is
/// still queued at most once. Edges come out in BFS discovery order.
///
/// # Arguments
///
/// * `graph` - CSR graph representation
/// * `start` - Starting node
/// * `max_depth` - Nodes at this distance or further are not expanded (0 = nothing)
///
/// # Returns
///
/// The visited edges; empty if `start` is out of bounds or `max_depth` is 0
///
/// # Example
///
/// ```
/// use neuronet::{bfs_edges, CsrGraph, NodeId};
///
/// let graph = CsrGraph::from_edge_list(&[
///     (NodeId(0), NodeId(1)),
///     (NodeId(0), NodeId(2)),
///     (NodeId(1), NodeId(2)),
/// ])
/// .unwrap();
///
/// assert_eq!(bfs_edges(&graph, NodeId(0), 1), vec![(0, 1), (0, 2)]);
/// assert_eq!(bfs_edges(&graph, NodeId(0), 2), vec![(0, 1), (0, 2), (1, 2)]);
/// ```
#[must_use]
pub fn bfs_edges(graph: &CsrGraph, start: NodeId, max_depth: u32) -> Vec<(u32, u32)> {
    let mut edges = Vec::new();
    let num_nodes = graph.num_nodes();
    if start.0 as usize >= num_nodes {
        return edges;
    }

    let (row_offsets, col_indices) = graph.csr_components();
    let mut distance = vec![UNVISITED; num_nodes];
    let mut queue = VecDeque::new();

    distance[start.0 as usize] = 0;
    queue.push_back(start.0);

    while let Some(current) = queue.pop_front() {
        let depth = distance[current as usize];
        if depth >= max_depth {
            continue;
        }

        let begin = row_offsets[current as usize] as usize;
        let end = row_offsets[current as usize + 1] as usize;

        for &neighbor in &col_indices[begin..end] {
            edges.push((current, neighbor));

            let seen = &mut distance[neighbor as usize];
            if *seen == UNVISITED {
                *seen = depth + 1;
                queue.push_back(neighbor);
            }
        }
    }

    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph(pairs: &[(u32, u32)]) -> CsrGraph {
        let edges: Vec<_> = pairs.iter().map(|&(u, v)| (NodeId(u), NodeId(v))).collect();
        CsrGraph::from_edge_list(&edges).unwrap()
    }

    #[test]
    fn test_bfs_depth_one() {
        let g = graph(&[(0, 1), (0, 2), (1, 2)]);

        // 1 and 2 are discovered at depth 1 but never expanded
        assert_eq!(bfs_edges(&g, NodeId(0), 1), vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_bfs_depth_zero_is_empty() {
        let g = graph(&[(0, 1), (0, 2), (1, 2)]);

        for start in 0..3 {
            assert!(bfs_edges(&g, NodeId(start), 0).is_empty());
        }
    }

    #[test]
    fn test_bfs_out_of_range_start() {
        let g = graph(&[(0, 1)]);

        assert!(bfs_edges(&g, NodeId(2), 5).is_empty());
        assert!(bfs_edges(&CsrGraph::new(), NodeId(0), 5).is_empty());
    }

    #[test]
    fn test_bfs_chain_depth_limit() {
        // 0 → 1 → 2 → 3
        let g = graph(&[(0, 1), (1, 2), (2, 3)]);

        assert_eq!(bfs_edges(&g, NodeId(0), 2), vec![(0, 1), (1, 2)]);
        assert_eq!(bfs_edges(&g, NodeId(0), 10), vec![(0, 1), (1, 2), (2, 3)]);
    }

    #[test]
    fn test_bfs_records_edges_into_visited_nodes() {
        // Diamond 0 → {1, 2} → 3 plus back edge 3 → 0
        let g = graph(&[(0, 1), (0, 2), (1, 3), (2, 3), (3, 0)]);

        let edges = bfs_edges(&g, NodeId(0), 10);
        assert_eq!(edges, vec![(0, 1), (0, 2), (1, 3), (2, 3), (3, 0)]);
    }

    #[test]
    fn test_bfs_self_loop_and_multi_edges() {
        let g = graph(&[(0, 0), (0, 1), (0, 1)]);

        assert_eq!(bfs_edges(&g, NodeId(0), 3), vec![(0, 0), (0, 1), (0, 1)]);
    }

    #[test]
    fn test_bfs_disconnected() {
        let g = graph(&[(0, 1), (2, 3)]);

        assert_eq!(bfs_edges(&g, NodeId(0), 10), vec![(0, 1)]);
        assert!(bfs_edges(&g, NodeId(1), 10).is_empty());
    }

    #[test]
    fn test_bfs_level_order() {
        // 0 → 1, 0 → 2, 1 → 3, 2 → 4: level 1 edges come before level 2
        let g = graph(&[(1, 3), (0, 1), (2, 4), (0, 2)]);

        assert_eq!(
            bfs_edges(&g, NodeId(0), 2),
            vec![(0, 1), (0, 2), (1, 3), (2, 4)]
        );
    }
}
