//! Read-only graph queries (bounded BFS, critical node)

pub mod degree;
pub mod traversal;

pub use degree::{critical_node, GraphStats};
pub use traversal::bfs_edges;
