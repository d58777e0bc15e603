//! Cache-first graph loading
//!
//! `load_graph` tries the sidecar cache next to the source file and falls back
//! to parsing the text, then writes the cache for the next run. An existing
//! cache is always trusted: edits to the source after the cache was written
//! are not noticed.

use super::CsrGraph;
use crate::config::LoadConfig;
use anyhow::Result;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Where a loaded graph came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the sidecar cache
    Cache,
    /// Parsed from the edge-list text
    Text,
}

/// Result of [`load_graph`]
#[derive(Debug, Clone)]
pub struct LoadedGraph {
    /// The loaded graph
    pub graph: CsrGraph,
    /// Path taken to obtain it
    pub source: LoadSource,
}

/// Sidecar cache path: `path` with `suffix` appended literally
///
/// ```
/// use neuronet::cache_path_for;
/// use std::path::Path;
///
/// assert_eq!(cache_path_for("data/web.txt", ".bin"), Path::new("data/web.txt.bin"));
/// ```
#[must_use]
pub fn cache_path_for<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_ref().as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Load a graph, preferring its sidecar cache
///
/// A missing, unreadable or corrupt cache is not an error: the text is parsed
/// instead and the cache rewritten. Failing to write the cache is logged and
/// otherwise ignored.
///
/// # Errors
///
/// Returns error if the cache cannot be used and the source text cannot be
/// opened or read
pub fn load_graph<P: AsRef<Path>>(path: P, config: &LoadConfig) -> Result<LoadedGraph> {
    let path = path.as_ref();
    let cache_path = cache_path_for(path, &config.cache_suffix);

    if config.read_cache && cache_path.is_file() {
        match CsrGraph::read_cache(&cache_path) {
            Ok(graph) => {
                tracing::info!(
                    cache = %cache_path.display(),
                    nodes = graph.num_nodes(),
                    edges = graph.num_edges(),
                    "loaded graph from cache"
                );
                return Ok(LoadedGraph {
                    graph,
                    source: LoadSource::Cache,
                });
            }
            Err(e) => {
                tracing::warn!(
                    cache = %cache_path.display(),
                    error = %format!("{e:#}"),
                    "cache unusable, parsing source text"
                );
            }
        }
    }

    let graph = CsrGraph::from_text_file(path)?;
    tracing::info!(
        source = %path.display(),
        nodes = graph.num_nodes(),
        edges = graph.num_edges(),
        "parsed graph from text"
    );

    if config.write_cache {
        if let Err(e) = graph.write_cache(&cache_path) {
            tracing::warn!(
                cache = %cache_path.display(),
                error = %format!("{e:#}"),
                "failed to write cache"
            );
        }
    }

    Ok(LoadedGraph {
        graph,
        source: LoadSource::Text,
    })
}
