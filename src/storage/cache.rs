//! Binary sidecar cache for CSR graphs
//!
//! # Format
//!
//! A flat sequence of 32-bit little-endian unsigned integers, no header magic,
//! no version tag and no padding:
//!
//! ```text
//! [num_nodes][num_edges][row_offsets: num_nodes + 1][col_indices: num_edges]
//! ```
//!
//! The cache carries nothing about the source file it was built from, so it is
//! never checked for staleness. Bytes past the last announced block are ignored.

use super::csr::CsrGraph;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

const WORD: usize = std::mem::size_of::<u32>();
const HEADER_LEN: usize = 2 * WORD;

/// Cache encoding/decoding errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// File ends before the blocks its header announces
    #[error("Cache truncated: need {needed} bytes, found {available}")]
    Truncated {
        /// Bytes required by the header counters
        needed: usize,
        /// Bytes actually present
        available: usize,
    },

    /// Decoded arrays break the CSR invariants
    #[error("Cache does not hold a valid CSR graph: {0}")]
    Corrupt(String),

    /// Graph dimension does not fit a 32-bit counter
    #[error("Graph too large for cache format: {0} exceeds u32 range")]
    TooLarge(usize),
}

impl CsrGraph {
    /// Encode graph into the cache byte layout
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::TooLarge`] if the node or edge count exceeds `u32::MAX`
    pub fn encode_cache(&self) -> Result<Vec<u8>, CacheError> {
        let num_nodes =
            u32::try_from(self.num_nodes()).map_err(|_| CacheError::TooLarge(self.num_nodes()))?;
        let num_edges =
            u32::try_from(self.num_edges()).map_err(|_| CacheError::TooLarge(self.num_edges()))?;

        let (row_offsets, col_indices) = self.csr_components();
        let words = row_offsets.len() + col_indices.len();
        let mut out = Vec::with_capacity(HEADER_LEN + words * WORD);

        for word in [num_nodes, num_edges]
            .iter()
            .chain(row_offsets)
            .chain(col_indices)
        {
            out.extend_from_slice(&word.to_le_bytes());
        }

        Ok(out)
    }

    /// Decode a graph from the cache byte layout
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Truncated`] if `bytes` is shorter than the header
    /// announces, [`CacheError::Corrupt`] if the arrays are not a valid CSR graph
    pub fn decode_cache(bytes: &[u8]) -> Result<Self, CacheError> {
        let truncated = |needed| CacheError::Truncated {
            needed,
            available: bytes.len(),
        };

        if bytes.len() < HEADER_LEN {
            return Err(truncated(HEADER_LEN));
        }
        let header = decode_words(&bytes[..HEADER_LEN]);
        let (num_nodes, num_edges) = (header[0] as usize, header[1] as usize);

        let rows_end = HEADER_LEN + (num_nodes + 1) * WORD;
        let cols_end = rows_end + num_edges * WORD;
        if bytes.len() < cols_end {
            return Err(truncated(cols_end));
        }

        let row_offsets = decode_words(&bytes[HEADER_LEN..rows_end]);
        let col_indices = decode_words(&bytes[rows_end..cols_end]);

        Self::from_raw_parts(row_offsets, col_indices)
            .map_err(|e| CacheError::Corrupt(e.to_string()))
    }

    /// Write graph to a cache file, replacing any existing file
    ///
    /// No cleanup is attempted if the write fails part-way.
    ///
    /// # Errors
    ///
    /// Returns error if the graph cannot be encoded or file I/O fails
    pub fn write_cache<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.encode_cache()?;

        let mut file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        file.write_all(&bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }

    /// Read graph from a cache file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or does not decode to a valid graph
    pub fn read_cache<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let bytes =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;

        let graph = Self::decode_cache(&bytes)
            .with_context(|| format!("Invalid cache file {}", path.display()))?;

        Ok(graph)
    }
}

fn decode_words(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(WORD)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
