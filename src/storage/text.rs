//! Edge-list text loader
//!
//! # Format
//!
//! ```text
//! # Directed graph (each unordered pair of nodes is saved once)
//! # FromNodeId    ToNodeId
//! 0   1
//! 0   2
//! 1   2
//! ```
//!
//! Leading lines whose first non-blank character is `#` are skipped. The rest
//! of the stream is read as whitespace-separated unsigned integers, two per
//! edge, with no line structure required. Reading stops quietly at the first
//! point where two more integers cannot be read; every edge before that point
//! is kept.
//!
//! Ids are read as `u32`, so values up to `4294967295` are accepted. A file
//! without any edge still holds node 0: the node count is always the highest
//! id seen, starting from 0, plus one.
//!
//! The loader makes three sequential passes over the edge region (dimensions,
//! degree histogram, placement) so both CSR arrays are allocated once at their
//! exact size.

use super::csr::{prefix_sum, zeroed, CsrGraph};
use anyhow::{anyhow, ensure, Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

const COMMENT_MARKER: u8 = b'#';

const SOURCE_CHANGED: &str = "Edge stream changed between passes";

impl CsrGraph {
    /// Build a graph from an edge-list text file
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or read, or if it holds more
    /// than `u32::MAX` edges
    pub fn from_text_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let file =
            File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

        Self::from_text_reader(BufReader::new(file))
            .with_context(|| format!("Failed to load edge list {}", path.display()))
    }

    /// Build a graph from any seekable edge-list stream
    ///
    /// # Errors
    ///
    /// Returns error on I/O failure, on more than `u32::MAX` edges, if the CSR
    /// arrays cannot be allocated, or if the stream yields different edges on
    /// a later pass than on the first
    ///
    /// # Example
    ///
    /// ```
    /// use neuronet::CsrGraph;
    /// use std::io::Cursor;
    ///
    /// let graph = CsrGraph::from_text_reader(Cursor::new("# toy\n0 1\n0 2\n1 2\n")).unwrap();
    /// assert_eq!(graph.csr_components(), (&[0, 2, 3, 3][..], &[1, 2, 2][..]));
    /// ```
    pub fn from_text_reader<R: BufRead + Seek>(mut reader: R) -> Result<Self> {
        skip_comment_lines(&mut reader)?;
        let data_start = reader.stream_position()?;

        // Pass 1: dimensions
        let mut num_edges = 0_usize;
        let mut max_id = 0_u32;
        for_each_edge(&mut reader, data_start, |u, v| {
            num_edges += 1;
            max_id = max_id.max(u).max(v);
            Ok(())
        })?;

        ensure!(
            u32::try_from(num_edges).is_ok(),
            "Edge list of {num_edges} edges exceeds u32 range"
        );
        let num_nodes = max_id as usize + 1;
        tracing::debug!(num_nodes, num_edges, "dimension pass complete");

        // Pass 2: out-degree histogram
        let mut degrees = zeroed(num_nodes, "node slots")?;
        let mut counted = 0_usize;
        for_each_edge(&mut reader, data_start, |u, _| {
            counted += 1;
            ensure!(counted <= num_edges, SOURCE_CHANGED);
            let degree = degrees
                .get_mut(u as usize)
                .ok_or_else(|| anyhow!(SOURCE_CHANGED))?;
            *degree += 1;
            Ok(())
        })?;
        ensure!(counted == num_edges, SOURCE_CHANGED);

        let row_offsets = prefix_sum(&degrees)?;
        drop(degrees);
        tracing::debug!("histogram pass complete");

        // Pass 3: placement
        let mut col_indices = zeroed(num_edges, "edge slots")?;
        let mut cursor = zeroed(num_nodes, "cursor slots")?;
        cursor.copy_from_slice(&row_offsets[..num_nodes]);
        for_each_edge(&mut reader, data_start, |u, v| {
            ensure!((v as usize) < num_nodes, SOURCE_CHANGED);
            let src = u as usize;
            let slot = cursor.get_mut(src).ok_or_else(|| anyhow!(SOURCE_CHANGED))?;
            ensure!(*slot < row_offsets[src + 1], SOURCE_CHANGED);
            col_indices[*slot as usize] = v;
            *slot += 1;
            Ok(())
        })?;

        // Every cursor must have reached the start of the next row
        ensure!(cursor[..] == row_offsets[1..], SOURCE_CHANGED);
        tracing::debug!("placement pass complete");

        Ok(Self::from_parts_unchecked(row_offsets, col_indices))
    }
}

/// Rewind to `start` and feed every edge to `visit` until the stream stops yielding pairs
fn for_each_edge<R, F>(reader: &mut R, start: u64, mut visit: F) -> Result<()>
where
    R: BufRead + Seek,
    F: FnMut(u32, u32) -> Result<()>,
{
    reader.seek(SeekFrom::Start(start))?;

    while let Some((u, v)) = next_edge(reader)? {
        visit(u, v)?;
    }

    Ok(())
}

fn next_edge<R: BufRead>(reader: &mut R) -> io::Result<Option<(u32, u32)>> {
    let Some(u) = next_u32(reader)? else {
        return Ok(None);
    };
    let Some(v) = next_u32(reader)? else {
        return Ok(None);
    };
    Ok(Some((u, v)))
}

/// Read one unsigned integer after optional whitespace
///
/// `None` when the next token does not start with a digit or overflows `u32`.
/// Characters following the digits are left in the stream.
fn next_u32<R: BufRead>(reader: &mut R) -> io::Result<Option<u32>> {
    skip_whitespace(reader)?;
    if peek(reader)? == Some(b'+') {
        reader.consume(1);
    }

    let mut value: Option<u32> = None;
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }

        let digits = buf.iter().take_while(|b| b.is_ascii_digit()).count();
        for &b in &buf[..digits] {
            let next = value
                .unwrap_or(0)
                .checked_mul(10)
                .and_then(|acc| acc.checked_add(u32::from(b - b'0')));
            if next.is_none() {
                return Ok(None);
            }
            value = next;
        }

        let more = digits == buf.len();
        reader.consume(digits);
        if !more {
            break;
        }
    }

    Ok(value)
}

fn skip_whitespace<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            return Ok(());
        }

        let blanks = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
        let more = blanks == buf.len();
        reader.consume(blanks);
        if !more {
            return Ok(());
        }
    }
}

fn skip_comment_lines<R: BufRead>(reader: &mut R) -> io::Result<()> {
    let mut line = Vec::new();
    loop {
        skip_whitespace(reader)?;
        if peek(reader)? != Some(COMMENT_MARKER) {
            return Ok(());
        }
        line.clear();
        reader.read_until(b'\n', &mut line)?;
    }
}

fn peek<R: BufRead>(reader: &mut R) -> io::Result<Option<u8>> {
    Ok(reader.fill_buf()?.first().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> CsrGraph {
        CsrGraph::from_text_reader(Cursor::new(text.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn test_simple_edge_list() {
        let graph = parse("0 1\n0 2\n1 2\n");

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 3);

        let (row_offsets, col_indices) = graph.csr_components();
        assert_eq!(row_offsets, &[0, 2, 3, 3]);
        assert_eq!(col_indices, &[1, 2, 2]);
    }

    #[test]
    fn test_skips_leading_comments() {
        let graph = parse("# Directed graph\n  # Nodes: 3 Edges: 2\n\n0\t1\n2 0\n");

        assert_eq!(graph.num_nodes(), 3);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.outgoing_neighbors(crate::NodeId(2)).unwrap(), &[0]);
    }

    #[test]
    fn test_tokens_ignore_line_structure() {
        let graph = parse("0 1 0\n2\n\n1   2");

        let (row_offsets, col_indices) = graph.csr_components();
        assert_eq!(row_offsets, &[0, 2, 3, 3]);
        assert_eq!(col_indices, &[1, 2, 2]);
    }

    #[test]
    fn test_interleaved_sources_keep_first_appearance_order() {
        let graph = parse("3 1\n0 2\n3 0\n0 1\n3 2\n");

        assert_eq!(graph.outgoing_neighbors(crate::NodeId(0)).unwrap(), &[2, 1]);
        assert_eq!(graph.outgoing_neighbors(crate::NodeId(3)).unwrap(), &[1, 0, 2]);
    }

    #[test]
    fn test_truncates_at_malformed_token() {
        // "x" stops parsing; the edge after it is never read
        let graph = parse("0 1\n1 2\nx 3\n4 5\n");

        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.num_nodes(), 3);
    }

    #[test]
    fn test_truncates_at_dangling_source() {
        let graph = parse("0 1\n7\n");

        assert_eq!(graph.num_edges(), 1);
        assert_eq!(graph.num_nodes(), 2);
    }

    #[test]
    fn test_truncates_at_glued_suffix() {
        // "2abc": 2 is read, then "abc" cannot start the destination
        let graph = parse("0 1\n2abc 3\n");

        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_truncates_at_negative_and_overflowing_ids() {
        assert_eq!(parse("0 1\n-1 2\n").num_edges(), 1);
        assert_eq!(parse("0 1\n1 99999999999\n").num_edges(), 1);
    }

    #[test]
    fn test_comment_after_data_truncates() {
        let graph = parse("0 1\n# trailer\n1 0\n");

        assert_eq!(graph.num_edges(), 1);
    }

    #[test]
    fn test_empty_input() {
        for text in ["", "# only a header\n", "   \n\n", "garbage"] {
            let graph = parse(text);
            assert_eq!(graph.num_nodes(), 1, "input {text:?}");
            assert_eq!(graph.num_edges(), 0, "input {text:?}");
            assert_eq!(graph.csr_components().0, &[0, 0], "input {text:?}");
            assert!(graph.validate().is_ok());
        }
    }

    #[test]
    fn test_header_only_cache_layout() {
        let bytes = parse("# header only\n").encode_cache().unwrap();
        let expected: Vec<u8> = [1_u32, 0, 0, 0].iter().flat_map(|w| w.to_le_bytes()).collect();

        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_token_range_is_full_u32() {
        let mut reader = Cursor::new("2147483648 4294967295 4294967296");

        assert_eq!(next_u32(&mut reader).unwrap(), Some(2_147_483_648));
        assert_eq!(next_u32(&mut reader).unwrap(), Some(u32::MAX));
        assert_eq!(next_u32(&mut reader).unwrap(), None);
    }

    #[test]
    fn test_self_loops_and_multi_edges() {
        let graph = parse("1 1\n1 1\n0 1\n");

        assert_eq!(graph.outgoing_neighbors(crate::NodeId(1)).unwrap(), &[1, 1]);
        assert_eq!(graph.out_degree(crate::NodeId(0)), Some(1));
    }

    #[test]
    fn test_matches_from_edge_list() {
        let text = "5 2\n1 4\n5 0\n2 2\n1 3\n";
        let edges: Vec<_> = [(5, 2), (1, 4), (5, 0), (2, 2), (1, 3)]
            .iter()
            .map(|&(u, v)| (crate::NodeId(u), crate::NodeId(v)))
            .collect();

        assert_eq!(parse(text), CsrGraph::from_edge_list(&edges).unwrap());
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CsrGraph::from_text_file(dir.path().join("missing.txt")).unwrap_err();

        assert!(err.to_string().contains("Failed to open"));
    }
}
