//! A DIMACS-style edge-stream parser.
//!
//! Line-oriented text format:
//!
//! - a line starting with `c`, or a blank line, is a comment and is skipped;
//! - `p ... n` declares the vertex count `n` (vertices are numbered
//!   `0..=n`, matching the Python reader's off-by-one `range(n + 1)`);
//! - `a u v w` declares an edge between integer vertices `u`, `v` with
//!   integer weight `w`;
//! - `n k s|t` declares a source or sink marker.
//!
//! Duplicate undirected edges — `(u, v)` or `(v, u)`, after the first
//! occurrence — are dropped.

use std::collections::HashSet;
use std::io::BufRead;
use std::path::Path;

/// Everything a DIMACS-style file declares: the edge list (deduplicated,
/// undirected), the declared vertex count, and any source/sink markers.
///
/// The MSF driver only ever consumes `edges`; `source` and
/// `sink` are recorded because a complete reader of the format must not
/// silently drop a directive it recognizes, even one its caller ignores.
#[derive(Debug, Clone, Default)]
pub struct ParsedGraph {
    /// The declared vertex count from the `p` line.
    pub vertex_count: usize,
    /// `(u, v, weight)` triples, in file order, deduplicated by
    /// undirected endpoint pair.
    pub edges: Vec<(i64, i64, i64)>,
    /// The source vertex named by an `n k s` line, if any.
    pub source: Option<i64>,
    /// The sink vertex named by an `n k t` line, if any.
    pub sink: Option<i64>,
}

/// Everything that can go wrong reading a DIMACS-style file.
///
/// This is the one ordinary, expected-failure-mode `Result` in the
/// workspace: malformed input is a normal occurrence for
/// a CLI reading a file the user supplied, unlike the core's
/// precondition violations.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The underlying file could not be read.
    #[error("failed to read input file: {0}")]
    Io(#[from] std::io::Error),
    /// A line could not be parsed as any recognized directive.
    #[error("malformed line {line_no}: {text:?}")]
    MalformedLine {
        /// 1-based line number.
        line_no: usize,
        /// The offending line's text.
        text: String,
    },
    /// An `a` or `n` line appeared before the `p` line declared a vertex count.
    #[error("edge or marker line appeared before the vertex count was declared")]
    VertexCountMissing,
    /// An `a` or `n` line referenced a vertex outside `0..=vertex_count`.
    #[error("line {line_no}: vertex {vertex} is out of the declared 0..={vertex_count} range")]
    VertexOutOfRange {
        /// 1-based line number.
        line_no: usize,
        /// The out-of-range vertex.
        vertex: i64,
        /// The declared vertex count that bounds valid vertices.
        vertex_count: usize,
    },
}

/// Parses a DIMACS-style edge stream from `path`.
///
/// # Errors
///
/// Returns [`ParseError`] if the file cannot be read, a line is
/// malformed, an edge or marker precedes the vertex-count declaration,
/// or a vertex falls outside the declared range.
pub fn parse_dimacs(path: impl AsRef<Path>) -> Result<ParsedGraph, ParseError> {
    let file = std::fs::File::open(path)?;
    let reader = std::io::BufReader::new(file);

    let mut graph = ParsedGraph::default();
    let mut vertex_count: Option<usize> = None;
    let mut seen: HashSet<(i64, i64)> = HashSet::new();

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let malformed = || ParseError::MalformedLine {
            line_no,
            text: line.to_string(),
        };
        let in_range = |v: i64, n: usize| -> Result<(), ParseError> {
            let out_of_range = usize::try_from(v).map_or(true, |v| v > n);
            if out_of_range {
                Err(ParseError::VertexOutOfRange {
                    line_no,
                    vertex: v,
                    vertex_count: n,
                })
            } else {
                Ok(())
            }
        };

        match parts.first().copied() {
            Some("p") => {
                let n: usize = parts.get(2).ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
                vertex_count = Some(n);
                graph.vertex_count = n;
            }
            Some("a") => {
                let n = vertex_count.ok_or(ParseError::VertexCountMissing)?;
                let u: i64 = parts.get(1).ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
                let v: i64 = parts.get(2).ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
                let w: i64 = parts.get(3).ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
                in_range(u, n)?;
                in_range(v, n)?;
                let key = (u.min(v), u.max(v));
                if seen.insert(key) {
                    graph.edges.push((u, v, w));
                }
            }
            Some("n") => {
                let n = vertex_count.ok_or(ParseError::VertexCountMissing)?;
                let k: i64 = parts.get(1).ok_or_else(malformed)?.parse().map_err(|_| malformed())?;
                in_range(k, n)?;
                match parts.get(2).copied() {
                    Some("s") => graph.source = Some(k),
                    Some("t") => graph.sink = Some(k),
                    _ => return Err(malformed()),
                }
            }
            _ => return Err(malformed()),
        }
    }

    Ok(graph)
}
