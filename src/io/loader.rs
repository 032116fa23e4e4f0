//! Link file loader
//!
//! Each line reads `t s1 s2 ... sn`: pages `s1..sn` each link to page `t`.
//! Tokens are separated by any whitespace. Blank lines and lines starting
//! with `#` are skipped. A line holding only `t` registers the page with no
//! links.

use crate::error::{Error, Result};
use crate::graph::GraphStore;
use crate::types::NodeId;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Page being linked to
    pub target: NodeId,
    /// Pages that link to `target`
    pub sources: Vec<NodeId>,
}

impl LinkRecord {
    /// Expand into `(source, target)` edges
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.sources.iter().map(move |&s| (s, self.target))
    }
}

/// Parse one line. `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<Option<LinkRecord>> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut ids = trimmed.split_whitespace().map(|token| {
        token.parse::<NodeId>().map_err(|_| Error::MalformedInput {
            line: line_no,
            token: token.to_string(),
        })
    });

    // Non-empty after trim, so there is at least one token
    let target = match ids.next() {
        Some(id) => id?,
        None => return Ok(None),
    };
    let sources = ids.collect::<Result<Vec<_>>>()?;

    Ok(Some(LinkRecord { target, sources }))
}

/// Iterate over the records of a link file
pub fn read_records<R: BufRead>(reader: R) -> impl Iterator<Item = Result<LinkRecord>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(i, line)| match line {
            Ok(line) => parse_line(&line, i + 1).transpose(),
            Err(e) => Some(Err(e.into())),
        })
}

/// Build a graph from link records.
///
/// Nothing is returned unless every line parses.
pub fn load_graph<R: BufRead>(reader: R) -> Result<GraphStore> {
    let mut store = GraphStore::new();
    for record in read_records(reader) {
        let record = record?;
        store.ensure_node(record.target);
        for (source, target) in record.edges() {
            store.add_edge(source, target);
        }
    }

    tracing::debug!(
        nodes = store.node_count(),
        edges = store.edge_count(),
        "link graph loaded"
    );
    Ok(store)
}

/// Build a graph from a link file on disk
pub fn load_graph_file(path: impl AsRef<Path>) -> Result<GraphStore> {
    let file = File::open(path.as_ref())?;
    load_graph(BufReader::new(file))
}
