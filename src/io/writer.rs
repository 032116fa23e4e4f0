//! Output writers
//!
//! - perplexity trace: one value per line, in iteration order
//! - score table: `<node_id> <score>` per line, ascending node id
//! - run summary: pretty-printed JSON
//!
//! Values use `f64`'s `Debug` form, so whole numbers keep their `.0` and
//! every value reads back as a float.

use crate::error::Result;
use crate::pagerank::RankSummary;
use crate::types::NodeId;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub fn write_perplexity<W: Write>(writer: W, history: &[f64]) -> Result<()> {
    let mut out = BufWriter::new(writer);
    for value in history {
        writeln!(out, "{value:?}")?;
    }
    out.flush()?;
    Ok(())
}

/// Write one `<node_id> <score>` line per node.
///
/// The map's ordering gives ascending node ids.
pub fn write_scores<W: Write>(writer: W, scores: &BTreeMap<NodeId, f64>) -> Result<()> {
    let mut out = BufWriter::new(writer);
    for (id, score) in scores {
        writeln!(out, "{id} {score:?}")?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_summary<W: Write>(writer: W, summary: &RankSummary) -> Result<()> {
    let mut out = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut out, summary)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

pub fn write_perplexity_file(path: impl AsRef<Path>, history: &[f64]) -> Result<()> {
    write_perplexity(File::create(path)?, history)
}

pub fn write_scores_file(path: impl AsRef<Path>, scores: &BTreeMap<NodeId, f64>) -> Result<()> {
    write_scores(File::create(path)?, scores)
}

pub fn write_summary_file(path: impl AsRef<Path>, summary: &RankSummary) -> Result<()> {
    write_summary(File::create(path)?, summary)
}
