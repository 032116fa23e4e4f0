//! Top-K extraction with a deterministic order
//!
//! Nodes are ordered by score descending, then by id ascending, so equal
//! scores always come out in the same order.

use crate::error::{Error, Result};
use crate::types::NodeId;
use std::cmp::Ordering;

/// Total order used for ranking: higher score first, lower id on ties
pub fn rank_order(a: (NodeId, f64), b: (NodeId, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0))
}

/// Return the `k` highest-scoring ids.
///
/// `ids[i]` and `scores[i]` describe the same node. Fails with
/// `InvalidArgument` when `k` is zero or larger than the number of nodes.
pub fn top_k(ids: &[NodeId], scores: &[f64], k: usize) -> Result<Vec<NodeId>> {
    debug_assert_eq!(ids.len(), scores.len());

    if k == 0 {
        return Err(Error::InvalidArgument("k must be > 0".to_string()));
    }
    if k > ids.len() {
        return Err(Error::InvalidArgument(format!(
            "k = {k} exceeds node count {}",
            ids.len()
        )));
    }

    let mut indexed: Vec<(NodeId, f64)> = ids.iter().copied().zip(scores.iter().copied()).collect();

    // Partition first so large graphs only fully sort the head
    if k < indexed.len() {
        indexed.select_nth_unstable_by(k - 1, |&a, &b| rank_order(a, b));
        indexed.truncate(k);
    }
    indexed.sort_unstable_by(|&a, &b| rank_order(a, b));

    Ok(indexed.into_iter().map(|(id, _)| id).collect())
}
