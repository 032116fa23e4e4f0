//! PageRank with perplexity-based convergence
//!
//! [`engine::RankEngine`] drives the iteration; [`perplexity`] and
//! [`ranking`] hold the pure pieces it is built from.

pub mod engine;
pub mod perplexity;
pub mod ranking;

pub use engine::{RankEngine, RankState};

use crate::types::NodeId;
use serde::Serialize;

/// Probability of following a link rather than jumping to a random page
pub const DAMPING: f64 = 0.85;

/// How a call to `run_to_convergence` ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOutcome {
    /// Total iterations completed by the engine
    pub iterations: usize,
    /// Whether the perplexity settled (false only when an iteration cap hit first)
    pub converged: bool,
    /// Perplexity after the last iteration
    pub final_perplexity: Option<f64>,
}

/// Serializable record of a finished run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankSummary {
    pub nodes: usize,
    pub edges: usize,
    pub iterations: usize,
    pub converged: bool,
    /// Perplexity after each iteration, in order
    pub perplexity: Vec<f64>,
    /// Highest-ranked node ids, best first
    pub top_k: Vec<NodeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_json_shape() {
        let summary = RankSummary {
            nodes: 3,
            edges: 2,
            iterations: 4,
            converged: true,
            perplexity: vec![2.5, 2.25, 2.75, 2.5],
            top_k: vec![7, 1],
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["nodes"], 3);
        assert_eq!(json["converged"], true);
        assert_eq!(json["perplexity"][1], 2.25);
        assert_eq!(json["top_k"], serde_json::json!([7, 1]));
    }
}
