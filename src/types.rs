//! Shared types: node identifiers and run configuration

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// External page identifier as it appears in the input.
///
/// Ids are arbitrary integers; they need not be contiguous or start at zero.
pub type NodeId = i64;

/// Graphs with at least this many nodes use the parallel sweep when enabled.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 10_000;

/// Configuration for a ranking run
///
/// The damping factor is not configurable; see [`crate::pagerank::DAMPING`].
///
/// # JSON shape
///
/// ```json
/// { "max_iterations": 500, "parallel": true, "parallel_threshold": 20000 }
/// ```
///
/// All fields are optional; unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RankConfig {
    /// Stop after this many iterations even if perplexity has not settled.
    /// `None` iterates until convergence with no bound.
    pub max_iterations: Option<usize>,
    /// Compute pending scores on the rayon pool for large graphs
    pub parallel: bool,
    /// Minimum node count before `parallel` takes effect
    pub parallel_threshold: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            max_iterations: None,
            parallel: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl RankConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of iterations run by `run_to_convergence`
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Enable or disable the parallel sweep
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the node count at which the parallel sweep kicks in
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Parse and validate a config from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == Some(0) {
            return Err(Error::InvalidArgument(
                "max_iterations must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether a graph of `node_count` nodes should be swept in parallel
    pub(crate) fn use_parallel(&self, node_count: usize) -> bool {
        self.parallel && node_count >= self.parallel_threshold
    }
}
