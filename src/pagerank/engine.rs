//! Rank engine
//!
//! Runs PageRank as a synchronous power iteration with sink redistribution,
//! recording the perplexity of the score vector after every pass and
//! stopping once the perplexity settles.
//!
//! Lifecycle: `Uninitialized → Initialized → Iterating → Converged`.

use super::perplexity::{perplexity, PerplexityHistory};
use super::ranking;
use super::{RankOutcome, RankSummary, DAMPING};
use crate::error::{Error, Result};
use crate::graph::{CsrGraph, GraphStore};
use crate::types::{NodeId, RankConfig};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Where the engine is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankState {
    Uninitialized,
    Initialized,
    Iterating,
    Converged,
}

impl RankState {
    pub fn as_str(self) -> &'static str {
        match self {
            RankState::Uninitialized => "uninitialized",
            RankState::Initialized => "initialized",
            RankState::Iterating => "iterating",
            RankState::Converged => "converged",
        }
    }
}

impl fmt::Display for RankState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// PageRank engine over a frozen link graph
#[derive(Debug, Clone)]
pub struct RankEngine {
    config: RankConfig,
    state: RankState,
    graph: CsrGraph,
    /// Node id -> CSR index
    index: FxHashMap<NodeId, u32>,
    /// Published scores from the last completed iteration
    scores: Vec<f64>,
    /// Scratch buffer written during a sweep
    pending: Vec<f64>,
    /// Nodes with no out-links, fixed at initialization
    sinks: Vec<u32>,
    history: PerplexityHistory,
}

impl Default for RankEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RankEngine {
    /// Create an uninitialized engine with default settings
    pub fn new() -> Self {
        Self::with_config(RankConfig::default())
    }

    /// Create an uninitialized engine with custom config
    pub fn with_config(config: RankConfig) -> Self {
        Self {
            config,
            state: RankState::Uninitialized,
            graph: CsrGraph::default(),
            index: FxHashMap::default(),
            scores: Vec::new(),
            pending: Vec::new(),
            sinks: Vec::new(),
            history: PerplexityHistory::new(),
        }
    }

    /// Create an engine and initialize it from `store` in one step
    pub fn from_graph(store: &GraphStore) -> Result<Self> {
        let mut engine = Self::new();
        engine.initialize(store)?;
        Ok(engine)
    }

    /// Freeze the topology of `store` and set every score to `1/N`.
    ///
    /// Fails with `EmptyGraph` when the store has no nodes; the engine then
    /// stays uninitialized.
    pub fn initialize(&mut self, store: &GraphStore) -> Result<()> {
        self.require("initialize", &[RankState::Uninitialized])?;
        self.config.validate()?;
        if store.is_empty() {
            return Err(Error::EmptyGraph);
        }

        let graph = CsrGraph::from_store(store);
        let n = graph.num_nodes;
        let initial_score = 1.0 / n as f64;

        self.index = graph
            .ids
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, i as u32))
            .collect();
        self.sinks = graph.sink_nodes();
        self.scores = vec![initial_score; n];
        self.pending = vec![initial_score; n];
        self.graph = graph;
        self.state = RankState::Initialized;

        tracing::debug!(
            nodes = n,
            edges = self.graph.num_edges(),
            sinks = self.sinks.len(),
            "rank engine initialized"
        );
        Ok(())
    }

    /// Run one full update pass and return the resulting perplexity.
    ///
    /// Every pending score is computed from the previous pass's scores before
    /// any of them is published.
    pub fn run_iteration(&mut self) -> Result<f64> {
        self.require(
            "run an iteration",
            &[RankState::Initialized, RankState::Iterating],
        )?;

        self.sweep();
        // Publish all pending scores at once
        std::mem::swap(&mut self.scores, &mut self.pending);

        let value = perplexity(&self.scores);
        self.history.push(value);

        if self.history.is_converged() {
            self.state = RankState::Converged;
            tracing::info!(
                iterations = self.history.len(),
                perplexity = value,
                "perplexity converged"
            );
        } else {
            self.state = RankState::Iterating;
            tracing::debug!(iteration = self.history.len(), perplexity = value);
        }
        Ok(value)
    }

    /// Compute every pending score from the published scores
    fn sweep(&mut self) {
        let n = self.graph.num_nodes;
        let n_f64 = n as f64;

        let sink_mass: f64 = self.sinks.iter().map(|&s| self.scores[s as usize]).sum();
        let base = DAMPING * sink_mass / n_f64 + (1.0 - DAMPING) / n_f64;

        let graph = &self.graph;
        let scores = &self.scores;
        let pull = |(node, slot): (usize, &mut f64)| {
            let inflow: f64 = graph
                .in_links(node as u32)
                .iter()
                .map(|&q| scores[q as usize] / graph.degree(q) as f64)
                .sum();
            *slot = base + DAMPING * inflow;
        };

        if self.config.use_parallel(n) {
            self.pending.par_iter_mut().enumerate().for_each(pull);
        } else {
            self.pending.iter_mut().enumerate().for_each(pull);
        }
    }

    /// Iterate until the perplexity converges.
    ///
    /// With no `max_iterations` in the config this has no bound; a graph
    /// whose perplexity never settles keeps iterating. With a cap, the run
    /// stops after that many total iterations and reports `converged = false`.
    pub fn run_to_convergence(&mut self) -> Result<RankOutcome> {
        self.require(
            "run to convergence",
            &[
                RankState::Initialized,
                RankState::Iterating,
                RankState::Converged,
            ],
        )?;

        let _span = tracing::info_span!("run_to_convergence", nodes = self.graph.num_nodes)
            .entered();

        while self.state != RankState::Converged {
            if let Some(cap) = self.config.max_iterations {
                if self.history.len() >= cap {
                    tracing::warn!(
                        iterations = cap,
                        "iteration cap reached before perplexity converged"
                    );
                    break;
                }
            }
            self.run_iteration()?;
        }

        Ok(self.outcome())
    }

    /// The `k` highest-scoring node ids, ties broken by ascending id.
    ///
    /// Needs at least one completed iteration.
    pub fn top_k(&self, k: usize) -> Result<Vec<NodeId>> {
        self.require("rank nodes", &[RankState::Iterating, RankState::Converged])?;
        ranking::top_k(&self.graph.ids, &self.scores, k)
    }

    /// Current score of every node, ordered by node id
    pub fn scores(&self) -> Result<BTreeMap<NodeId, f64>> {
        self.require_initialized("read scores")?;
        Ok(self
            .graph
            .ids
            .iter()
            .copied()
            .zip(self.scores.iter().copied())
            .collect())
    }

    /// Current score of one node
    pub fn score(&self, id: NodeId) -> Result<f64> {
        self.require_initialized("read scores")?;
        let index = self.index.get(&id).ok_or(Error::NotFound(id))?;
        Ok(self.scores[*index as usize])
    }

    /// Serializable snapshot of the run with the top `k` ids
    pub fn summary(&self, k: usize) -> Result<RankSummary> {
        let top_k = self.top_k(k)?;
        Ok(RankSummary {
            nodes: self.graph.num_nodes,
            edges: self.graph.num_edges(),
            iterations: self.history.len(),
            converged: self.is_converged(),
            perplexity: self.history.as_slice().to_vec(),
            top_k,
        })
    }

    pub fn outcome(&self) -> RankOutcome {
        RankOutcome {
            iterations: self.history.len(),
            converged: self.is_converged(),
            final_perplexity: self.history.last(),
        }
    }

    pub fn state(&self) -> RankState {
        self.state
    }

    pub fn is_converged(&self) -> bool {
        self.state == RankState::Converged
    }

    /// Number of completed iterations
    pub fn iterations(&self) -> usize {
        self.history.len()
    }

    /// Perplexity after each completed iteration, in order
    pub fn perplexity_history(&self) -> &[f64] {
        self.history.as_slice()
    }

    pub fn node_count(&self) -> usize {
        self.graph.num_nodes
    }

    pub fn config(&self) -> &RankConfig {
        &self.config
    }

    fn require_initialized(&self, operation: &'static str) -> Result<()> {
        self.require(
            operation,
            &[
                RankState::Initialized,
                RankState::Iterating,
                RankState::Converged,
            ],
        )
    }

    fn require(&self, operation: &'static str, allowed: &[RankState]) -> Result<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(Error::InvalidState {
                operation,
                state: self.state.as_str(),
            })
        }
    }
}
