//! rapid-pagerank: PageRank over directed link graphs
//!
//! Scores are computed by synchronous power iteration with uniform
//! redistribution of sink mass and a fixed damping factor of 0.85. Iteration
//! stops once the perplexity of the score vector has the same integer part
//! for four consecutive iterations.
//!
//! # Quick start
//!
//! ```
//! use rapid_pagerank::{GraphStore, RankEngine};
//!
//! let graph = GraphStore::from_edges([(1, 2), (2, 3), (3, 1), (4, 1)]);
//! let mut engine = RankEngine::from_graph(&graph)?;
//! engine.run_iteration()?;
//!
//! let top = engine.top_k(2)?;
//! assert_eq!(top.len(), 2);
//! # Ok::<(), rapid_pagerank::Error>(())
//! ```

pub mod error;
pub mod graph;
pub mod io;
pub mod pagerank;
pub mod types;

pub use error::{Error, Result};
pub use graph::{CsrGraph, GraphNode, GraphStore};
pub use pagerank::{RankEngine, RankOutcome, RankState, RankSummary, DAMPING};
pub use types::{NodeId, RankConfig};
