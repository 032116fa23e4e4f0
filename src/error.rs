//! Error types
//!
//! Every fallible operation in the crate reports one of these variants.
//! Nothing is swallowed: a failed call leaves the graph or engine exactly as
//! it was before the call.

use crate::types::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The graph had no nodes when the engine was initialized.
    #[error("cannot rank an empty graph")]
    EmptyGraph,

    #[error("node {0} not found")]
    NotFound(NodeId),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A token in an edge record was not an integer node id.
    #[error("malformed input on line {line}: {token:?} is not a node id")]
    MalformedInput { line: usize, token: String },

    /// An engine operation was called from a state that does not allow it.
    #[error("cannot {operation} while engine is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
