//! Link file input and ranking output

pub mod loader;
pub mod writer;

pub use loader::{load_graph, load_graph_file, parse_line, read_records, LinkRecord};
pub use writer::{
    write_perplexity, write_perplexity_file, write_scores, write_scores_file, write_summary,
    write_summary_file,
};
