//! rapid-pagerank CLI
//!
//! Loads a link file, ranks it to convergence, writes the perplexity trace
//! and score table, and prints the top pages.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use rapid_pagerank::io;
use rapid_pagerank::{RankConfig, RankEngine};

/// Used when `RUST_LOG` is unset, empty, or unparsable
const DEFAULT_LOG_FILTER: &str = "rapid_pagerank=info";

#[derive(Parser)]
#[command(name = "rapid-pagerank", version)]
#[command(about = "Rank pages of a link graph until perplexity converges")]
struct Args {
    /// Link file: each line is `target source1 source2 ...`
    input: PathBuf,

    /// Where to write one perplexity value per iteration
    #[arg(long, default_value = "perplexity.out")]
    perplexity_out: PathBuf,

    /// Where to write `<page> <score>` lines
    #[arg(long, default_value = "pr_scores.out")]
    scores_out: PathBuf,

    /// Optional JSON summary of the run
    #[arg(long, value_name = "FILE")]
    summary_out: Option<PathBuf>,

    /// Number of top pages to print
    #[arg(short = 'k', long, default_value_t = 100, value_parser = parse_top_k)]
    top_k: usize,

    /// Stop after this many iterations even without convergence
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Sweep large graphs on all cores
    #[arg(long)]
    parallel: bool,

    /// JSON config file; flags given on the command line take precedence
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    let args = Args::parse();
    let started = Instant::now();

    let config = build_config(&args)?;

    let graph = io::load_graph_file(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded"
    );

    let mut engine = RankEngine::with_config(config);
    engine.initialize(&graph)?;
    let outcome = engine.run_to_convergence()?;

    io::write_perplexity_file(&args.perplexity_out, engine.perplexity_history())
        .with_context(|| format!("failed to write {}", args.perplexity_out.display()))?;
    io::write_scores_file(&args.scores_out, &engine.scores()?)
        .with_context(|| format!("failed to write {}", args.scores_out.display()))?;

    // Clamp so small graphs still print every page
    let k = args.top_k.min(engine.node_count());
    if let Some(path) = &args.summary_out {
        io::write_summary_file(path, &engine.summary(k)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }

    let top = engine.top_k(k)?;
    let elapsed = started.elapsed().as_secs_f64();

    println!("Top {k} Pages are:\n{top:?}");
    println!("Processing time: {elapsed} seconds");
    if !outcome.converged {
        tracing::warn!(
            iterations = outcome.iterations,
            "stopped before perplexity converged"
        );
    }
    Ok(())
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Reject `--top-k 0` at parse time, before any work is done.
fn parse_top_k(value: &str) -> std::result::Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(k) => Ok(k),
        Err(err) => Err(err.to_string()),
    }
}

fn build_config(args: &Args) -> Result<RankConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            RankConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => RankConfig::default(),
    };

    if let Some(max_iterations) = args.max_iterations {
        config = config.with_max_iterations(max_iterations);
    }
    if args.parallel {
        config = config.with_parallel(true);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine_debug_enabled(filter: EnvFilter) -> bool {
        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::enabled!(
                target: "rapid_pagerank::pagerank::engine",
                tracing::Level::DEBUG
            )
        })
    }

    #[test]
    fn test_rust_log_directive_is_kept() {
        let filter = log_filter(Some("rapid_pagerank=debug"));
        assert_eq!(filter.to_string(), "rapid_pagerank=debug");
        assert!(engine_debug_enabled(filter));
    }

    #[test]
    fn test_log_filter_fallback() {
        for directives in [None, Some(""), Some("rapid_pagerank=loud")] {
            let filter = log_filter(directives);
            assert_eq!(filter.to_string(), DEFAULT_LOG_FILTER);
            assert!(!engine_debug_enabled(filter));
        }
    }

    #[test]
    fn test_top_k_zero_rejected_at_parse() {
        assert!(Args::try_parse_from(["rapid-pagerank", "links.dat", "--top-k", "0"]).is_err());
        assert!(Args::try_parse_from(["rapid-pagerank", "links.dat", "-k", "-3"]).is_err());

        let args = Args::try_parse_from(["rapid-pagerank", "links.dat", "-k", "5"]).unwrap();
        assert_eq!(args.top_k, 5);
        let args = Args::try_parse_from(["rapid-pagerank", "links.dat"]).unwrap();
        assert_eq!(args.top_k, 100);
    }

    #[test]
    fn test_parse_top_k() {
        assert_eq!(parse_top_k("1"), Ok(1));
        assert_eq!(parse_top_k("0"), Err("must be at least 1".to_string()));
        assert!(parse_top_k("ten").is_err());
    }
}
