use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
};
use super::types::{Mode, PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Async benchmark harness for text-embedding inference endpoints - bounded concurrency, per-request latencies, and percentile summaries for embeddings and rerank APIs."
)]
pub struct BenchArgs {
    /// Benchmark mode
    #[arg(value_enum, ignore_case = true)]
    pub mode: Option<Mode>,

    /// Number of requests to dispatch (default: 100 for embeddings, 50 for rerank)
    #[arg(value_parser = parse_positive_u64)]
    pub requests: Option<PositiveU64>,

    /// Maximum number of requests in flight (default: 6 for embeddings, 10 for rerank)
    #[arg(value_parser = parse_positive_usize)]
    pub concurrent: Option<PositiveUsize>,

    /// Endpoint URL to benchmark
    #[arg(long, short, env = "EMBENCH_URL")]
    pub url: Option<String>,

    /// Model identifier sent in each request payload
    #[arg(long, short, env = "EMBENCH_MODEL")]
    pub model: Option<String>,

    /// Per-request timeout (supports ms/s/m/h; requests wait indefinitely unless set)
    #[arg(long, value_parser = parse_duration_arg)]
    pub timeout: Option<Duration>,

    /// Export the report to a JSON file
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./embench.toml or ./embench.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Disable per-request progress glyphs
    #[arg(long = "no-progress")]
    pub no_progress: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,

    /// Enable verbose logging (sets log level to debug unless overridden by EMBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
