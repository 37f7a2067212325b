//! Aggregation of request results into the final run report.
mod export;
mod render;
mod stats;


pub use export::export_json;
pub use render::{print_report, print_run_header, print_usage_hint, report_lines, run_header_lines};

use chrono::SecondsFormat;
use serde::Serialize;

use crate::args::Mode;
use crate::runner::{BatchOutcome, BenchPlan, RequestResult};
use crate::workload;

/// Aggregate statistics over one completed run. Latency fields are integer
/// microseconds; rate fields are scaled by 100 (two implied decimals).
#[derive(Debug, Serialize)]
pub struct Report {
    pub mode: Mode,
    pub url: String,
    pub model: String,
    pub started_at: String,
    pub wall_clock_ms: u64,
    pub total_requests: u64,
    pub successful_requests: u64,
    pub failed_requests: u64,
    pub success_rate_x100: u64,
    pub requests_per_second_x100: u64,
    pub tokens_per_second_x100: u64,
    pub successful_tokens: u64,
    pub latency: Option<LatencyStats>,
    pub categories: Vec<CategoryStats>,
    pub scores: Option<ScoreStats>,
}

/// Latency statistics over successful requests only.
#[derive(Debug, Serialize)]
pub struct LatencyStats {
    pub avg_us: u64,
    pub median_us: u64,
    pub min_us: u64,
    pub max_us: u64,
    pub p50_us: u64,
    pub p90_us: u64,
    pub p99_us: u64,
}

#[derive(Debug, Serialize)]
pub struct CategoryStats {
    pub category: &'static str,
    pub dispatched: u64,
    pub successful: u64,
    pub tokens_per_request: u64,
    pub latency: Option<CategoryLatency>,
}

#[derive(Debug, Serialize)]
pub struct CategoryLatency {
    pub avg_us: u64,
    pub min_us: u64,
    pub max_us: u64,
}

/// Statistics over rerank top scores that parsed from response bodies.
#[derive(Debug, Serialize)]
pub struct ScoreStats {
    pub parsed: u64,
    pub average: f64,
    pub min: f64,
    pub max: f64,
}

/// Builds the report from the collected results. Every derived statistic is
/// computed over successes only; a run with zero successes carries `None`
/// in place of latency and score sections.
#[must_use]
pub fn build_report(outcome: &BatchOutcome, plan: &BenchPlan) -> Report {
    let results = &outcome.results;
    let total = u64::try_from(results.len()).unwrap_or(u64::MAX);
    let successful = u64::try_from(
        results
            .iter()
            .filter(|result| result.is_success())
            .count(),
    )
    .unwrap_or(u64::MAX);
    let failed = total.saturating_sub(successful);
    let duration_ms = outcome.wall_clock.as_millis().max(1);

    let successful_tokens = results
        .iter()
        .filter(|result| result.is_success())
        .fold(0u64, |acc, result| acc.saturating_add(result.token_count));

    let mut sample: Vec<u64> = results
        .iter()
        .filter(|result| result.is_success())
        .map(|result| stats::latency_micros(result.latency))
        .collect();
    sample.sort_unstable();

    Report {
        mode: plan.mode,
        url: plan.url.clone(),
        model: plan.model.clone(),
        started_at: outcome
            .started_at
            .to_rfc3339_opts(SecondsFormat::Millis, true),
        wall_clock_ms: u64::try_from(duration_ms).unwrap_or(u64::MAX),
        total_requests: total,
        successful_requests: successful,
        failed_requests: failed,
        success_rate_x100: stats::rate_x100(successful, total),
        requests_per_second_x100: stats::per_second_x100(total, duration_ms),
        tokens_per_second_x100: stats::per_second_x100(successful_tokens, duration_ms),
        successful_tokens,
        latency: build_latency_stats(&sample),
        categories: category_stats(plan.mode, results),
        scores: build_score_stats(plan.mode, results),
    }
}

fn build_latency_stats(sorted: &[u64]) -> Option<LatencyStats> {
    if sorted.is_empty() {
        return None;
    }
    Some(LatencyStats {
        avg_us: stats::average_us(sorted),
        median_us: stats::median_us(sorted),
        min_us: sorted.first().copied().unwrap_or(0),
        max_us: sorted.last().copied().unwrap_or(0),
        p50_us: stats::percentile_us(sorted, 50),
        p90_us: stats::percentile_us(sorted, 90),
        p99_us: stats::percentile_us(sorted, 99),
    })
}

/// One entry per spec-table row, in table order, even when a category
/// received no requests.
fn category_stats(mode: Mode, results: &[RequestResult]) -> Vec<CategoryStats> {
    workload::specs_for(mode)
        .iter()
        .map(|spec| {
            let mut dispatched = 0u64;
            let mut successful = 0u64;
            let mut sample = Vec::new();
            for result in results
                .iter()
                .filter(|result| result.category == spec.category)
            {
                dispatched = dispatched.saturating_add(1);
                if result.is_success() {
                    successful = successful.saturating_add(1);
                    sample.push(stats::latency_micros(result.latency));
                }
            }
            sample.sort_unstable();
            CategoryStats {
                category: spec.category,
                dispatched,
                successful,
                tokens_per_request: workload::token_count(mode, spec),
                latency: build_category_latency(&sample),
            }
        })
        .collect()
}

fn build_category_latency(sorted: &[u64]) -> Option<CategoryLatency> {
    if sorted.is_empty() {
        return None;
    }
    Some(CategoryLatency {
        avg_us: stats::average_us(sorted),
        min_us: sorted.first().copied().unwrap_or(0),
        max_us: sorted.last().copied().unwrap_or(0),
    })
}

fn build_score_stats(mode: Mode, results: &[RequestResult]) -> Option<ScoreStats> {
    if mode != Mode::Rerank {
        return None;
    }
    let scores: Vec<f64> = results.iter().filter_map(|result| result.top_score).collect();
    if scores.is_empty() {
        return None;
    }
    let sum: f64 = scores.iter().sum();
    let min = scores.iter().copied().fold(f64::INFINITY, f64::min);
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(ScoreStats {
        parsed: u64::try_from(scores.len()).unwrap_or(u64::MAX),
        average: sum / scores.len() as f64,
        min,
        max,
    })
}
