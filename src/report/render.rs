use chrono::{DateTime, SecondsFormat, Utc};

use crate::args::Mode;
use crate::runner::BenchPlan;

use super::{CategoryStats, Report};

/// Fraction divisor for x100 scaled integers.
const PERCENT_DIVISOR: u64 = 100;
/// Microseconds per second.
const US_PER_SEC: u64 = 1_000_000;
/// Microseconds per millisecond.
const US_PER_MS: u64 = 1_000;
/// Milliseconds per second.
const MS_PER_SEC: u64 = 1_000;

pub fn print_run_header(plan: &BenchPlan, started_at: DateTime<Utc>) {
    for line in run_header_lines(plan, started_at) {
        println!("{}", line);
    }
    println!();
}

#[must_use]
pub fn run_header_lines(plan: &BenchPlan, started_at: DateTime<Utc>) -> Vec<String> {
    let mut lines = vec![
        format!("Mode: {}", plan.mode.as_str()),
        format!("Endpoint: {}", plan.url),
        format!("Model: {}", plan.model),
        format!("Requests: {} (max {} in flight)", plan.requests, plan.concurrency),
    ];
    lines.push(plan.timeout.map_or_else(
        || "Timeout: none".to_owned(),
        |timeout| format!("Timeout: {}ms", timeout.as_millis()),
    ));
    lines.push(format!(
        "Started: {}",
        started_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    ));
    lines
}

pub fn print_report(report: &Report) {
    println!();
    for line in report_lines(report) {
        println!("{}", line);
    }
}

#[must_use]
pub fn report_lines(report: &Report) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Duration: {}.{:03}s",
        report.wall_clock_ms / MS_PER_SEC,
        report.wall_clock_ms % MS_PER_SEC
    ));
    lines.push(format!("Total Requests: {}", report.total_requests));
    lines.push(format!(
        "Successful: {} ({}.{:02}%)",
        report.successful_requests,
        report.success_rate_x100 / PERCENT_DIVISOR,
        report.success_rate_x100 % PERCENT_DIVISOR
    ));
    lines.push(format!("Failed: {}", report.failed_requests));

    if let Some(latency) = report.latency.as_ref() {
        lines.push(format!("Avg Latency: {}", format_secs(latency.avg_us)));
        lines.push(format!("Median Latency: {}", format_secs(latency.median_us)));
        lines.push(format!(
            "Min/Max Latency: {} / {}",
            format_secs(latency.min_us),
            format_secs(latency.max_us)
        ));
        lines.push(format!(
            "P50/P90/P99 Latency: {} / {} / {}",
            format_secs(latency.p50_us),
            format_secs(latency.p90_us),
            format_secs(latency.p99_us)
        ));
    }

    lines.push(format!(
        "Avg RPS: {}.{:02}",
        report.requests_per_second_x100 / PERCENT_DIVISOR,
        report.requests_per_second_x100 % PERCENT_DIVISOR
    ));
    if report.successful_requests > 0 {
        lines.push(format!(
            "Tokens/sec: {}.{:02}",
            report.tokens_per_second_x100 / PERCENT_DIVISOR,
            report.tokens_per_second_x100 % PERCENT_DIVISOR
        ));
    }

    lines.push("Categories:".to_owned());
    for category in &report.categories {
        lines.push(category_line(category));
    }

    if report.mode == Mode::Rerank && report.successful_requests > 0 {
        lines.push(report.scores.as_ref().map_or_else(
            || "Top Scores: none parsed".to_owned(),
            |scores| {
                format!(
                    "Top Scores: parsed {}, avg {:.4}, min {:.4}, max {:.4}",
                    scores.parsed, scores.average, scores.min, scores.max
                )
            },
        ));
    }

    lines
}

pub fn print_usage_hint() {
    println!();
    println!("Usage: embench <MODE> [REQUESTS] [CONCURRENT] [OPTIONS]");
    println!("  MODE        embeddings | rerank");
    println!("  REQUESTS    requests to dispatch (default: 100 embeddings, 50 rerank)");
    println!("  CONCURRENT  max requests in flight (default: 6 embeddings, 10 rerank)");
    println!("Run 'embench --help' for the full option list.");
}

fn category_line(category: &CategoryStats) -> String {
    category.latency.as_ref().map_or_else(
        || {
            format!(
                "  {}: sent {}, ok {}, tokens/req {}",
                category.category, category.dispatched, category.successful,
                category.tokens_per_request
            )
        },
        |latency| {
            format!(
                "  {}: sent {}, ok {}, tokens/req {}, avg {}, min {}, max {}",
                category.category,
                category.dispatched,
                category.successful,
                category.tokens_per_request,
                format_secs(latency.avg_us),
                format_secs(latency.min_us),
                format_secs(latency.max_us)
            )
        },
    )
}

/// Renders microseconds as seconds with millisecond precision.
fn format_secs(value_us: u64) -> String {
    format!(
        "{}.{:03}s",
        value_us / US_PER_SEC,
        (value_us % US_PER_SEC) / US_PER_MS
    )
}
