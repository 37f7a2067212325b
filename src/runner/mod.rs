//! Bounded-concurrency request dispatch and result collection.
mod progress;


use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use reqwest::Client;
use tokio::sync::{Semaphore, mpsc};
use tracing::debug;

use crate::args::{DEFAULT_USER_AGENT, Mode};
use crate::error::{AppError, AppResult, HttpError};
use crate::workload;

use progress::ProgressPrinter;

/// Status recorded when no HTTP status was observed (connection refused,
/// DNS failure, timeout, or a broken body stream).
pub const TRANSPORT_FAILURE_STATUS: u16 = 0;

const SUCCESS_STATUS: u16 = 200;

const RESULT_PREALLOC_LIMIT: usize = 65_536;

/// Everything one run needs, resolved from CLI, env, and config.
#[derive(Debug, Clone)]
pub struct BenchPlan {
    pub mode: Mode,
    pub url: String,
    pub model: String,
    pub requests: u64,
    pub concurrency: usize,
    pub timeout: Option<Duration>,
    pub export_json: Option<String>,
    pub no_progress: bool,
    pub no_color: bool,
    pub defaulted_counts: bool,
}

/// Outcome of one dispatched request. Failures are data here, never errors.
#[derive(Debug, Clone)]
pub struct RequestResult {
    pub id: u64,
    pub status: u16,
    pub latency: Duration,
    pub category: &'static str,
    pub token_count: u64,
    pub top_score: Option<f64>,
}

impl RequestResult {
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}

#[derive(Debug)]
pub struct BatchOutcome {
    pub results: Vec<RequestResult>,
    pub wall_clock: Duration,
    pub started_at: DateTime<Utc>,
}

/// Builds the HTTP client shared by every request in the run. No request
/// timeout is set unless the plan carries one.
///
/// # Errors
///
/// Returns an error when the client cannot be constructed (TLS backend
/// initialization failure).
pub fn build_client(plan: &BenchPlan) -> AppResult<Client> {
    let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if let Some(timeout) = plan.timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}

/// Dispatches `plan.requests` requests with at most `plan.concurrency` in
/// flight, and collects exactly one [`RequestResult`] per request.
///
/// # Errors
///
/// Returns an error when a dispatched task panics or the collector hangs
/// up early. Per-request HTTP and transport failures are recorded in the
/// results instead.
pub async fn run_batch(client: &Client, plan: &BenchPlan) -> AppResult<BatchOutcome> {
    let started_at = Utc::now();
    let gate = Arc::new(Semaphore::new(plan.concurrency));
    let (result_tx, result_rx) = mpsc::unbounded_channel();
    let printer = ProgressPrinter::new(!plan.no_progress, plan.no_color);
    let expected = usize::try_from(plan.requests).unwrap_or(usize::MAX);
    let collector = tokio::spawn(collect_results(result_rx, expected, printer));

    let run_start = Instant::now();
    let mut workers = Vec::with_capacity(expected.min(RESULT_PREALLOC_LIMIT));
    for id in 1..=plan.requests {
        let permit = Arc::clone(&gate)
            .acquire_owned()
            .await
            .map_err(|err| AppError::http(HttpError::GateClosed { source: err }))?;
        let client = client.clone();
        let result_tx = result_tx.clone();
        let mode = plan.mode;
        let model = plan.model.clone();
        let url = plan.url.clone();
        workers.push(tokio::spawn(async move {
            let result = dispatch_request(&client, mode, &model, &url, id).await;
            drop(permit);
            result_tx.send(result).is_ok()
        }));
    }
    drop(result_tx);

    let mut delivered = true;
    for worker in workers {
        if !worker.await? {
            delivered = false;
        }
    }
    if !delivered {
        return Err(AppError::http(HttpError::CollectorClosed));
    }

    let results = collector.await?;
    let wall_clock = run_start.elapsed();

    Ok(BatchOutcome {
        results,
        wall_clock,
        started_at,
    })
}

async fn dispatch_request(
    client: &Client,
    mode: Mode,
    model: &str,
    url: &str,
    id: u64,
) -> RequestResult {
    let spec = workload::spec_for(mode, id);
    let payload = workload::build_payload(mode, model, spec);
    let token_count = workload::token_count(mode, spec);

    let started = Instant::now();
    let (status, body) = match client.post(url).json(&payload).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            match response.bytes().await {
                Ok(bytes) => (status, Some(bytes)),
                Err(err) => {
                    debug!("Request {} body read failed: {}", id, err);
                    (TRANSPORT_FAILURE_STATUS, None)
                }
            }
        }
        Err(err) => {
            debug!("Request {} failed: {}", id, err);
            (TRANSPORT_FAILURE_STATUS, None)
        }
    };
    let latency = started.elapsed();

    let top_score = if mode == Mode::Rerank && status == SUCCESS_STATUS {
        body.as_deref().and_then(workload::parse_top_score)
    } else {
        None
    };

    RequestResult {
        id,
        status,
        latency,
        category: spec.category,
        token_count,
        top_score,
    }
}

async fn collect_results(
    mut result_rx: mpsc::UnboundedReceiver<RequestResult>,
    expected: usize,
    mut printer: ProgressPrinter,
) -> Vec<RequestResult> {
    let mut results = Vec::with_capacity(expected.min(RESULT_PREALLOC_LIMIT));
    while let Some(result) = result_rx.recv().await {
        printer.record(&result);
        results.push(result);
    }
    printer.finish();
    results
}
