use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use url::Url;

use crate::args::{BenchArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ValidationError};
use crate::report;
use crate::runner::{self, BenchPlan};

/// Default config filenames checked when no CLI args are provided.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["embench.toml", "embench.json"];

pub(crate) fn run() -> AppResult<()> {
    let (args, matches) = match parse_args()? {
        Some(parsed) => parsed,
        None => return Ok(()),
    };

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_async(args, &matches))
}

fn parse_args() -> AppResult<Option<(BenchArgs, ArgMatches)>> {
    let mut cmd = BenchArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = BenchArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

async fn run_async(args: BenchArgs, matches: &ArgMatches) -> AppResult<()> {
    let plan = build_plan(args, matches)?;
    execute_plan(plan).await
}

fn build_plan(mut args: BenchArgs, matches: &ArgMatches) -> AppResult<BenchPlan> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(&mut args, matches, &config)?;
    }

    let mode = match args.mode {
        Some(mode) => mode,
        None => {
            tracing::error!("Missing mode (pass 'embeddings' or 'rerank', or set it in config).");
            return Err(AppError::validation(ValidationError::MissingMode));
        }
    };
    let url = match args.url {
        Some(url) => url,
        None => {
            tracing::error!("Missing URL (set --url, EMBENCH_URL, or provide in config).");
            return Err(AppError::validation(ValidationError::MissingUrl));
        }
    };
    validate_endpoint(&url)?;

    // The scripts print usage after a run that fell back to default counts.
    let defaulted_counts = args.requests.is_none() && args.concurrent.is_none();

    Ok(BenchPlan {
        mode,
        url,
        model: args
            .model
            .unwrap_or_else(|| mode.default_model().to_owned()),
        requests: args
            .requests
            .map_or_else(|| mode.default_requests(), PositiveU64::get),
        concurrency: args
            .concurrent
            .map_or_else(|| mode.default_concurrency(), PositiveUsize::get),
        timeout: args.timeout,
        export_json: args.export_json,
        no_progress: args.no_progress,
        no_color: args.no_color,
        defaulted_counts,
    })
}

fn validate_endpoint(url: &str) -> AppResult<()> {
    let parsed = Url::parse(url).map_err(|err| {
        AppError::validation(ValidationError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })
    })?;
    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(AppError::validation(ValidationError::UnsupportedScheme {
            scheme: scheme.to_owned(),
        }));
    }
    if parsed.host_str().is_none() {
        return Err(AppError::validation(ValidationError::UrlMissingHost));
    }
    Ok(())
}

/// Individual request failures are reported in the summary; only program
/// errors (client build, export I/O) propagate out of here.
async fn execute_plan(plan: BenchPlan) -> AppResult<()> {
    let client = runner::build_client(&plan)?;

    report::print_run_header(&plan, chrono::Utc::now());

    let outcome = runner::run_batch(&client, &plan).await?;
    let run_report = report::build_report(&outcome, &plan);
    report::print_report(&run_report);

    if let Some(path) = plan.export_json.as_deref() {
        report::export_json(path, &run_report).await?;
        tracing::info!("Report exported to {}", path);
    }

    if plan.defaulted_counts {
        report::print_usage_hint();
    }

    Ok(())
}
