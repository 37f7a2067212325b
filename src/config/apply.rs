use clap::ArgMatches;
use clap::parser::ValueSource;

use crate::args::{BenchArgs, PositiveU64, PositiveUsize};
use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// Applies configuration values to CLI arguments.
///
/// Values given on the command line always win over the config file.
///
/// # Errors
///
/// Returns an error when config values are invalid.
pub fn apply_config(
    args: &mut BenchArgs,
    matches: &ArgMatches,
    config: &ConfigFile,
) -> AppResult<()> {
    if !is_cli(matches, "mode")
        && let Some(mode) = config.mode
    {
        args.mode = Some(mode);
    }

    if !is_cli(matches, "url")
        && let Some(url) = config.url.clone()
    {
        args.url = Some(url);
    }

    if !is_cli(matches, "model")
        && let Some(model) = config.model.clone()
    {
        args.model = Some(model);
    }

    if !is_cli(matches, "requests")
        && let Some(requests) = config.requests
    {
        args.requests = Some(ensure_positive_u64(requests, "requests")?);
    }

    if !is_cli(matches, "concurrent")
        && let Some(concurrent) = config.concurrent
    {
        args.concurrent = Some(ensure_positive_usize(concurrent, "concurrent")?);
    }

    if !is_cli(matches, "timeout")
        && let Some(timeout) = config.timeout.as_ref()
    {
        args.timeout = Some(timeout.to_duration()?);
    }

    if !is_cli(matches, "export_json")
        && let Some(path) = config.export_json.clone()
    {
        args.export_json = Some(path);
    }

    if !is_cli(matches, "no_progress")
        && let Some(no_progress) = config.no_progress
    {
        args.no_progress = no_progress;
    }

    if !is_cli(matches, "no_color")
        && let Some(no_color) = config.no_color
    {
        args.no_color = no_color;
    }

    if !is_cli(matches, "verbose")
        && let Some(verbose) = config.verbose
    {
        args.verbose = verbose;
    }

    Ok(())
}

fn is_cli(matches: &ArgMatches, name: &str) -> bool {
    matches.value_source(name) == Some(ValueSource::CommandLine)
}

fn ensure_positive_u64(value: u64, field: &str) -> AppResult<PositiveU64> {
    PositiveU64::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}

fn ensure_positive_usize(value: usize, field: &str) -> AppResult<PositiveUsize> {
    PositiveUsize::try_from(value).map_err(|err| {
        AppError::config(ConfigError::FieldMustBePositive {
            field: field.to_owned(),
            source: err,
        })
    })
}
