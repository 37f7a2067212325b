use std::time::Duration;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::args::{BenchArgs, PositiveU64, PositiveUsize, parsers::parse_duration_arg};
use crate::config::types::ConfigFile;
use crate::config::{apply_config, load_config_file};
use crate::error::AppResult;
use crate::workload;

thread_local! {
    static BASE_MATCHES: ArgMatches = BenchArgs::command().get_matches_from(["embench"]);
}

/// Parses a duration argument (e.g. `10s`, `500ms`).
///
/// # Errors
///
/// Returns an error when the duration is invalid.
pub fn parse_duration_arg_input(input: &str) -> AppResult<Duration> {
    parse_duration_arg(input)
}

/// Parses a positive u64 string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_u64_input(input: &str) -> AppResult<u64> {
    let value: PositiveU64 = input.parse()?;
    Ok(value.get())
}

/// Parses a positive usize string value.
///
/// # Errors
///
/// Returns an error when the value is invalid or zero.
pub fn parse_positive_usize_input(input: &str) -> AppResult<usize> {
    let value: PositiveUsize = input.parse()?;
    Ok(value.get())
}

/// Parses TOML config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_toml(input: &str) -> AppResult<()> {
    let config: ConfigFile = toml::from_str(input)?;
    apply_config_to_defaults(&config)
}

/// Parses JSON config and applies it to defaults.
///
/// # Errors
///
/// Returns an error when parsing or validation fails.
pub fn apply_config_from_json(input: &[u8]) -> AppResult<()> {
    let config: ConfigFile = serde_json::from_slice(input)?;
    apply_config_to_defaults(&config)
}

/// Loads a config file from disk to exercise extension handling.
///
/// # Errors
///
/// Returns an error when the config file cannot be read or parsed.
pub fn load_config_file_input(path: &std::path::Path) -> AppResult<()> {
    load_config_file(path).map(|_config| ())
}

/// Parses a rerank response body into a top score.
#[must_use]
pub fn parse_top_score_input(body: &[u8]) -> Option<f64> {
    workload::parse_top_score(body)
}

fn apply_config_to_defaults(config: &ConfigFile) -> AppResult<()> {
    BASE_MATCHES.with(|matches| {
        let mut args = BenchArgs::from_arg_matches(matches)?;
        apply_config(&mut args, matches, config)
    })
}
