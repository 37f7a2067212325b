//! Core library for the `embench` CLI.
//!
//! This crate provides the internal building blocks used by the binary: CLI
//! argument types, configuration parsing, the canned workload tables, request
//! execution, and report aggregation. The primary user-facing interface is
//! the `embench` command-line application; library APIs may evolve as the CLI
//! grows.
pub mod args;
pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod workload;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
