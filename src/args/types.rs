use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::num::{NonZeroU64, NonZeroUsize};

use crate::error::ValidationError;

use super::defaults::{
    DEFAULT_EMBEDDINGS_CONCURRENCY, DEFAULT_EMBEDDINGS_MODEL, DEFAULT_EMBEDDINGS_REQUESTS,
    DEFAULT_RERANK_CONCURRENCY, DEFAULT_RERANK_MODEL, DEFAULT_RERANK_REQUESTS,
};

#[derive(Debug, Clone, Copy, ValueEnum, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Embeddings,
    Rerank,
}

impl Mode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Embeddings => "embeddings",
            Mode::Rerank => "rerank",
        }
    }

    #[must_use]
    pub const fn default_requests(self) -> u64 {
        match self {
            Mode::Embeddings => DEFAULT_EMBEDDINGS_REQUESTS,
            Mode::Rerank => DEFAULT_RERANK_REQUESTS,
        }
    }

    #[must_use]
    pub const fn default_concurrency(self) -> usize {
        match self {
            Mode::Embeddings => DEFAULT_EMBEDDINGS_CONCURRENCY,
            Mode::Rerank => DEFAULT_RERANK_CONCURRENCY,
        }
    }

    #[must_use]
    pub const fn default_model(self) -> &'static str {
        match self {
            Mode::Embeddings => DEFAULT_EMBEDDINGS_MODEL,
            Mode::Rerank => DEFAULT_RERANK_MODEL,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveU64(NonZeroU64);

impl PositiveU64 {
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl TryFrom<u64> for PositiveU64 {
    type Error = ValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        NonZeroU64::new(value)
            .map(PositiveU64)
            .ok_or_else(|| ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveU64 {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u64 = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveU64::try_from(value)
    }
}

impl From<PositiveU64> for u64 {
    fn from(value: PositiveU64) -> Self {
        value.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositiveUsize(NonZeroUsize);

impl PositiveUsize {
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl TryFrom<usize> for PositiveUsize {
    type Error = ValidationError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        NonZeroUsize::new(value)
            .map(PositiveUsize)
            .ok_or_else(|| ValidationError::ValueTooSmall { min: 1 })
    }
}

impl std::str::FromStr for PositiveUsize {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: usize = s
            .parse()
            .map_err(|err| ValidationError::InvalidNumber { source: err })?;
        PositiveUsize::try_from(value)
    }
}

impl From<PositiveUsize> for usize {
    fn from(value: PositiveUsize) -> Self {
        value.get()
    }
}
