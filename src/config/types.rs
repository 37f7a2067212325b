use std::time::Duration;

use serde::Deserialize;

use crate::args::Mode;
use crate::args::parsers::duration_from_str;
use crate::error::{AppError, AppResult, ConfigError, ValidationError};

#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    pub mode: Option<Mode>,
    pub url: Option<String>,
    pub model: Option<String>,
    pub requests: Option<u64>,
    pub concurrent: Option<usize>,
    pub timeout: Option<DurationValue>,
    pub export_json: Option<String>,
    pub no_progress: Option<bool>,
    pub no_color: Option<bool>,
    pub verbose: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum DurationValue {
    Seconds(u64),
    Text(String),
}

impl DurationValue {
    pub(crate) fn to_duration(&self) -> AppResult<Duration> {
        match self {
            DurationValue::Seconds(secs) => {
                if *secs == 0 {
                    return Err(AppError::config(ConfigError::InvalidTimeout {
                        source: ValidationError::DurationZero,
                    }));
                }
                Ok(Duration::from_secs(*secs))
            }
            DurationValue::Text(text) => duration_from_str(text)
                .map_err(|err| AppError::config(ConfigError::InvalidTimeout { source: err })),
        }
    }
}
