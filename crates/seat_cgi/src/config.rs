//! Environment configuration.

use std::env;
use std::path::PathBuf;

use seat_store::{DEFAULT_EVENT_LOG, DEFAULT_STATE_FILE};

pub const DATA_FILE_VAR: &str = "SEAT_HALL_DATA_FILE";
pub const EVENT_LOG_VAR: &str = "SEAT_HALL_EVENT_LOG";
pub const LOG_FILTER_VAR: &str = "SEAT_HALL_LOG_FILTER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub data_file: PathBuf,
    pub event_log: PathBuf,
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            data_file: env_string_opt(DATA_FILE_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_STATE_FILE), PathBuf::from),
            event_log: env_string_opt(EVENT_LOG_VAR)
                .map_or_else(|| PathBuf::from(DEFAULT_EVENT_LOG), PathBuf::from),
            log_filter: env_string_opt(LOG_FILTER_VAR),
        }
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
