//! Environment configuration.

use std::env;
use std::path::PathBuf;

pub const BASE_URL_ENV: &str = "RULECHECK_BASE_URL";
pub const STATE_PATH_ENV: &str = "RULECHECK_STATE_PATH";
pub const DEBUG_ENV: &str = "RULECHECK_DEBUG";
pub const LANGUAGE_ENV: &str = "RULECHECK_LANGUAGE";
pub const LOG_ENV: &str = "RULECHECK_LOG";

#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    /// Server base URL; the API client applies its own default when unset.
    pub base_url: Option<String>,
    /// Location of the persistent client state file.
    pub state_path: Option<PathBuf>,
    /// Ask the agent endpoint for a tool-call summary.
    pub debug: bool,
    pub language: Option<String>,
    /// `tracing` filter directive.
    pub log_filter: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            base_url: env_string_opt(BASE_URL_ENV),
            state_path: env_string_opt(STATE_PATH_ENV).map(PathBuf::from),
            debug: env_flag(DEBUG_ENV),
            language: env_string_opt(LANGUAGE_ENV),
            log_filter: env_string_opt(LOG_ENV),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value.trim().to_owned())
        }
    })
}
