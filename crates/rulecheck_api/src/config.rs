use std::collections::BTreeMap;

use crate::url::DEFAULT_BASE_URL;

pub const DEFAULT_LANGUAGE: &str = "python";

/// Transport configuration for rule checker requests.
#[derive(Debug, Clone)]
pub struct RuleCheckApiConfig {
    /// Server base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Sent as the agent request's `debug` flag.
    pub debug: bool,
    /// Language sent with check requests.
    pub language: String,
}

impl Default for RuleCheckApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            debug: false,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl RuleCheckApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
