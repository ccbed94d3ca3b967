/// Default base URL of a locally running rule checker server.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

pub const AGENT_PATH: &str = "/agent";
pub const CHECK_PATH: &str = "/check";
pub const HEALTH_PATH: &str = "/health";
pub const RULES_PATH: &str = "/rules";

/// Join a base URL and an endpoint path.
///
/// Normalization rules:
/// 1) a blank base falls back to [`DEFAULT_BASE_URL`]
/// 2) trailing slashes on the base are dropped
/// 3) the path always starts with exactly one `/`
pub fn endpoint_url(base: &str, path: &str) -> String {
    let base = if base.trim().is_empty() {
        DEFAULT_BASE_URL
    } else {
        base.trim()
    };

    let trimmed = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    format!("{trimmed}/{path}")
}
