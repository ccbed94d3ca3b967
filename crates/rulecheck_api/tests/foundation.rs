use pretty_assertions::assert_eq;
use reqwest::Method;
use rulecheck_api::url::{CHECK_PATH, DEFAULT_BASE_URL};
use rulecheck_api::{endpoint_url, RuleCheckApiClient, RuleCheckApiConfig, RuleCheckApiError};
use serde_json::json;
use session_store::SessionId;

fn session() -> SessionId {
    SessionId::parse("demo-0a1b2c3d").expect("valid session id")
}

#[test]
fn endpoint_url_joins_base_and_path() {
    assert_eq!(
        endpoint_url("http://localhost:8000/", "/check"),
        "http://localhost:8000/check"
    );
    assert_eq!(
        endpoint_url("http://localhost:8000/api", "agent"),
        "http://localhost:8000/api/agent"
    );
    assert_eq!(endpoint_url("   ", "/health"), format!("{DEFAULT_BASE_URL}/health"));
}

#[test]
fn client_rejects_unparseable_base_url() {
    let error = RuleCheckApiClient::new(RuleCheckApiConfig::new("not a url"))
        .expect_err("base url must parse");
    assert!(matches!(error, RuleCheckApiError::InvalidBaseUrl(_)));
}

#[test]
fn agent_request_carries_session_and_debug_flag() {
    let client = RuleCheckApiClient::new(RuleCheckApiConfig::default().with_debug(true))
        .expect("client");
    let request = client.agent_request(&session(), "explain rule PY-IMPORT-001");

    assert_eq!(
        serde_json::to_value(&request).expect("serialize agent request"),
        json!({
            "session_id": "demo-0a1b2c3d",
            "input": "explain rule PY-IMPORT-001",
            "debug": true
        })
    );
}

#[test]
fn check_request_uses_configured_language() {
    let client = RuleCheckApiClient::new(RuleCheckApiConfig::default()).expect("client");
    let request = client.check_request(&session(), "import os\n", false, true);

    assert_eq!(
        serde_json::to_value(&request).expect("serialize check request"),
        json!({
            "session_id": "demo-0a1b2c3d",
            "language": "python",
            "code": "import os\n",
            "auto_fix": false,
            "include_diff": true
        })
    );
}

#[test]
fn build_request_posts_json_to_endpoint() {
    let client = RuleCheckApiClient::new(RuleCheckApiConfig::new("http://127.0.0.1:9/"))
        .expect("client");
    let body = client.check_request(&session(), "x = 1", true, true);
    let request = client
        .build_request(Method::POST, CHECK_PATH, Some(&body))
        .expect("build request")
        .build()
        .expect("request");

    assert_eq!(request.url().as_str(), "http://127.0.0.1:9/check");
    assert_eq!(request.method(), "POST");
    assert_eq!(
        request
            .headers()
            .get("content-type")
            .and_then(|value| value.to_str().ok()),
        Some("application/json")
    );
}
