use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use session_store::SessionId;

use crate::config::RuleCheckApiConfig;
use crate::error::{failure_message, RuleCheckApiError};
use crate::headers::build_headers;
use crate::outcome::ApiOutcome;
use crate::payload::{
    decode_body, AddRuleRequest, AgentReply, AgentRequest, CheckRequest, RuleListing,
};
use crate::url::{endpoint_url, AGENT_PATH, CHECK_PATH, HEALTH_PATH, RULES_PATH};

#[derive(Debug, Clone)]
pub struct RuleCheckApiClient {
    http: Client,
    config: RuleCheckApiConfig,
}

impl RuleCheckApiClient {
    pub fn new(config: RuleCheckApiConfig) -> Result<Self, RuleCheckApiError> {
        let endpoint = endpoint_url(&config.base_url, AGENT_PATH);
        reqwest::Url::parse(&endpoint)
            .map_err(|error| RuleCheckApiError::InvalidBaseUrl(format!("{endpoint}: {error}")))?;

        let http = Client::builder().build().map_err(RuleCheckApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &RuleCheckApiConfig {
        &self.config
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.config.debug = debug;
    }

    pub fn endpoint(&self, path: &str) -> String {
        endpoint_url(&self.config.base_url, path)
    }

    pub fn build_headers(&self) -> Result<HeaderMap, RuleCheckApiError> {
        let mut out = HeaderMap::new();
        for (key, value) in build_headers(&self.config) {
            out.insert(
                HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                    RuleCheckApiError::InvalidHeader(format!("invalid header key: {key}"))
                })?,
                HeaderValue::from_str(&value).map_err(|_| {
                    RuleCheckApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    pub fn build_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<RequestBuilder, RuleCheckApiError> {
        let headers = self.build_headers()?;
        let builder = self
            .http
            .request(method, self.endpoint(path))
            .headers(headers);
        Ok(match body {
            Some(body) => builder.json(body),
            None => builder,
        })
    }

    pub fn agent_request(&self, session_id: &SessionId, input: &str) -> AgentRequest {
        let mut request = AgentRequest::new(session_id.clone(), input);
        request.debug = self.config.debug;
        request
    }

    pub fn check_request(
        &self,
        session_id: &SessionId,
        code: &str,
        auto_fix: bool,
        include_diff: bool,
    ) -> CheckRequest {
        let mut request = CheckRequest::new(session_id.clone(), &self.config.language, code);
        request.auto_fix = auto_fix;
        request.include_diff = include_diff;
        request
    }

    /// `POST /agent`.
    pub async fn call_agent(&self, session_id: &SessionId, input: &str) -> ApiOutcome<AgentReply> {
        let request = self.agent_request(session_id, input);
        self.post(AGENT_PATH, &request)
            .await
            .map(|value| AgentReply::from_value(&value))
    }

    /// `POST /check` with the configured language. The success value is the
    /// decoded body, unnormalized.
    pub async fn call_check(
        &self,
        session_id: &SessionId,
        code: &str,
        auto_fix: bool,
        include_diff: bool,
    ) -> ApiOutcome<Value> {
        let request = self.check_request(session_id, code, auto_fix, include_diff);
        self.post(CHECK_PATH, &request).await
    }

    pub async fn call_check_with_language(
        &self,
        session_id: &SessionId,
        language: &str,
        code: &str,
        auto_fix: bool,
        include_diff: bool,
    ) -> ApiOutcome<Value> {
        let mut request = self.check_request(session_id, code, auto_fix, include_diff);
        request.language = language.to_owned();
        self.post(CHECK_PATH, &request).await
    }

    /// `GET /health`; success carries the server's `ok` flag.
    pub async fn health(&self) -> ApiOutcome<bool> {
        self.get(HEALTH_PATH)
            .await
            .map(|value| value.get("ok").and_then(Value::as_bool).unwrap_or(false))
    }

    /// `GET /rules`.
    pub async fn list_rules(&self) -> ApiOutcome<RuleListing> {
        self.get(RULES_PATH)
            .await
            .map(|value| RuleListing::from_value(&value))
    }

    /// `POST /rules`.
    pub async fn add_rule(&self, request: &AddRuleRequest) -> ApiOutcome<Value> {
        self.post(RULES_PATH, request).await
    }

    async fn post<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> ApiOutcome<Value> {
        self.exchange(Method::POST, path, Some(body)).await
    }

    async fn get(&self, path: &str) -> ApiOutcome<Value> {
        self.exchange::<()>(Method::GET, path, None).await
    }

    async fn exchange<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> ApiOutcome<Value> {
        tracing::debug!(method = %method, path, "dispatching request");
        let result = match self.build_request(method, path, body) {
            Ok(request) => self.send(request).await,
            Err(error) => Err(error),
        };

        match result {
            Ok(value) => ApiOutcome::Success(value),
            Err(error) => {
                tracing::warn!(path, error = %error, "request failed");
                ApiOutcome::failure(error.user_message())
            }
        }
    }

    /// Sends once and reads the whole body as text before decoding it.
    pub async fn send(&self, request: RequestBuilder) -> Result<Value, RuleCheckApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(RuleCheckApiError::Status(
                status,
                failure_message(status, &text),
            ));
        }

        Ok(decode_body(&text))
    }
}
