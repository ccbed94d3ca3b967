use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use session_store::SessionId;

/// Field carrying the raw body text when a success response is not JSON.
pub const RAW_TEXT_FIELD: &str = "raw";

/// Request body for `POST /agent`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRequest {
    pub session_id: SessionId,
    pub input: String,
    /// Ask the server for a tool-call summary. Default: false.
    #[serde(default)]
    pub debug: bool,
}

impl AgentRequest {
    pub fn new(session_id: SessionId, input: impl Into<String>) -> Self {
        Self {
            session_id,
            input: input.into(),
            debug: false,
        }
    }
}

/// Request body for `POST /check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRequest {
    pub session_id: SessionId,
    pub language: String,
    pub code: String,
    /// Default: true.
    #[serde(default = "default_true")]
    pub auto_fix: bool,
    /// Default: true.
    #[serde(default = "default_true")]
    pub include_diff: bool,
}

fn default_true() -> bool {
    true
}

impl CheckRequest {
    pub fn new(
        session_id: SessionId,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            language: language.into(),
            code: code.into(),
            auto_fix: true,
            include_diff: true,
        }
    }
}

/// Request body for `POST /rules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddRuleRequest {
    pub language: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub auto_fix: bool,
}

impl AddRuleRequest {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            language: crate::config::DEFAULT_LANGUAGE.to_owned(),
            title: title.into(),
            description: description.into(),
            auto_fix: false,
        }
    }
}

/// Agent reply reduced to what the transcript needs.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentReply {
    pub output: String,
    /// Present when the request asked for `debug`.
    pub tool_summary: Option<Vec<Value>>,
}

impl AgentReply {
    /// Uses the `output` string when present; otherwise the whole decoded
    /// response, pretty-printed.
    pub fn from_value(value: &Value) -> Self {
        let output = value
            .get("output")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            });
        let tool_summary = value
            .get("tool_summary")
            .and_then(Value::as_array)
            .cloned();

        Self {
            output,
            tool_summary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RuleSummary {
    pub id: String,
    pub language: String,
    pub title: String,
    pub description: String,
    pub auto_fix: bool,
}

/// Team rule listing from `GET /rules`, decoded leniently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleListing {
    pub team_name: String,
    pub members: Vec<String>,
    pub rules: Vec<RuleSummary>,
}

impl RuleListing {
    pub fn from_value(value: &Value) -> Self {
        let team_name = str_field(value, "team_name").unwrap_or_else(|| "unknown".to_owned());
        let members = value
            .get("members")
            .and_then(Value::as_array)
            .map(|members| {
                members
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();
        let rules = value
            .get("rules")
            .and_then(Value::as_array)
            .map(|rules| {
                rules
                    .iter()
                    .filter(|rule| rule.is_object())
                    .map(|rule| RuleSummary {
                        id: str_field(rule, "id").unwrap_or_default(),
                        language: str_field(rule, "language").unwrap_or_default(),
                        title: str_field(rule, "title").unwrap_or_default(),
                        description: str_field(rule, "description").unwrap_or_default(),
                        auto_fix: rule
                            .get("auto_fix")
                            .and_then(Value::as_bool)
                            .unwrap_or(false),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            team_name,
            members,
            rules,
        }
    }
}

fn str_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Decodes a response body, falling back to `{"raw": text}` when it is not JSON.
pub fn decode_body(text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|_| json!({ RAW_TEXT_FIELD: text }))
}
