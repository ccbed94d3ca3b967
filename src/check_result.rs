//! Normalizes raw `/check` responses into a stable, renderable shape.
//!
//! [`normalize`] is total: wrong-typed or missing fields fall back to sentinel
//! defaults instead of failing, so the view layer always has something to
//! show and never sees `null`.

use std::fmt;

use serde_json::{Map, Value};

/// Summary shown when the response carries none.
pub const NO_SUMMARY: &str = "no summary";

/// Field name of the fallback object built for undecodable response bodies.
pub const RAW_TEXT_FIELD: &str = "raw";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Unknown,
}

impl Severity {
    /// Lower-cases `raw`; absent means `Warning`, unrecognized means `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Warning;
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "info" => Self::Info,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Unknown,
        }
    }

    /// Display label. `Unknown` is shown as `warning`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning | Self::Unknown => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule_id: String,
    pub title: Option<String>,
    pub message: String,
    pub severity: Severity,
    pub start_line: Option<i64>,
    pub end_line: Option<i64>,
    pub suggestion: Option<String>,
}

impl Violation {
    /// `start~end` when both bounds exist, `start` alone, otherwise `-`.
    pub fn line_range(&self) -> String {
        match (self.start_line, self.end_line) {
            (Some(start), Some(end)) => format!("{start}~{end}"),
            (Some(start), None) => start.to_string(),
            (None, _) => "-".to_owned(),
        }
    }

    fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            rule_id: string_field(fields, "rule_id").unwrap_or_default(),
            title: string_field(fields, "title"),
            message: string_field(fields, "message").unwrap_or_default(),
            severity: Severity::parse(fields.get("severity").and_then(Value::as_str)),
            start_line: line_field(fields, "start_line"),
            end_line: line_field(fields, "end_line"),
            suggestion: string_field(fields, "suggestion"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Server verdict, when reported.
    pub ok: Option<bool>,
    pub summary: String,
    pub violations: Vec<Violation>,
    pub fixed_code: String,
    pub unified_diff: String,
    pub notes: String,
    /// Raw body text when the response could not be decoded.
    pub raw_text: String,
}

impl Default for CheckResult {
    fn default() -> Self {
        Self {
            ok: None,
            summary: NO_SUMMARY.to_owned(),
            violations: Vec::new(),
            fixed_code: String::new(),
            unified_diff: String::new(),
            notes: String::new(),
            raw_text: String::new(),
        }
    }
}

impl CheckResult {
    pub fn has_fix(&self) -> bool {
        !self.fixed_code.is_empty()
    }

    pub fn has_diff(&self) -> bool {
        !self.unified_diff.is_empty()
    }
}

/// Maps any decoded response value to a [`CheckResult`].
///
/// A non-object root is handled like `{}`. A `violations` field that is not a
/// list becomes an empty list; list entries that are not objects are skipped.
pub fn normalize(raw: &Value) -> CheckResult {
    let Some(fields) = raw.as_object() else {
        return CheckResult::default();
    };

    let violations = fields
        .get("violations")
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(Value::as_object)
                .map(Violation::from_fields)
                .collect()
        })
        .unwrap_or_default();

    CheckResult {
        ok: fields.get("ok").and_then(Value::as_bool),
        summary: string_field(fields, "summary").unwrap_or_else(|| NO_SUMMARY.to_owned()),
        violations,
        fixed_code: string_field(fields, "fixed_code").unwrap_or_default(),
        unified_diff: string_field(fields, "unified_diff").unwrap_or_default(),
        notes: string_field(fields, "notes").unwrap_or_default(),
        raw_text: string_field(fields, RAW_TEXT_FIELD).unwrap_or_default(),
    }
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn line_field(fields: &Map<String, Value>, key: &str) -> Option<i64> {
    match fields.get(key)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
