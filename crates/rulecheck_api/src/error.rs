use std::fmt;

use reqwest::StatusCode;

#[derive(Debug)]
pub enum RuleCheckApiError {
    InvalidBaseUrl(String),
    InvalidHeader(String),
    /// The request could not be issued or its body could not be read.
    Request(reqwest::Error),
    /// The server answered with a non-success status.
    Status(StatusCode, String),
}

impl RuleCheckApiError {
    /// Text shown to the user for this failure.
    ///
    /// Status failures carry the message produced by [`failure_message`];
    /// other variants use their display form.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status(_, message) => message.clone(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for RuleCheckApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidBaseUrl(value) => write!(f, "invalid base URL: {value}"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {} {message}", status.as_u16()),
        }
    }
}

impl std::error::Error for RuleCheckApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Request(error) => Some(error),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RuleCheckApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

/// Message for a non-success response: the raw body when it is non-empty,
/// otherwise `HTTP <status>`.
pub fn failure_message(status: StatusCode, body: &str) -> String {
    if body.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        body.to_string()
    }
}
