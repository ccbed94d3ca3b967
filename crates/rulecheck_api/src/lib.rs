//! Transport client for the rule checker's agent and check endpoints.
//!
//! Each call is one POST (or GET) with no retries, timeouts or cancellation.
//! The response body is always read as text before any JSON decoding, and
//! every failure collapses into [`ApiOutcome::Failure`] so callers always
//! have something to render.
//!
//! Failure classification:
//! - transport failures and non-success statuses become `Failure` with the raw
//!   body as message, or `HTTP <status>` when the body is empty;
//! - a success status with an undecodable body becomes `Success` wrapping
//!   `{"raw": <text>}`;
//! - missing fields are left for the caller's lenient normalizers.

pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod outcome;
pub mod payload;
pub mod url;

pub use client::RuleCheckApiClient;
pub use config::RuleCheckApiConfig;
pub use error::RuleCheckApiError;
pub use outcome::ApiOutcome;
pub use payload::{AddRuleRequest, AgentReply, AgentRequest, CheckRequest, RuleListing, RuleSummary};
pub use url::endpoint_url;
