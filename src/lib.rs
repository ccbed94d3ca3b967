//! Client-side models for the code rule checker.
//!
//! - [`segment`] splits agent replies into prose and fenced code.
//! - [`check_result`] normalizes `/check` responses into a renderable shape.
//! - [`render`] turns both into plain-text transcript and result views.
//!
//! Both normalizers are total functions: malformed input degrades to sentinel
//! defaults, never to an error.

pub mod check_result;
pub mod config;
pub mod logging;
pub mod render;
pub mod segment;
pub mod text;

pub use check_result::{normalize, CheckResult, Severity, Violation, NO_SUMMARY, RAW_TEXT_FIELD};
pub use config::EnvConfig;
pub use render::{render_check_result, render_entry, Role, Transcript, TranscriptEntry};
pub use segment::{join_segments, segment, Segment, FENCE};
