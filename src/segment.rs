//! Splits chat message text into alternating prose and fenced-code segments.
//!
//! Splitting is lenient: an unterminated fence is not an error. The trailing
//! piece is classified by its position like every other piece.

use std::sync::OnceLock;

use regex::Regex;

/// Triple-backtick fence delimiter.
pub const FENCE: &str = "```";

/// One unit of a parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Prose {
        text: String,
    },
    Code {
        language: Option<String>,
        body: String,
    },
}

impl Segment {
    pub fn prose(text: impl Into<String>) -> Self {
        Self::Prose { text: text.into() }
    }

    pub fn code(language: Option<&str>, body: impl Into<String>) -> Self {
        Self::Code {
            language: language.map(str::to_owned),
            body: body.into(),
        }
    }

    /// Prose that is empty after trimming. Code segments are never blank.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Prose { text } => text.trim().is_empty(),
            Self::Code { .. } => false,
        }
    }
}

fn language_tag_regex() -> &'static Regex {
    static CACHED: OnceLock<Regex> = OnceLock::new();
    CACHED.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_-]+$").expect("language tag regex must compile")
    })
}

/// Maps raw message text to ordered segments.
///
/// With no fence in `text` the result is a single prose segment holding the
/// input unchanged, even when it is empty. Otherwise pieces alternate prose
/// (even index) and code (odd index); whitespace-only prose is dropped.
///
/// A code piece whose first line is a bare identifier uses that line as its
/// language tag. This includes a one-line block such as "```rust```", which
/// becomes an empty `rust` block rather than a block containing `rust`.
pub fn segment(text: &str) -> Vec<Segment> {
    let pieces: Vec<&str> = text.split(FENCE).collect();
    if pieces.len() == 1 {
        return vec![Segment::prose(text)];
    }

    let mut segments = Vec::with_capacity(pieces.len());
    for (index, piece) in pieces.into_iter().enumerate() {
        if index % 2 == 0 {
            if !piece.trim().is_empty() {
                segments.push(Segment::prose(piece));
            }
        } else {
            segments.push(code_segment(piece));
        }
    }
    segments
}

fn code_segment(piece: &str) -> Segment {
    let (language, body) = match piece.split_once('\n') {
        Some((first, rest)) if is_language_tag(first) => (Some(first.trim()), rest),
        None if is_language_tag(piece) => (Some(piece.trim()), ""),
        _ => (None, piece),
    };

    let body = body.trim_start_matches('\n');
    let body = body
        .strip_suffix("\r\n")
        .or_else(|| body.strip_suffix('\n'))
        .unwrap_or(body);

    Segment::code(language, body)
}

fn is_language_tag(line: &str) -> bool {
    language_tag_regex().is_match(line.trim())
}

/// Renders segments back into fenced message text.
///
/// For text produced by [`segment`], `segment(&join_segments(&segment(t)))`
/// equals `segment(t)`.
pub fn join_segments(segments: &[Segment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Prose { text } => out.push_str(text),
            Segment::Code { language, body } => {
                out.push_str(FENCE);
                out.push_str(language.as_deref().unwrap_or(""));
                out.push('\n');
                out.push_str(body);
                out.push('\n');
                out.push_str(FENCE);
            }
        }
    }
    out
}
