//! Plain-text transcript and check result views.

use std::io::{self, Write};

use crate::check_result::CheckResult;
use crate::segment::{segment, Segment};
use crate::text::{display_width, pad_to_width, truncate_to_width};

const CODE_INDENT: &str = "    ";
const MESSAGE_COLUMN_MAX: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant => "AI",
            Self::System => "--",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub role: Role,
    pub text: String,
}

/// Append-only conversation log, in the order results resolved.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends an entry and returns a reference to it.
    pub fn push(&mut self, role: Role, text: impl Into<String>) -> &TranscriptEntry {
        self.entries.push(TranscriptEntry {
            role,
            text: text.into(),
        });
        let last = self.entries.len() - 1;
        &self.entries[last]
    }

    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }
}

/// Writes one transcript entry: prose as-is, code blocks indented under a
/// `[language]` header. Blank prose is skipped.
pub fn write_entry(out: &mut impl Write, entry: &TranscriptEntry) -> io::Result<()> {
    let segments: Vec<Segment> = segment(&entry.text)
        .into_iter()
        .filter(|segment| !segment.is_blank())
        .collect();

    write!(out, "{}> ", entry.role.label())?;
    if segments.is_empty() {
        return writeln!(out);
    }

    for (index, segment) in segments.iter().enumerate() {
        match segment {
            Segment::Prose { text } => {
                let text = if index == 0 { text.trim_start() } else { text.as_str() };
                writeln!(out, "{}", text.trim_end())?;
            }
            Segment::Code { language, body } => {
                if index == 0 {
                    writeln!(out)?;
                }
                writeln!(out, "{CODE_INDENT}[{}]", language.as_deref().unwrap_or("code"))?;
                for line in body.lines() {
                    writeln!(out, "{CODE_INDENT}{line}")?;
                }
            }
        }
    }
    Ok(())
}

pub fn render_entry(entry: &TranscriptEntry) -> String {
    let mut out = Vec::new();
    // Writing into a Vec cannot fail.
    let _ = write_entry(&mut out, entry);
    String::from_utf8_lossy(&out).into_owned()
}

/// Renders a normalized check result as a summary line, a violation table,
/// then fixed code and diff sections when present.
pub fn render_check_result(result: &CheckResult) -> String {
    let mut out = String::new();
    out.push_str(&result.summary);
    out.push('\n');

    if !result.violations.is_empty() {
        out.push('\n');
        out.push_str(&render_violation_table(result));
    }

    if result.has_fix() {
        push_section(&mut out, "fixed code", &result.fixed_code);
    }
    if result.has_diff() {
        push_section(&mut out, "diff", &result.unified_diff);
    }
    if !result.notes.is_empty() {
        push_section(&mut out, "notes", &result.notes);
    }
    if !result.raw_text.is_empty() {
        push_section(&mut out, "raw response", &result.raw_text);
    }
    out
}

fn push_section(out: &mut String, title: &str, body: &str) {
    out.push('\n');
    out.push_str(&format!("== {title} ==\n"));
    out.push_str(body);
    if !body.ends_with('\n') {
        out.push('\n');
    }
}

fn render_violation_table(result: &CheckResult) -> String {
    let header = ["severity", "lines", "rule", "message", "suggestion"];
    let rows: Vec<[String; 5]> = result
        .violations
        .iter()
        .map(|violation| {
            let message = match violation.title.as_deref() {
                Some(title) if !title.is_empty() => format!("{title}: {}", violation.message),
                _ => violation.message.clone(),
            };
            [
                violation.severity.label().to_owned(),
                violation.line_range(),
                violation.rule_id.clone(),
                truncate_to_width(&message, MESSAGE_COLUMN_MAX),
                violation.suggestion.clone().unwrap_or_default(),
            ]
        })
        .collect();

    let mut widths = header.map(display_width);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(display_width(cell));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header.map(str::to_owned), &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| pad_to_width(cell, *width))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
