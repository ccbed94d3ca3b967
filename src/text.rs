//! Display-width helpers for aligned plain-text output.

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthChar;

const TAB_WIDTH: usize = 4;

pub fn grapheme_width(grapheme: &str) -> usize {
    let mut width = 0;
    for ch in grapheme.chars() {
        if ch == '\t' {
            width += TAB_WIDTH;
            continue;
        }
        width += UnicodeWidthChar::width(ch).unwrap_or(0);
    }
    width
}

/// Terminal column width of `input`, counting wide (CJK) graphemes as two.
pub fn display_width(input: &str) -> usize {
    input.graphemes(true).map(grapheme_width).sum()
}

/// Pads `input` with spaces up to `width` columns. Wider input is returned as is.
pub fn pad_to_width(input: &str, width: usize) -> String {
    let current = display_width(input);
    let mut out = String::with_capacity(input.len() + width.saturating_sub(current));
    out.push_str(input);
    for _ in current..width {
        out.push(' ');
    }
    out
}

/// Truncates `input` to at most `max_width` columns, ending with `…` when cut.
pub fn truncate_to_width(input: &str, max_width: usize) -> String {
    if display_width(input) <= max_width {
        return input.to_owned();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for grapheme in input.graphemes(true) {
        let width = grapheme_width(grapheme);
        if used + width > max_width - 1 {
            break;
        }
        out.push_str(grapheme);
        used += width;
    }
    out.push('…');
    out
}
