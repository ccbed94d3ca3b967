use pretty_assertions::assert_eq;
use rulecheck_client::{join_segments, segment, Segment};

#[test]
fn text_without_fences_round_trips_as_one_prose_segment() {
    for text in ["", "   ", "plain text", "multi\nline\n", "a `single` tick ``double``"] {
        assert_eq!(segment(text), vec![Segment::prose(text)], "input: {text:?}");
    }
}

#[test]
fn prose_code_prose_with_language_tag() {
    let text = "Here is the fix:\n```python\nimport os\n```\nDone.";
    assert_eq!(
        segment(text),
        vec![
            Segment::prose("Here is the fix:\n"),
            Segment::code(Some("python"), "import os"),
            Segment::prose("\nDone."),
        ]
    );
}

#[test]
fn blank_surrounding_prose_is_omitted() {
    assert_eq!(
        segment("  \n```sh\nls\n```\n\n"),
        vec![Segment::code(Some("sh"), "ls")]
    );
}

#[test]
fn untagged_block_has_no_language() {
    assert_eq!(segment("```\nfoo\n```"), vec![Segment::code(None, "foo")]);
}

#[test]
fn language_tags_accept_digits_underscores_and_dashes() {
    assert_eq!(
        segment("```objective-c_2\nint x;\n```"),
        vec![Segment::code(Some("objective-c_2"), "int x;")]
    );
}

#[test]
fn odd_fence_count_is_segmented_leniently() {
    assert_eq!(
        segment("a\n```\nb\n```\nc\n```py\nd"),
        vec![
            Segment::prose("a\n"),
            Segment::code(None, "b"),
            Segment::prose("\nc\n"),
            Segment::code(Some("py"), "d"),
        ]
    );
}

#[test]
fn segment_join_segment_is_idempotent() {
    let inputs = [
        "intro\n```python\ndef f():\n    return 1\n```\noutro",
        "```\nno tag\n```",
        "```rust\n\n\nfn main() {}\n```\n\nthen text\n```toml\n[a]\nb = 1\n```",
        "only prose",
    ];

    for input in inputs {
        let first = segment(input);
        let second = segment(&join_segments(&first));
        assert_eq!(second, first, "input: {input:?}");
    }
}
