//! Inline emphasis for assistant replies
//!
//! The backend marks important bits (case numbers, issue types) with
//! `**double asterisks**`. Only that form is recognised; everything else is
//! plain text and is rendered as text nodes, never as HTML.

use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
}

fn bold_pattern() -> &'static Regex {
    static BOLD: OnceLock<Regex> = OnceLock::new();
    BOLD.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is valid"))
}

/// Split `text` into plain and bold runs.
///
/// Matching is non-greedy and does not cross line breaks; an unmatched `**`
/// stays literal.
pub fn parse_emphasis(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for captures in bold_pattern().captures_iter(text) {
        let (Some(whole), Some(inner)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        if whole.start() > cursor {
            spans.push(Span::Plain(text[cursor..whole.start()].to_string()));
        }
        spans.push(Span::Bold(inner.as_str().to_string()));
        cursor = whole.end();
    }

    if cursor < text.len() {
        spans.push(Span::Plain(text[cursor..].to_string()));
    }

    spans
}
