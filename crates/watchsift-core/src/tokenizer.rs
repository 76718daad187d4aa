//! Comment-aware splitting of raw watchlist text into symbols.
//!
//! Accepted syntax:
//!
//! - separators: one or more of `,`, `\n`, `\r`
//! - block comments: `/* ... */`, may span lines; an unclosed `/*` runs to end of text
//! - line comments: fragments starting with `###`, `//` or `#`

use crate::domain::{Symbol, SymbolSequence};

const BLOCK_COMMENT_OPEN: &str = "/*";
const BLOCK_COMMENT_CLOSE: &str = "*/";

/// Fragments starting with any of these are dropped.
pub const LINE_COMMENT_MARKERS: [&str; 3] = ["###", "//", "#"];

/// Split `text` into trimmed, non-comment symbols in source order.
pub fn tokenize(text: &str) -> SymbolSequence {
    let stripped = strip_block_comments(text);
    stripped
        .split(is_separator)
        .filter(|fragment| !is_line_comment(fragment.trim()))
        .filter_map(|fragment| Symbol::parse(fragment).ok())
        .collect()
}

/// Remove every `/* ... */` block, non-greedy.
pub fn strip_block_comments(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find(BLOCK_COMMENT_OPEN) {
        output.push_str(&rest[..open]);
        let body = &rest[open + BLOCK_COMMENT_OPEN.len()..];
        match body.find(BLOCK_COMMENT_CLOSE) {
            Some(close) => rest = &body[close + BLOCK_COMMENT_CLOSE.len()..],
            None => return output,
        }
    }

    output.push_str(rest);
    output
}

fn is_separator(ch: char) -> bool {
    matches!(ch, ',' | '\n' | '\r')
}

fn is_line_comment(fragment: &str) -> bool {
    LINE_COMMENT_MARKERS
        .iter()
        .any(|marker| fragment.starts_with(marker))
}
