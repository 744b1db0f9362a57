//! Well-formedness check for converter output.
//!
//! The converter promises that every element it opens is also closed, in
//! nesting order, whatever the input looked like. [`check_balanced`] re-scans
//! a converted string and verifies that promise. It assumes the text between
//! fragments was escaped, so every `<` in the string must start a complete
//! fragment whose quoted attribute values hold no `<` or `"`.

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BalanceError {
    #[error("closing </{tag}> at byte {offset} with no open element")]
    UnexpectedClose { tag: String, offset: usize },

    #[error("closing </{found}> at byte {offset} while <{expected}> is open")]
    Mismatched {
        expected: String,
        found: String,
        offset: usize,
    },

    #[error("<{tag}> is never closed")]
    Unclosed { tag: String },

    #[error("malformed element at byte {offset}")]
    Malformed { offset: usize },

    #[error("unexpected element <{tag}> at byte {offset}")]
    UnknownElement { tag: String, offset: usize },
}

/// A whole fragment, anchored at a `<`: either a closer, or an opener with
/// double-quoted attributes.
fn fragment_regex() -> &'static Regex {
    static FRAGMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    FRAGMENT_REGEX.get_or_init(|| {
        Regex::new(r#"^<(?:/([a-z]+)|([a-z]+)(?:\s+[a-z-]+="[^"<]*")*)\s*>"#)
            .expect("Invalid fragment regex")
    })
}

fn is_known(tag: &str) -> bool {
    matches!(
        tag,
        "a" | "b" | "i" | "u" | "q" | "br" | "img" | "pre" | "code" | "samp" | "span" | "blockquote"
    )
}

fn is_void(tag: &str) -> bool {
    matches!(tag, "br" | "img")
}

/// Checks that the elements in `html` are well formed, balanced and properly
/// nested.
pub fn check_balanced(html: &str) -> Result<(), BalanceError> {
    let mut open: Vec<&str> = Vec::new();
    let mut pos = 0;

    while let Some(found) = html[pos..].find('<') {
        let offset = pos + found;
        let caps = fragment_regex()
            .captures(&html[offset..])
            .ok_or(BalanceError::Malformed { offset })?;
        pos = offset + caps.get(0).map_or(1, |m| m.end());

        let (closing, tag) = match (caps.get(1), caps.get(2)) {
            (Some(tag), _) => (true, tag.as_str()),
            (None, Some(tag)) => (false, tag.as_str()),
            (None, None) => return Err(BalanceError::Malformed { offset }),
        };
        if !is_known(tag) {
            return Err(BalanceError::UnknownElement {
                tag: tag.to_string(),
                offset,
            });
        }
        if is_void(tag) {
            continue;
        }
        if !closing {
            open.push(tag);
            continue;
        }
        match open.pop() {
            Some(expected) if expected == tag => {}
            Some(expected) => {
                return Err(BalanceError::Mismatched {
                    expected: expected.to_string(),
                    found: tag.to_string(),
                    offset,
                });
            }
            None => {
                return Err(BalanceError::UnexpectedClose {
                    tag: tag.to_string(),
                    offset,
                });
            }
        }
    }

    match open.pop() {
        Some(tag) => Err(BalanceError::Unclosed {
            tag: tag.to_string(),
        }),
        None => Ok(()),
    }
}
