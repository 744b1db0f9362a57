//! # Lexer - Tokenizing BBCode Source
//!
//! This module breaks source text into tokens using the [Logos] lexer
//! generator plus a small hand-written scanner for tag syntax.
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## Token Shapes
//!
//! ```text
//! "a [b]x[/b]\n" → [Text("a "), Open(b), Text("x"), Close(b), LineFeed]
//! ```
//!
//! - `\r` and `\n` are single-character tokens.
//! - `[name]` and `[name=payload]` are opening tags.
//! - `[/name]` is a closing tag.
//! - Everything else is text, merged into maximal runs.
//!
//! ## Bounded Matching
//!
//! Logos only recognises the `[` byte. The `scan_tag` callback then looks at
//! a bounded window after it: at most 16 name letters and at most 256 payload
//! characters. If that window does not form a known tag, the callback rejects
//! the match and the `[` becomes text. Each `[` is examined at most once, so
//! lexing is linear in the input no matter how many unterminated brackets it
//! contains.
//!
//! ## The Lossless Guarantee
//!
//! Every byte of the input is covered by exactly one token span:
//!
//! ```
//! use tiny_bbcode_syntax::lexer::lex_with_spans;
//!
//! let input = "[b]bold[/b] and [blink]not a tag[/blink]\n";
//! let mut end = 0;
//! for (_, span) in lex_with_spans(input) {
//!     assert_eq!(span.start, end);
//!     end = span.end;
//! }
//! assert_eq!(end, input.len());
//! ```

use std::ops::Range;

use logos::{Lexer, Logos};

use crate::tag_name::TagName;

/// Longest payload, in characters, accepted after `=`.
pub const MAX_PAYLOAD_CHARS: usize = 256;

/// A recognised tag as seen by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagToken<'a> {
    pub closing: bool,
    pub name: TagName,
    pub payload: Option<&'a str>,
}

/// Raw Logos tokens. Text runs stop at every `[` so the tag callback gets a
/// chance to run; [`Tokenizer`] merges the pieces back together.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken<'a> {
    #[token("\r")]
    CarriageReturn,

    #[token("\n")]
    LineFeed,

    #[token("[", scan_tag)]
    Tag(TagToken<'a>),

    #[regex(r"[^\[\r\n]+")]
    Text,
}

/// Logos callback for `[`. Extends the token over the whole tag on success.
fn scan_tag<'a>(lex: &mut Lexer<'a, RawToken<'a>>) -> Option<TagToken<'a>> {
    let (tag, len) = match_tag(lex.remainder())?;
    lex.bump(len);
    Some(tag)
}

/// Matches the text following a `[` against `/?name(=payload)?]`.
///
/// Returns the tag and the number of bytes it occupies after the `[`.
fn match_tag(rest: &str) -> Option<(TagToken<'_>, usize)> {
    let bytes = rest.as_bytes();
    let closing = bytes.first() == Some(&b'/');
    let name_start = usize::from(closing);

    let name_len = bytes[name_start..]
        .iter()
        .take(TagName::MAX_LEN + 1)
        .take_while(|b| b.is_ascii_lowercase())
        .count();
    if name_len == 0 || name_len > TagName::MAX_LEN {
        return None;
    }
    let name_end = name_start + name_len;
    let name = TagName::from_name(&rest[name_start..name_end])?;

    match bytes.get(name_end)? {
        b']' => Some((
            TagToken {
                closing,
                name,
                payload: None,
            },
            name_end + 1,
        )),
        b'=' if !closing => {
            let payload_start = name_end + 1;
            let payload_len = scan_payload(&rest[payload_start..])?;
            let payload_end = payload_start + payload_len;
            Some((
                TagToken {
                    closing,
                    name,
                    payload: Some(&rest[payload_start..payload_end]),
                },
                payload_end + 1,
            ))
        }
        _ => None,
    }
}

/// Returns the byte length of a payload terminated by `]`.
fn scan_payload(rest: &str) -> Option<usize> {
    for (count, (idx, ch)) in rest.char_indices().enumerate() {
        if ch == ']' {
            return (count > 0).then_some(idx);
        }
        if count == MAX_PAYLOAD_CHARS || !is_payload_char(ch) {
            return None;
        }
    }
    None
}

fn is_payload_char(ch: char) -> bool {
    !('\0'..='\x1f').contains(&ch)
        && !matches!(ch, '"' | '\'' | '(' | ')' | '<' | '>' | '[' | ']')
}

/// A token in BBCode source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text between recognised tokens.
    Text(&'a str),
    /// A single `\r`.
    CarriageReturn,
    /// A single `\n`.
    LineFeed,
    /// `[name]` or `[name=payload]`.
    Open {
        name: TagName,
        payload: Option<&'a str>,
    },
    /// `[/name]`.
    Close(TagName),
}

impl<'a> From<TagToken<'a>> for Token<'a> {
    fn from(tag: TagToken<'a>) -> Self {
        if tag.closing {
            Token::Close(tag.name)
        } else {
            Token::Open {
                name: tag.name,
                payload: tag.payload,
            }
        }
    }
}

/// Lazy token stream over BBCode source, yielding each token with its byte
/// span in the input.
pub struct Tokenizer<'a> {
    source: &'a str,
    lexer: Lexer<'a, RawToken<'a>>,
    pending: Option<(Token<'a>, Range<usize>)>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            lexer: RawToken::lexer(source),
            pending: None,
        }
    }

    /// The input being tokenized.
    pub fn source(&self) -> &'a str {
        self.source
    }

    fn text(&self, span: Range<usize>) -> (Token<'a>, Range<usize>) {
        (Token::Text(&self.source[span.clone()]), span)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = (Token<'a>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }

        let mut run: Option<Range<usize>> = None;
        while let Some(result) = self.lexer.next() {
            let span = self.lexer.span();
            let token = match result {
                Ok(RawToken::CarriageReturn) => Token::CarriageReturn,
                Ok(RawToken::LineFeed) => Token::LineFeed,
                Ok(RawToken::Tag(tag)) => tag.into(),
                // A rejected `[` is plain text, same as a text run
                Ok(RawToken::Text) | Err(()) => {
                    run = Some(match run {
                        Some(run) => run.start..span.end,
                        None => span,
                    });
                    continue;
                }
            };

            return match run {
                Some(run) => {
                    self.pending = Some((token, span));
                    Some(self.text(run))
                }
                None => Some((token, span)),
            };
        }

        run.map(|run| self.text(run))
    }
}

/// Lex the input into a sequence of tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    Tokenizer::new(input).map(|(token, _)| token).collect()
}

/// Lex and return tokens along with their byte spans.
pub fn lex_with_spans(input: &str) -> Vec<(Token<'_>, Range<usize>)> {
    Tokenizer::new(input).collect()
}
