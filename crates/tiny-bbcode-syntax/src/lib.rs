//! # tiny-bbcode-syntax
//!
//! Tokenizer for the tiny-bbcode tag language, built on [Logos].
//!
//! [Logos]: https://docs.rs/logos
//!
//! ## What Counts as a Tag?
//!
//! A tag is `[name]`, `[name=payload]` or `[/name]` where `name` is one of the
//! fixed [`TagName`] vocabulary. Anything else that merely looks like a tag
//! (`[blink]`, `[B]`, `[url=]`, a payload with quotes in it) is ordinary text.
//! There is no error token: the lexer never fails.
//!
//! ## Module Structure
//!
//! ```text
//! tiny-bbcode-syntax/
//! ├── lib.rs       # This file - public API
//! ├── tag_name.rs  # TagName enum, the tag whitelist
//! └── lexer.rs     # Logos tokenizer with bounded tag scanning
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use tiny_bbcode_syntax::{lex, TagName, Token};
//!
//! let tokens = lex("[b]hi[/b]");
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Open { name: TagName::B, payload: None },
//!         Token::Text("hi"),
//!         Token::Close(TagName::B),
//!     ]
//! );
//! ```
//!
//! Consumers that need to refer back to the source (to echo a tag verbatim,
//! or to slice out a span of raw text) use [`Tokenizer`], which yields byte
//! spans alongside each token.

pub mod lexer;
pub mod tag_name;

pub use lexer::{Token, Tokenizer, lex, lex_with_spans};
pub use tag_name::TagName;
