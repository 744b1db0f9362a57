//! # tiny-bbcode-engine
//!
//! Converts BBCode to HTML in a single left-to-right pass.
//!
//! ```text
//! escaped text → Tokenizer → Conversion (stack machine) → HTML string
//! ```
//!
//! - [`convert`] takes text that is already HTML-escaped.
//! - [`render`] and [`render_preview`] escape raw text first.
//! - [`balance::check_balanced`] verifies that output is well formed.
//!
//! Conversion never fails. Malformed input is repaired locally: unknown tags
//! stay as text, bad payloads fall back to defaults, stray closers are
//! flagged in red and unclosed tags are closed at the end.

pub mod balance;
pub mod convert;
pub mod payload;
pub mod render;
pub mod tags;

pub use balance::{BalanceError, check_balanced};
pub use convert::convert;
pub use render::{render, render_preview, wrap_preview};
pub use tiny_bbcode_syntax::TagName;
