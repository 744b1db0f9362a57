//! Payload validation for tags that take an `=value`.
//!
//! Every validator either accepts the payload as-is or substitutes a safe
//! default. None of them can fail.

use std::sync::OnceLock;

use regex::Regex;

/// Value used when a `[color]` payload is missing or not recognised.
pub const DEFAULT_COLOR: &str = "inherit";

/// Font size in `em` used when a `[size]` payload is missing or unusable.
pub const DEFAULT_SIZE: f64 = 1.0;

/// Smallest rendered font size, in `em`.
pub const MIN_SIZE: f64 = 0.7;

/// Largest rendered font size, in `em`.
pub const MAX_SIZE: f64 = 3.0;

fn color_regex() -> &'static Regex {
    static COLOR_REGEX: OnceLock<Regex> = OnceLock::new();
    COLOR_REGEX.get_or_init(|| {
        Regex::new(
            r"^(?i:black|silver|gray|white|maroon|red|purple|fuchsia|green|lime|olive|yellow|navy|blue|teal|aqua|#(?:[0-9a-f]{3}){1,2})$",
        )
        .expect("Invalid color regex")
    })
}

fn number_regex() -> &'static Regex {
    static NUMBER_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBER_REGEX.get_or_init(|| Regex::new(r"^[.0-9]{1,8}$").expect("Invalid number regex"))
}

// Reserved, unreserved and escaped characters from RFC 2396
fn uri_regex() -> &'static Regex {
    static URI_REGEX: OnceLock<Regex> = OnceLock::new();
    URI_REGEX.get_or_init(|| {
        Regex::new(r"^[-;/?:@&=+$,_.!~*'()%0-9A-Za-z]{1,512}$").expect("Invalid URI regex")
    })
}

/// Returns the payload if it names a basic CSS color or is a 3/6 digit hex
/// color, otherwise [`DEFAULT_COLOR`].
pub fn color(payload: Option<&str>) -> &str {
    payload
        .filter(|p| color_regex().is_match(p))
        .unwrap_or(DEFAULT_COLOR)
}

/// Returns the font size in `em`, clamped to [`MIN_SIZE`]..=[`MAX_SIZE`].
///
/// The payload must be 1-8 digits and dots and must also parse as a decimal
/// number; `1.2.3` passes the character check but falls back to
/// [`DEFAULT_SIZE`].
pub fn font_size(payload: Option<&str>) -> f64 {
    payload
        .filter(|p| number_regex().is_match(p))
        .and_then(|p| p.parse::<f64>().ok())
        .unwrap_or(DEFAULT_SIZE)
        .clamp(MIN_SIZE, MAX_SIZE)
}

/// Returns the payload if it is made only of URI characters.
pub fn uri(payload: Option<&str>) -> Option<&str> {
    payload.filter(|p| uri_regex().is_match(p))
}

/// Returns the payload to use as an image class suffix. Any non-empty
/// payload the lexer let through is used verbatim.
pub fn class_suffix(payload: Option<&str>) -> Option<&str> {
    payload.filter(|p| !p.is_empty())
}
