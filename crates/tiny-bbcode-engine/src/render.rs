//! Rendering raw user text.
//!
//! [`convert`] trusts its input to be escaped already. These helpers do the
//! escaping first, so they are the entry points for text typed by a user.

use std::borrow::Cow;

use html_escape::encode_double_quoted_attribute;

use crate::convert::convert;

/// Escapes `raw` and converts it to HTML.
///
/// `&`, `<`, `>` and `"` are escaped. Every attribute the converter writes is
/// double quoted, so captured link targets and image sources cannot end their
/// attribute early.
///
/// ```
/// use tiny_bbcode_engine::render;
///
/// assert_eq!(render("[b]1 < 2[/b]"), "<b>1 &lt; 2</b>");
/// ```
pub fn render(raw: &str) -> String {
    let escaped: Cow<'_, str> = encode_double_quoted_attribute(raw);
    convert(&escaped)
}

/// Renders `raw` inside a preview `<div>`, optionally with a CSS class.
pub fn render_preview(raw: &str, class: Option<&str>) -> String {
    wrap_preview(&render(raw), class)
}

/// Wraps already converted HTML in a preview `<div>`.
pub fn wrap_preview(body: &str, class: Option<&str>) -> String {
    match class {
        Some(class) => format!(
            r#"<div class="{}">{body}</div>"#,
            encode_double_quoted_attribute(class)
        ),
        None => format!("<div>{body}</div>"),
    }
}
