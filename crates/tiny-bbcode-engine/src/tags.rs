//! HTML fragments for each tag.
//!
//! A [`TagDescriptor`] knows how to validate a tag's payload and which
//! fragments open and close it. `[noparse]` has no descriptor: it switches
//! the converter into literal mode and never produces markup.

use tiny_bbcode_syntax::TagName;

use crate::payload;

/// Closing text for a `[url]` anchor.
pub const ANCHOR_CLOSE: &str = "</a>";

/// How a tag's `=payload` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadRule {
    /// Payload is accepted by the lexer but ignored.
    Ignored,
    /// CSS color name or hex value.
    Color,
    /// Relative font size in `em`.
    Size,
    /// Link target or citation.
    Uri,
    /// Suffix for an image CSS class.
    ClassSuffix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagDescriptor {
    pub name: TagName,
    pub payload: PayloadRule,
    /// Fragment appended when the tag is closed or force-closed.
    pub closing: &'static str,
}

/// The rendered opening of a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    pub html: String,
    /// True for an option-less `[url]`: the anchor is left open at
    /// `<a href="` and the tag's content becomes the link target.
    pub captures_url: bool,
}

impl Opening {
    fn element(html: String) -> Self {
        Self {
            html,
            captures_url: false,
        }
    }
}

impl TagDescriptor {
    /// Looks up the descriptor for a tag. Returns `None` for `noparse`.
    pub fn for_tag(name: TagName) -> Option<Self> {
        let (payload, closing) = match name {
            TagName::B => (PayloadRule::Ignored, "</b>"),
            TagName::I => (PayloadRule::Ignored, "</i>"),
            TagName::U => (PayloadRule::Ignored, "</u>"),
            TagName::Samp => (PayloadRule::Ignored, "</samp>"),
            TagName::S => (PayloadRule::Ignored, "</span>"),
            TagName::Pre => (PayloadRule::Ignored, "</pre>"),
            TagName::Code => (PayloadRule::Ignored, "</code></pre>"),
            TagName::Color | TagName::Colour => (PayloadRule::Color, "</span>"),
            TagName::Size => (PayloadRule::Size, "</span>"),
            TagName::Url => (PayloadRule::Uri, ANCHOR_CLOSE),
            TagName::Img => (PayloadRule::ClassSuffix, "\">"),
            TagName::Q => (PayloadRule::Uri, "</q>"),
            TagName::Blockquote => (PayloadRule::Uri, "</blockquote>"),
            TagName::Noparse => return None,
        };
        Some(Self {
            name,
            payload,
            closing,
        })
    }

    /// Renders the opening fragment for this tag with the given payload.
    pub fn open(&self, payload: Option<&str>) -> Opening {
        match self.name {
            TagName::S => {
                Opening::element(r#"<span style="text-decoration: line-through">"#.to_string())
            }
            TagName::Pre => Opening::element("<pre>".to_string()),
            TagName::Code => Opening::element("<pre><code>".to_string()),
            TagName::Color | TagName::Colour => Opening::element(format!(
                r#"<span style="color: {}">"#,
                payload::color(payload)
            )),
            TagName::Size => Opening::element(format!(
                r#"<span style="font-size: {}em">"#,
                payload::font_size(payload)
            )),
            TagName::Url => match payload::uri(payload) {
                Some(href) => Opening::element(format!(r#"<a href="{href}">"#)),
                None => Opening {
                    html: r#"<a href=""#.to_string(),
                    captures_url: true,
                },
            },
            TagName::Img => match payload::class_suffix(payload) {
                Some(suffix) => Opening::element(format!(
                    r#"<img class="tiny-bbcode-img-{suffix}" src=""#
                )),
                None => Opening::element(r#"<img style="max-width: 100%;" src=""#.to_string()),
            },
            TagName::Q | TagName::Blockquote => match payload::uri(payload) {
                Some(cite) => Opening::element(format!(r#"<{} cite="{cite}">"#, self.name)),
                None => Opening::element(format!("<{}>", self.name)),
            },
            // b, i, u, samp map straight onto the element of the same name
            _ => Opening::element(format!("<{}>", self.name)),
        }
    }
}
