//! The fixed BBCode tag vocabulary.
//!
//! Every tag the converter understands has a variant here. Anything else that
//! looks like a tag (`[blink]`, `[B]`, `[/table]`) is not a tag at all and the
//! lexer leaves it in the surrounding text.

use std::fmt;

/// A whitelisted BBCode tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagName {
    /// `[b]` bold
    B,
    /// `[i]` italic
    I,
    /// `[u]` underline
    U,
    /// `[s]` strike-through
    S,
    /// `[pre]` preformatted block
    Pre,
    /// `[samp]` sample output
    Samp,
    /// `[code]` preformatted code block
    Code,
    /// `[color=...]`
    Color,
    /// `[colour=...]`, same as `color`
    Colour,
    /// `[size=...]` relative font size
    Size,
    /// `[noparse]` literal passthrough
    Noparse,
    /// `[url]` or `[url=...]` hyperlink
    Url,
    /// `[img]` image, optional class suffix payload
    Img,
    /// `[q]` inline quote, optional cite
    Q,
    /// `[blockquote]` block quote, optional cite
    Blockquote,
}

impl TagName {
    /// Every tag in the vocabulary.
    pub const ALL: [TagName; 15] = [
        TagName::B,
        TagName::I,
        TagName::U,
        TagName::S,
        TagName::Pre,
        TagName::Samp,
        TagName::Code,
        TagName::Color,
        TagName::Colour,
        TagName::Size,
        TagName::Noparse,
        TagName::Url,
        TagName::Img,
        TagName::Q,
        TagName::Blockquote,
    ];

    /// Longest name the lexer will consider.
    pub const MAX_LEN: usize = 16;

    /// Looks up a tag by its exact (lowercase) name.
    pub fn from_name(name: &str) -> Option<Self> {
        let tag = match name {
            "b" => TagName::B,
            "i" => TagName::I,
            "u" => TagName::U,
            "s" => TagName::S,
            "pre" => TagName::Pre,
            "samp" => TagName::Samp,
            "code" => TagName::Code,
            "color" => TagName::Color,
            "colour" => TagName::Colour,
            "size" => TagName::Size,
            "noparse" => TagName::Noparse,
            "url" => TagName::Url,
            "img" => TagName::Img,
            "q" => TagName::Q,
            "blockquote" => TagName::Blockquote,
            _ => return None,
        };
        Some(tag)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagName::B => "b",
            TagName::I => "i",
            TagName::U => "u",
            TagName::S => "s",
            TagName::Pre => "pre",
            TagName::Samp => "samp",
            TagName::Code => "code",
            TagName::Color => "color",
            TagName::Colour => "colour",
            TagName::Size => "size",
            TagName::Noparse => "noparse",
            TagName::Url => "url",
            TagName::Img => "img",
            TagName::Q => "q",
            TagName::Blockquote => "blockquote",
        }
    }

    /// Returns true for tags whose content keeps its line breaks.
    pub fn is_verbatim(self) -> bool {
        matches!(self, TagName::Pre | TagName::Code)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn names_roundtrip() {
        for tag in TagName::ALL {
            assert_eq!(TagName::from_name(tag.as_str()), Some(tag));
            assert!(tag.as_str().len() <= TagName::MAX_LEN);
        }
    }

    #[rstest]
    #[case("")]
    #[case("B")]
    #[case("bold")]
    #[case("/b")]
    #[case("table")]
    #[case("colors")]
    fn unknown_names_are_rejected(#[case] name: &str) {
        assert_eq!(TagName::from_name(name), None);
    }

    #[test]
    fn verbatim_tags() {
        let verbatim: Vec<_> = TagName::ALL
            .into_iter()
            .filter(|t| t.is_verbatim())
            .collect();
        assert_eq!(verbatim, vec![TagName::Pre, TagName::Code]);
    }

    #[test]
    fn display_uses_tag_name() {
        assert_eq!(TagName::Blockquote.to_string(), "blockquote");
        assert_eq!(format!("[/{}]", TagName::Colour), "[/colour]");
    }
}
