//! # Conversion
//!
//! Single-pass BBCode to HTML conversion. The [`Tokenizer`] yields tokens and
//! a `Conversion` folds them into an output string, one replacement per
//! token, without building a tree.
//!
//! ## State
//!
//! A `Conversion` is created at the start of every [`convert`] call and
//! consumed at the end, so nothing carries over from one call to the next:
//!
//! - `open_tags`: stack of tags awaiting their closer
//! - `verbatim`: inside `[pre]`/`[code]`, line breaks are kept as-is
//! - `literal`: inside `[noparse]`, tags are echoed as text
//! - `pending_url`: inside an option-less `[url]`, the input offset where the
//!   link text starts. Until the matching `[/url]` every token is echoed as
//!   raw text, so the target and the visible text are the same string.
//!
//! The body of `[img]` is copied raw in the same way, since it ends up inside
//! the `src` attribute.
//!
//! ## Recovery
//!
//! Nothing here fails. A closer that does not match the innermost open tag is
//! rendered in red and otherwise ignored, and whatever is still open at the
//! end of the input is closed innermost first.

use std::ops::Range;

use tiny_bbcode_syntax::{TagName, Token, Tokenizer};

use crate::tags::{ANCHOR_CLOSE, TagDescriptor};

/// A tag waiting for its closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OpenTag {
    name: TagName,
    closing: &'static str,
}

struct Conversion<'a> {
    source: &'a str,
    out: String,
    open_tags: Vec<OpenTag>,
    verbatim: bool,
    literal: bool,
    pending_url: Option<usize>,
}

impl<'a> Conversion<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            out: String::with_capacity(source.len() + source.len() / 4),
            open_tags: Vec::new(),
            verbatim: false,
            literal: false,
            pending_url: None,
        }
    }

    fn handle(&mut self, token: Token<'a>, span: Range<usize>) {
        // Link text and image sources are copied verbatim up to their closer
        if let Some(name) = self.raw_body()
            && token != Token::Close(name)
        {
            self.echo(span);
            return;
        }

        match token {
            Token::Text(text) => self.out.push_str(text),
            Token::CarriageReturn => {
                if self.verbatim {
                    self.out.push('\r');
                }
            }
            Token::LineFeed => {
                if self.verbatim {
                    self.out.push('\n');
                } else {
                    self.out.push_str("<br>");
                }
            }
            Token::Open { name, payload } => self.open(name, payload, span),
            Token::Close(name) => self.close(name, span),
        }
    }

    /// The innermost tag if its body is being written into an attribute.
    fn raw_body(&self) -> Option<TagName> {
        match self.open_tags.last()?.name {
            TagName::Url if self.pending_url.is_some() => Some(TagName::Url),
            TagName::Img => Some(TagName::Img),
            _ => None,
        }
    }

    fn echo(&mut self, span: Range<usize>) {
        self.out.push_str(&self.source[span]);
    }

    fn open(&mut self, name: TagName, payload: Option<&str>, span: Range<usize>) {
        if self.literal {
            self.echo(span);
            return;
        }

        let Some(descriptor) = TagDescriptor::for_tag(name) else {
            // Only noparse lacks a descriptor
            self.literal = true;
            return;
        };

        let opening = descriptor.open(payload);
        if opening.captures_url {
            log::trace!("capturing link target from offset {}", span.end);
            self.pending_url = Some(span.end);
        }
        if name.is_verbatim() {
            self.verbatim = true;
        }
        self.open_tags.push(OpenTag {
            name,
            closing: descriptor.closing,
        });
        self.out.push_str(&opening.html);
    }

    fn close(&mut self, name: TagName, span: Range<usize>) {
        if self.literal {
            if name == TagName::Noparse {
                self.literal = false;
            } else {
                self.echo(span);
            }
            return;
        }

        let Some(tag) = self.open_tags.pop_if(|tag| tag.name == name) else {
            log::debug!(
                "mismatched [/{name}] at {}..{}, innermost open tag is {:?}",
                span.start,
                span.end,
                self.open_tags.last().map(|tag| tag.name)
            );
            self.out.push_str(r#"<span style="color: red">"#);
            self.echo(span);
            self.out.push_str("</span>");
            return;
        };

        if tag.name == TagName::Url
            && let Some(start) = self.pending_url.take()
        {
            self.close_captured_url(start, span.start);
            return;
        }
        if tag.name.is_verbatim() {
            self.verbatim = false;
        }
        self.out.push_str(tag.closing);
    }

    /// Finishes `<a href="` with the raw input between `start` and `end`
    /// as both the target and the link text.
    fn close_captured_url(&mut self, start: usize, end: usize) {
        let target = &self.source[start..end];
        self.out.push_str("\">");
        self.out.push_str(target);
        self.out.push_str(ANCHOR_CLOSE);
    }

    fn finish(mut self) -> String {
        // An unterminated [noparse] just ends with the input
        self.literal = false;

        if let Some(start) = self.pending_url.take()
            && self.open_tags.pop_if(|tag| tag.name == TagName::Url).is_some()
        {
            self.close_captured_url(start, self.source.len());
        }

        if !self.open_tags.is_empty() {
            log::debug!(
                "closing {} unclosed tag(s) at end of input",
                self.open_tags.len()
            );
        }
        while let Some(tag) = self.open_tags.pop() {
            self.out.push_str(tag.closing);
        }

        self.out
    }
}

/// Converts BBCode to HTML.
///
/// `escaped` must already be HTML-escaped: this function passes text through
/// untouched and only generates markup for tags and line breaks. Use
/// [`crate::render`] for raw user input.
///
/// # Examples
///
/// ```
/// use tiny_bbcode_engine::convert;
///
/// assert_eq!(convert("[b]hi[/b]"), "<b>hi</b>");
/// assert_eq!(convert("one\ntwo"), "one<br>two");
/// ```
pub fn convert(escaped: &str) -> String {
    let mut conversion = Conversion::new(escaped);
    for (token, span) in Tokenizer::new(escaped) {
        conversion.handle(token, span);
    }
    conversion.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::bold("[b]hi[/b]", "<b>hi</b>")]
    #[case::italic("[i]hi[/i]", "<i>hi</i>")]
    #[case::underline("[u]hi[/u]", "<u>hi</u>")]
    #[case::sample("[samp]hi[/samp]", "<samp>hi</samp>")]
    #[case::strike("[s]hi[/s]", r#"<span style="text-decoration: line-through">hi</span>"#)]
    #[case::color("[color=red]hi[/color]", r#"<span style="color: red">hi</span>"#)]
    #[case::colour("[colour=#0f0]hi[/colour]", r#"<span style="color: #0f0">hi</span>"#)]
    #[case::bad_color("[color=blurple]hi[/color]", r#"<span style="color: inherit">hi</span>"#)]
    #[case::size("[size=1.5]hi[/size]", r#"<span style="font-size: 1.5em">hi</span>"#)]
    #[case::size_clamped_high("[size=10]x[/size]", r#"<span style="font-size: 3em">x</span>"#)]
    #[case::size_clamped_low("[size=0.1]x[/size]", r#"<span style="font-size: 0.7em">x</span>"#)]
    #[case::size_missing("[size]x[/size]", r#"<span style="font-size: 1em">x</span>"#)]
    #[case::url_with_target("[url=http://a.b/]link[/url]", r#"<a href="http://a.b/">link</a>"#)]
    #[case::img("[img]pic.png[/img]", r#"<img style="max-width: 100%;" src="pic.png">"#)]
    #[case::img_class("[img=thumb]pic.png[/img]", r#"<img class="tiny-bbcode-img-thumb" src="pic.png">"#)]
    #[case::quote("[q]hi[/q]", "<q>hi</q>")]
    #[case::quote_cite("[q=http://src]hi[/q]", r#"<q cite="http://src">hi</q>"#)]
    #[case::blockquote("[blockquote]hi[/blockquote]", "<blockquote>hi</blockquote>")]
    #[case::pre("[pre]hi[/pre]", "<pre>hi</pre>")]
    #[case::code("[code]hi[/code]", "<pre><code>hi</code></pre>")]
    fn single_tags(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(convert(input), expected);
    }

    #[test]
    fn plain_text_is_unchanged() {
        assert_eq!(convert("just some text"), "just some text");
        assert_eq!(convert(""), "");
    }

    #[test]
    fn line_breaks_outside_verbatim() {
        assert_eq!(convert("a\r\nb\nc\rd"), "a<br>b<br>cd");
    }

    #[test]
    fn unknown_tags_stay_literal() {
        assert_eq!(convert("[blink]x[/blink]"), "[blink]x[/blink]");
        assert_eq!(convert("[B]x[/B]"), "[B]x[/B]");
    }

    #[test]
    fn nested_tags() {
        assert_eq!(
            convert("[b][i]both[/i] bold[/b]"),
            "<b><i>both</i> bold</b>"
        );
    }

    #[test]
    fn mismatched_closer_is_flagged_and_tag_autoclosed() {
        assert_eq!(
            convert("[b]hi[/i]"),
            r#"<b>hi<span style="color: red">[/i]</span></b>"#
        );
    }

    #[test]
    fn stray_closer_is_flagged() {
        assert_eq!(
            convert("x[/b]y"),
            r#"x<span style="color: red">[/b]</span>y"#
        );
    }

    #[test]
    fn mismatched_closer_does_not_pop() {
        assert_eq!(
            convert("[b][i]x[/b][/i][/b]"),
            r#"<b><i>x<span style="color: red">[/b]</span></i></b>"#
        );
    }

    #[test]
    fn unclosed_tags_close_innermost_first() {
        assert_eq!(
            convert("[b][color=red][code]x"),
            r#"<b><span style="color: red"><pre><code>x</code></pre></span></b>"#
        );
    }

    #[test]
    fn code_keeps_line_breaks() {
        assert_eq!(
            convert("[code]a\r\nb[/code]\nc"),
            "<pre><code>a\r\nb</code></pre><br>c"
        );
    }

    #[test]
    fn pre_keeps_line_breaks() {
        assert_eq!(convert("[pre]a\nb[/pre]\n"), "<pre>a\nb</pre><br>");
    }

    #[test]
    fn verbatim_survives_mismatched_closer() {
        assert_eq!(
            convert("[code]a[/pre]\nb[/code]"),
            "<pre><code>a<span style=\"color: red\">[/pre]</span>\nb</code></pre>"
        );
    }

    #[test]
    fn noparse_echoes_tags() {
        assert_eq!(convert("[noparse][b]x[/b][/noparse]"), "[b]x[/b]");
    }

    #[test]
    fn noparse_echoes_payloads_verbatim() {
        assert_eq!(
            convert("[noparse][color=red]x[/color][noparse][/noparse]"),
            "[color=red]x[/color][noparse]"
        );
    }

    #[test]
    fn noparse_still_converts_line_breaks() {
        assert_eq!(convert("[noparse]a\nb[/noparse]"), "a<br>b");
    }

    #[test]
    fn unterminated_noparse_is_dropped() {
        assert_eq!(convert("[b]x[noparse][/b]"), "<b>x[/b]</b>");
    }

    #[test]
    fn noparse_inside_tag() {
        assert_eq!(
            convert("[b][noparse][/b][/noparse][/b]"),
            "<b>[/b]</b>"
        );
    }

    #[test]
    fn url_capture_uses_raw_content() {
        assert_eq!(
            convert("[url]http://example.com/a[b]c[/b]d[/url]"),
            r#"<a href="http://example.com/a[b]c[/b]d">http://example.com/a[b]c[/b]d</a>"#
        );
    }

    #[test]
    fn url_capture_simple() {
        assert_eq!(
            convert("see [url]http://a.b/c[/url]."),
            r#"see <a href="http://a.b/c">http://a.b/c</a>."#
        );
    }

    #[test]
    fn url_with_invalid_target_captures() {
        assert_eq!(
            convert("[url=not a uri]http://x[/url]"),
            r#"<a href="http://x">http://x</a>"#
        );
    }

    #[test]
    fn url_capture_echoes_opening_tags_with_payload() {
        assert_eq!(
            convert("[url]a[color=red]b[/url]"),
            r#"<a href="a[color=red]b">a[color=red]b</a>"#
        );
    }

    #[test]
    fn url_capture_keeps_line_breaks_and_closers_raw() {
        assert_eq!(
            convert("[url]http://a/[/b]\nx[/url]"),
            "<a href=\"http://a/[/b]\nx\">http://a/[/b]\nx</a>"
        );
    }

    #[test]
    fn url_capture_ignores_noparse() {
        assert_eq!(
            convert("[url]a[noparse]b[/url][/noparse]"),
            r#"<a href="a[noparse]b">a[noparse]b</a><span style="color: red">[/noparse]</span>"#
        );
    }

    #[test]
    fn unterminated_url_capture_takes_rest_of_input() {
        assert_eq!(
            convert("[b][url]http://a.b"),
            r#"<b><a href="http://a.b">http://a.b</a></b>"#
        );
    }

    #[test]
    fn unterminated_url_with_target_closes_normally() {
        assert_eq!(
            convert("[url=http://a.b]text"),
            r#"<a href="http://a.b">text</a>"#
        );
    }

    #[test]
    fn url_with_target_interprets_content() {
        assert_eq!(
            convert("[url=http://a.b][b]bold[/b] link[/url]"),
            r#"<a href="http://a.b"><b>bold</b> link</a>"#
        );
    }

    #[test]
    fn url_capture_ends_at_its_closer() {
        assert_eq!(
            convert("[url]http://a[/url] [b]x[/b] [url]http://b[/url]"),
            r#"<a href="http://a">http://a</a> <b>x</b> <a href="http://b">http://b</a>"#
        );
    }

    #[rstest]
    #[case::stray_closer("[img]x[/b]y[/img]", "x[/b]y")]
    #[case::line_feed("[img]a\nb[/img]", "a\nb")]
    #[case::nested_tags("[img][b]x[/b][/img]", "[b]x[/b]")]
    #[case::url("[img][url]x[/url][/img]", "[url]x[/url]")]
    #[case::noparse("[img][noparse]x[/img]", "[noparse]x")]
    #[case::unterminated("[img]a[i]b", "a[i]b")]
    fn img_source_is_raw(#[case] input: &str, #[case] src: &str) {
        assert_eq!(
            convert(input),
            format!(r#"<img style="max-width: 100%;" src="{src}">"#)
        );
    }

    #[test]
    fn img_with_class_source_is_raw() {
        assert_eq!(
            convert("[img=thumb]a[color=red]b[/img]"),
            r#"<img class="tiny-bbcode-img-thumb" src="a[color=red]b">"#
        );
    }

    #[test]
    fn img_inside_url_capture_stays_text() {
        assert_eq!(
            convert("[url]a[img]b[/url]"),
            r#"<a href="a[img]b">a[img]b</a>"#
        );
    }

    #[test]
    fn snapshot_mixed_document() {
        let input = "[size=2][b]Release notes[/b][/size]\n\
                     [blockquote=http://example.com/log]Fixed [i]everything[/i][/blockquote]\n\
                     [code]fn main() {\n    run();\n}[/code]\n\
                     Report bugs at [url]http://example.com/bugs[/url][/q]";
        assert_snapshot!(convert(input), @r#"
        <span style="font-size: 2em"><b>Release notes</b></span><br><blockquote cite="http://example.com/log">Fixed <i>everything</i></blockquote><br><pre><code>fn main() {
            run();
        }</code></pre><br>Report bugs at <a href="http://example.com/bugs">http://example.com/bugs</a><span style="color: red">[/q]</span>
        "#);
    }
}
