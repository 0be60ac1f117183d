//! Markdown-subset rendering for assistant replies.
//!
//! Replies are parsed into a small node list ([`Block`] / [`Inline`]) and
//! then rendered. HTML is the primary target; hosts that draw somewhere else
//! (the terminal panel) walk the same nodes.
//!
//! Recognized syntax: line breaks, `-`/`*`/`•` bullet lines, `1.` numbered
//! lines, `**bold**`/`__bold__`, `*italic*`/`_italic_`, bare `http(s)://`
//! links and `` `code` `` spans. Nothing else is interpreted and nothing is
//! escaped, so this must only ever see assistant text.

mod block;
mod html;
mod inline;

pub use block::{parse, Block, ListKind};
pub use html::{escape_html, render_html};
pub use inline::Inline;

/// Render raw assistant text as HTML.
pub fn format_response(raw: &str) -> String {
    render_html(&parse(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(url: &str) -> String {
        format!(
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#,
            url = url
        )
    }

    #[test]
    fn plain_text_only_gains_line_breaks() {
        assert_eq!(format_response("Hello there"), "Hello there");
        assert_eq!(
            format_response("line one\nline two\n\nend"),
            "line one<br>line two<br><br>end"
        );
        assert_eq!(format_response("trailing\n"), "trailing<br>");
        assert_eq!(format_response(""), "");
    }

    #[test]
    fn bold_and_italic_do_not_cross() {
        assert_eq!(
            format_response("**a** and *b*"),
            "<strong>a</strong> and <em>b</em>"
        );
        assert_eq!(
            format_response("__a__ and _b_"),
            "<strong>a</strong> and <em>b</em>"
        );
    }

    #[test]
    fn bullet_run_becomes_single_unordered_list() {
        assert_eq!(
            format_response("- one\n- two"),
            "<ul><li>one</li><li>two</li></ul>"
        );
    }

    #[test]
    fn mixed_bullet_markers_and_indentation_share_a_list() {
        assert_eq!(
            format_response("Skills:\n  * Python\n  • Rust\n- Go\nThanks"),
            "Skills:<br><ul><li>Python</li><li>Rust</li><li>Go</li></ul>Thanks"
        );
    }

    #[test]
    fn numbered_run_becomes_single_ordered_list() {
        let html = format_response("1. a\n2. b");
        assert_eq!(html, "<ol><li>a</li><li>b</li></ol>");
        assert!(!html.contains("<ul>"));
    }

    #[test]
    fn adjacent_runs_of_different_kinds_stay_separate() {
        assert_eq!(
            format_response("- a\n1. b"),
            "<ul><li>a</li></ul><ol><li>b</li></ol>"
        );
    }

    #[test]
    fn blank_line_splits_a_list() {
        assert_eq!(
            format_response("- a\n\n- b"),
            "<ul><li>a</li></ul><br><ul><li>b</li></ul>"
        );
    }

    #[test]
    fn list_markers_only_count_at_line_start() {
        assert_eq!(format_response("a - b * c • d"), "a - b * c • d");
        assert_eq!(format_response("Version 2. Released"), "Version 2. Released");
        assert_eq!(format_response("-no space"), "-no space");
    }

    #[test]
    fn list_items_keep_inline_formatting() {
        assert_eq!(
            format_response("- **Python** for `ml`"),
            "<ul><li><strong>Python</strong> for <code>ml</code></li></ul>"
        );
    }

    #[test]
    fn trailing_punctuation_moves_outside_link() {
        assert_eq!(
            format_response("See https://example.com/a,b."),
            format!("See {}.", link("https://example.com/a,b"))
        );
        assert_eq!(
            format_response("(https://x.com/y)!?"),
            format!("({})!?", link("https://x.com/y"))
        );
    }

    #[test]
    fn links_stop_at_whitespace_and_markup() {
        assert_eq!(
            format_response("http://a.io/x next"),
            format!("{} next", link("http://a.io/x"))
        );
    }

    #[test]
    fn underscores_inside_links_are_not_emphasis() {
        let url = "https://github.com/Hari-Kec/Face_based_attendance_system.git";
        assert_eq!(format_response(url), link(url));
    }

    #[test]
    fn lone_asterisk_stays_inside_link() {
        assert_eq!(
            format_response("See https://example.com/a*b now"),
            format!("See {} now", link("https://example.com/a*b"))
        );
    }

    #[test]
    fn links_inside_emphasis() {
        assert_eq!(
            format_response("**https://x.com**"),
            format!("<strong>{}</strong>", link("https://x.com"))
        );
        assert_eq!(
            format_response("*see https://x.com/a.*"),
            format!("<em>see {}.</em>", link("https://x.com/a"))
        );
    }

    #[test]
    fn code_spans_are_literal() {
        assert_eq!(
            format_response("Run `pip install x` now"),
            "Run <code>pip install x</code> now"
        );
        assert_eq!(
            format_response("`**not bold**`"),
            "<code>**not bold**</code>"
        );
    }

    #[test]
    fn nested_italic_inside_bold() {
        assert_eq!(
            format_response("**a*b*c**"),
            "<strong>a<em>b</em>c</strong>"
        );
    }

    #[test]
    fn triple_asterisks_never_overlap_tags() {
        assert_eq!(format_response("***x***"), "<strong>*x</strong>*");
    }

    #[test]
    fn unmatched_delimiters_stay_literal() {
        assert_eq!(format_response("5 * 3 = 15"), "5 * 3 = 15");
        assert_eq!(format_response("**open"), "**open");
        assert_eq!(format_response("a `tick"), "a `tick");
    }

    #[test]
    fn emphasis_does_not_span_lines() {
        assert_eq!(format_response("*a\nb*"), "*a<br>b*");
    }

    #[test]
    fn model_markup_passes_through_unescaped() {
        assert_eq!(format_response("<b>hi</b>"), "<b>hi</b>");
    }
}
