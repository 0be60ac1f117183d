use super::block::{Block, ListKind};
use super::inline::Inline;

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Render parsed blocks. Lines are joined with `<br>`; a list swallows the
/// line break that follows it.
pub fn render_html(blocks: &[Block]) -> String {
    let mut html = String::new();

    for (i, block) in blocks.iter().enumerate() {
        match block {
            Block::Line(inlines) => render_inlines(&mut html, inlines),
            Block::List { kind, items } => {
                let tag = match kind {
                    ListKind::Unordered => "ul",
                    ListKind::Ordered => "ol",
                };
                html.push_str(&format!("<{}>", tag));
                for item in items {
                    html.push_str("<li>");
                    render_inlines(&mut html, item);
                    html.push_str("</li>");
                }
                html.push_str(&format!("</{}>", tag));
            }
        }

        if i + 1 < blocks.len() && !block.is_list() {
            html.push_str("<br>");
        }
    }

    html
}

fn render_inlines(html: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => html.push_str(text),
            Inline::Strong(children) => {
                html.push_str("<strong>");
                render_inlines(html, children);
                html.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                html.push_str("<em>");
                render_inlines(html, children);
                html.push_str("</em>");
            }
            Inline::Code(code) => {
                html.push_str("<code>");
                html.push_str(code);
                html.push_str("</code>");
            }
            Inline::Link(url) => {
                html.push_str(&format!(
                    r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#,
                    url = url
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_all_special_characters() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn renders_nested_inlines() {
        let blocks = vec![Block::Line(vec![Inline::Strong(vec![
            Inline::Text("a".into()),
            Inline::Emphasis(vec![Inline::Code("b".into())]),
        ])])];
        assert_eq!(render_html(&blocks), "<strong>a<em><code>b</code></em></strong>");
    }

    #[test]
    fn list_before_text_has_no_break() {
        let blocks = vec![
            Block::List {
                kind: ListKind::Ordered,
                items: vec![vec![Inline::Text("x".into())]],
            },
            Block::Line(vec![Inline::Text("after".into())]),
        ];
        assert_eq!(render_html(&blocks), "<ol><li>x</li></ol>after");
    }
}
