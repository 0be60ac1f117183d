use std::ops::Range;
use std::sync::OnceLock;

use regex::Regex;

/// Inline content of a line or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Code(String),
    /// Bare URL, already stripped of trailing punctuation.
    Link(String),
}

/// Punctuation that ends a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &[')', '.', ',', ';', ':', '!', '?', ']'];

fn code_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"`(.+?)`").expect("valid code pattern"))
}

fn url_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://[^\s<`]+").expect("valid url pattern"))
}

/// Parse one line. Code spans and links are cut out first and never
/// re-interpreted; emphasis passes then run bold before italic.
pub fn parse_inline(line: &str) -> Vec<Inline> {
    let mut nodes = tokenize(line);
    nodes = apply_delimiter(nodes, &['*', '*'], Inline::Strong);
    nodes = apply_delimiter(nodes, &['_', '_'], Inline::Strong);
    nodes = apply_delimiter(nodes, &['*'], Inline::Emphasis);
    nodes = apply_delimiter(nodes, &['_'], Inline::Emphasis);
    nodes
}

fn push_text(nodes: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text(prev)) = nodes.last_mut() {
        prev.push_str(text);
    } else {
        nodes.push(Inline::Text(text.to_string()));
    }
}

fn tokenize(line: &str) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut last = 0;

    for caps in code_pattern().captures_iter(line) {
        let (Some(whole), Some(code)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        push_linked_text(&mut nodes, line, last..whole.start());
        nodes.push(Inline::Code(code.as_str().to_string()));
        last = whole.end();
    }
    push_linked_text(&mut nodes, line, last..line.len());

    nodes
}

fn push_linked_text(nodes: &mut Vec<Inline>, line: &str, range: Range<usize>) {
    let text = &line[range.clone()];
    let mut last = 0;

    for found in url_pattern().find_iter(text) {
        push_text(nodes, &text[last..found.start()]);

        let url = found.as_str();
        let clean = trim_url(url, &line[..range.start + found.start()]);
        nodes.push(Inline::Link(clean.to_string()));
        push_text(nodes, &url[clean.len()..]);

        last = found.end();
    }
    push_text(nodes, &text[last..]);
}

/// Drop trailing punctuation from `url`, plus any trailing `*`/`_` that
/// close a delimiter run opened earlier on the line (`before`). A run gives
/// back at most as many characters as its longest opener.
fn trim_url<'a>(url: &'a str, before: &str) -> &'a str {
    let mut stars = longest_run(before, '*');
    let mut underscores = longest_run(before, '_');
    let mut clean = url;

    loop {
        let trimmed = clean.trim_end_matches(TRAILING_PUNCTUATION);
        let next = if stars > 0 && trimmed.ends_with('*') {
            stars -= 1;
            &trimmed[..trimmed.len() - 1]
        } else if underscores > 0 && trimmed.ends_with('_') {
            underscores -= 1;
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        if next.len() == clean.len() {
            return clean;
        }
        clean = next;
    }
}

fn longest_run(text: &str, c: char) -> usize {
    let mut longest = 0;
    let mut current = 0;
    for ch in text.chars() {
        if ch == c {
            current += 1;
            longest = longest.max(current);
        } else {
            current = 0;
        }
    }
    longest
}

/// A character of plain text, or an already-built node that a delimiter
/// pass must treat as opaque.
enum Unit {
    Char(char),
    Node(Inline),
}

/// Wrap every `delim content delim` run (content at least one unit,
/// shortest match first) in `wrap`. Existing containers are processed
/// recursively but never split, so tags cannot overlap.
fn apply_delimiter(nodes: Vec<Inline>, delim: &[char], wrap: fn(Vec<Inline>) -> Inline) -> Vec<Inline> {
    let mut units = Vec::new();
    for node in nodes {
        match node {
            Inline::Text(text) => units.extend(text.chars().map(Unit::Char)),
            Inline::Strong(children) => {
                units.push(Unit::Node(Inline::Strong(apply_delimiter(children, delim, wrap))))
            }
            Inline::Emphasis(children) => {
                units.push(Unit::Node(Inline::Emphasis(apply_delimiter(children, delim, wrap))))
            }
            other => units.push(Unit::Node(other)),
        }
    }

    let spans = find_spans(&units, delim);
    if spans.is_empty() {
        return units_to_nodes(units);
    }

    let len = delim.len();
    let mut out = Vec::with_capacity(units.len());
    let mut rest = units.into_iter();
    let mut pos = 0;

    for (open, close) in spans {
        out.extend(rest.by_ref().take(open - pos));
        let inner: Vec<Unit> = rest.by_ref().skip(len).take(close - open - len).collect();
        rest.by_ref().take(len).for_each(drop);
        out.push(Unit::Node(wrap(units_to_nodes(inner))));
        pos = close + len;
    }
    out.extend(rest);

    units_to_nodes(out)
}

/// `(open, close)` unit indices of each delimited run, left to right.
fn find_spans(units: &[Unit], delim: &[char]) -> Vec<(usize, usize)> {
    let len = delim.len();
    let delim_at = |i: usize| {
        i + len <= units.len()
            && delim
                .iter()
                .enumerate()
                .all(|(k, d)| matches!(units[i + k], Unit::Char(c) if c == *d))
    };

    let mut spans = Vec::new();
    let mut i = 0;
    while i < units.len() {
        if delim_at(i) {
            if let Some(close) = (i + len + 1..units.len()).find(|&j| delim_at(j)) {
                spans.push((i, close));
                i = close + len;
                continue;
            }
        }
        i += 1;
    }
    spans
}

fn units_to_nodes(units: Vec<Unit>) -> Vec<Inline> {
    let mut nodes = Vec::new();
    let mut text = String::new();

    for unit in units {
        match unit {
            Unit::Char(c) => text.push(c),
            Unit::Node(node) => {
                push_text(&mut nodes, &std::mem::take(&mut text));
                nodes.push(node);
            }
        }
    }
    push_text(&mut nodes, &text);

    nodes
}
