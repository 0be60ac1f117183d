use std::sync::OnceLock;

use regex::Regex;

use super::inline::{parse_inline, Inline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// One line of text, or a run of consecutive list lines of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Line(Vec<Inline>),
    List { kind: ListKind, items: Vec<Vec<Inline>> },
}

impl Block {
    pub fn is_list(&self) -> bool {
        matches!(self, Block::List { .. })
    }
}

fn bullet_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*[-*•]\s+(.+)$").expect("valid bullet pattern"))
}

fn numbered_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d+\.\s+(.+)$").expect("valid numbered pattern"))
}

/// List kind and item text, if the line is a list item.
fn list_item(line: &str) -> Option<(ListKind, &str)> {
    if let Some(caps) = bullet_pattern().captures(line) {
        return caps.get(1).map(|m| (ListKind::Unordered, m.as_str()));
    }
    numbered_pattern()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| (ListKind::Ordered, m.as_str()))
}

/// Split raw text into blocks, one per line except that consecutive list
/// items of one kind collapse into a single list.
pub fn parse(raw: &str) -> Vec<Block> {
    let mut blocks: Vec<Block> = Vec::new();

    for line in raw.split('\n') {
        let Some((kind, text)) = list_item(line) else {
            blocks.push(Block::Line(parse_inline(line)));
            continue;
        };

        let item = parse_inline(text);
        if let Some(Block::List { kind: current, items }) = blocks.last_mut() {
            if *current == kind {
                items.push(item);
                continue;
            }
        }
        blocks.push(Block::List { kind, items: vec![item] });
    }

    blocks
}
