//! Block walker: translates a document tree into an output flow.

use crate::error::{Error, Result};
use crate::model::{Block, Document, List, Table, TableRow};

use super::{compose_inline, Flow, FlowItem, StyleName, StyleRegistry};

/// Height of the spacers around a thematic break, in points.
pub const RULE_SPACING: f32 = 6.0;

/// Thickness of a thematic-break rule, in points.
pub const RULE_THICKNESS: f32 = 0.5;

/// Line separating the header row of a table from its body.
pub const TABLE_SEPARATOR: &str = "--------------------";

const CELL_SEPARATOR: &str = " | ";
const QUOTE_OPEN: char = '\u{201C}';
const QUOTE_CLOSE: char = '\u{201D}';

/// Walks root-level blocks once, in order, appending layout instructions.
///
/// Lossy by design in two places:
/// - block quotes keep only their first child block;
/// - list items keep only their paragraph and bare-text children, so nested
///   lists disappear.
pub struct BlockWalker<'a> {
    styles: &'a StyleRegistry,
}

impl<'a> BlockWalker<'a> {
    /// Create a walker bound to a style registry.
    pub fn new(styles: &'a StyleRegistry) -> Self {
        Self { styles }
    }

    /// The registry this walker emits styles for.
    pub fn styles(&self) -> &StyleRegistry {
        self.styles
    }

    /// Walk a document and return its output flow.
    pub fn walk(&self, doc: &Document) -> Result<Flow> {
        let mut flow = Flow::new();
        for block in &doc.blocks {
            self.walk_block(&mut flow, block)?;
        }
        Ok(flow)
    }

    fn walk_block(&self, flow: &mut Flow, block: &Block) -> Result<()> {
        match block {
            Block::Heading { level, content } => {
                if !(1..=6).contains(level) {
                    return Err(Error::MalformedTree(format!(
                        "heading level {} is outside 1-6",
                        level
                    )));
                }
                let level = (*level).min(3);
                flow.push(FlowItem::Heading {
                    text: compose_inline(content),
                    level,
                    style: StyleName::for_heading(level),
                });
            }
            Block::Paragraph { content } | Block::Text { content } => {
                flow.push(FlowItem::body(compose_inline(content)));
            }
            Block::BlockQuote { children } => {
                let text = children
                    .first()
                    .and_then(Block::inline_content)
                    .map(compose_inline)
                    .unwrap_or_default();
                flow.push(FlowItem::body(format!("{}{}{}", QUOTE_OPEN, text, QUOTE_CLOSE)));
            }
            Block::List(list) => flow.push(list_item(list)),
            Block::ThematicBreak => {
                flow.push(FlowItem::Spacer {
                    height: RULE_SPACING,
                });
                flow.push(FlowItem::HorizontalRule {
                    thickness: RULE_THICKNESS,
                });
                flow.push(FlowItem::Spacer {
                    height: RULE_SPACING,
                });
            }
            Block::CodeBlock { text, .. } => {
                // The parser keeps the newline that terminates the last line.
                let text = text.strip_suffix('\n').unwrap_or(text);
                flow.push(FlowItem::Preformatted {
                    text: text.to_string(),
                    style: StyleName::Code,
                });
            }
            Block::Table(table) => flow.push(FlowItem::body(table_text(table))),
            Block::Unknown { kind, content } => match content {
                Some(content) => flow.push(FlowItem::body(compose_inline(content))),
                None => log::debug!("Skipping {} block without inline content", kind),
            },
        }
        Ok(())
    }
}

fn list_item(list: &List) -> FlowItem {
    let items = list
        .items
        .iter()
        .map(|item| {
            item.children
                .iter()
                .filter_map(|child| match child {
                    Block::Paragraph { content } | Block::Text { content } => {
                        Some(compose_inline(content))
                    }
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();

    FlowItem::List {
        items,
        ordered: list.ordered,
        start: list.start.unwrap_or(1),
    }
}

fn row_line(row: &TableRow) -> String {
    row.cells
        .iter()
        .map(|cell| compose_inline(cell))
        .collect::<Vec<_>>()
        .join(CELL_SEPARATOR)
}

/// Plain-text rendition of a table: header, separator, body rows.
fn table_text(table: &Table) -> String {
    let mut lines = Vec::with_capacity(table.row_count() + 1);
    lines.push(table.header().map(row_line).unwrap_or_default());
    lines.push(TABLE_SEPARATOR.to_string());
    lines.extend(table.body().iter().map(row_line));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Inline, ListItem};

    fn walk(blocks: Vec<Block>) -> Flow {
        let styles = StyleRegistry::new();
        BlockWalker::new(&styles)
            .walk(&Document::with_blocks(blocks))
            .unwrap()
    }

    #[test]
    fn test_table_separator_is_twenty_dashes() {
        assert_eq!(TABLE_SEPARATOR.len(), 20);
        assert!(TABLE_SEPARATOR.chars().all(|c| c == '-'));
    }

    #[test]
    fn test_code_block_keeps_inner_newlines() {
        let flow = walk(vec![Block::code(None, "a\n\nb\n")]);
        assert_eq!(
            flow.items,
            vec![FlowItem::Preformatted {
                text: "a\n\nb".to_string(),
                style: StyleName::Code,
            }]
        );
    }

    #[test]
    fn test_block_quote_without_children() {
        let flow = walk(vec![Block::BlockQuote { children: vec![] }]);
        assert_eq!(flow.items, vec![FlowItem::body("\u{201C}\u{201D}")]);
    }

    #[test]
    fn test_list_item_drops_nested_list() {
        let nested = Block::List(List::unordered(vec![ListItem::with_text("inner")]));
        let item = ListItem::new(vec![
            Block::Text {
                content: vec![Inline::text("outer")],
            },
            nested,
            Block::paragraph_text("tail"),
        ]);
        let flow = walk(vec![Block::List(List::ordered(4, vec![item]))]);
        assert_eq!(
            flow.items,
            vec![FlowItem::List {
                items: vec!["outer tail".to_string()],
                ordered: true,
                start: 4,
            }]
        );
    }

    #[test]
    fn test_unknown_block_with_content_becomes_paragraph() {
        let flow = walk(vec![
            Block::Unknown {
                kind: "footnote_definition".to_string(),
                content: Some(vec![Inline::text("note")]),
            },
            Block::Unknown {
                kind: "html_block".to_string(),
                content: None,
            },
        ]);
        assert_eq!(flow.items, vec![FlowItem::body("note")]);
    }

    #[test]
    fn test_heading_level_zero_is_malformed() {
        let styles = StyleRegistry::new();
        let doc = Document::with_blocks(vec![Block::heading(0, vec![])]);
        let result = BlockWalker::new(&styles).walk(&doc);
        assert!(matches!(result, Err(Error::MalformedTree(_))));
    }

    #[test]
    fn test_empty_table() {
        let flow = walk(vec![Block::Table(Table::new())]);
        assert_eq!(flow.items, vec![FlowItem::body("\n--------------------")]);
    }
}
