//! Document-level types.

use super::{Inline, Table};
use serde::{Deserialize, Serialize};

/// A parsed Markdown document: an ordered sequence of blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Root-level blocks in source order
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document from a list of blocks.
    pub fn with_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Add a block to the document.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Get the number of root-level blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(Block::plain_text)
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// A top-level structural unit of a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A heading (level 1-6)
    Heading {
        /// Heading level
        level: u8,
        /// Heading text
        content: Vec<Inline>,
    },

    /// A paragraph
    Paragraph {
        /// Paragraph text
        content: Vec<Inline>,
    },

    /// A bare inline run not wrapped in a paragraph (tight list items)
    Text {
        /// Inline content
        content: Vec<Inline>,
    },

    /// A block quote
    BlockQuote {
        /// Quoted blocks
        children: Vec<Block>,
    },

    /// An ordered or unordered list
    List(List),

    /// A thematic break (horizontal rule)
    ThematicBreak,

    /// A fenced or indented code block
    CodeBlock {
        /// Info string of a fenced block (language)
        info: Option<String>,
        /// Raw code text
        text: String,
    },

    /// A pipe table
    Table(Table),

    /// Any block kind without dedicated handling
    Unknown {
        /// Name of the source construct (e.g. `html_block`)
        kind: String,
        /// Inline content, if the construct carries any
        content: Option<Vec<Inline>>,
    },
}

impl Block {
    /// Create a heading block.
    pub fn heading(level: u8, content: Vec<Inline>) -> Self {
        Block::Heading { level, content }
    }

    /// Create a paragraph block.
    pub fn paragraph(content: Vec<Inline>) -> Self {
        Block::Paragraph { content }
    }

    /// Create a paragraph holding plain text.
    pub fn paragraph_text(text: impl Into<String>) -> Self {
        Block::Paragraph {
            content: vec![Inline::text(text)],
        }
    }

    /// Create a code block.
    pub fn code(info: Option<String>, text: impl Into<String>) -> Self {
        Block::CodeBlock {
            info,
            text: text.into(),
        }
    }

    /// Short name of the block kind, used in logs and errors.
    pub fn kind(&self) -> &str {
        match self {
            Block::Heading { .. } => "heading",
            Block::Paragraph { .. } => "paragraph",
            Block::Text { .. } => "text",
            Block::BlockQuote { .. } => "block_quote",
            Block::List(_) => "list",
            Block::ThematicBreak => "thematic_break",
            Block::CodeBlock { .. } => "code_block",
            Block::Table(_) => "table",
            Block::Unknown { kind, .. } => kind.as_str(),
        }
    }

    /// Inline content carried directly by this block, if any.
    pub fn inline_content(&self) -> Option<&[Inline]> {
        match self {
            Block::Heading { content, .. }
            | Block::Paragraph { content }
            | Block::Text { content } => Some(content),
            Block::Unknown { content, .. } => content.as_deref(),
            _ => None,
        }
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> String {
        match self {
            Block::BlockQuote { children } => children
                .iter()
                .map(Block::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::List(list) => list
                .items
                .iter()
                .map(ListItem::plain_text)
                .collect::<Vec<_>>()
                .join("\n"),
            Block::ThematicBreak => String::new(),
            Block::CodeBlock { text, .. } => text.clone(),
            Block::Table(table) => table.plain_text(),
            _ => self
                .inline_content()
                .map(super::inline::plain_text)
                .unwrap_or_default(),
        }
    }
}

/// An ordered or unordered list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct List {
    /// Whether items are numbered
    pub ordered: bool,

    /// First number of an ordered list
    pub start: Option<u64>,

    /// List items in order
    pub items: Vec<ListItem>,
}

impl List {
    /// Create an unordered list.
    pub fn unordered(items: Vec<ListItem>) -> Self {
        Self {
            ordered: false,
            start: None,
            items,
        }
    }

    /// Create an ordered list starting at `start`.
    pub fn ordered(start: u64, items: Vec<ListItem>) -> Self {
        Self {
            ordered: true,
            start: Some(start),
            items,
        }
    }
}

/// A single list item: a sequence of child blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Blocks inside the item (paragraphs, bare text, nested lists, ...)
    pub children: Vec<Block>,
}

impl ListItem {
    /// Create a list item from child blocks.
    pub fn new(children: Vec<Block>) -> Self {
        Self { children }
    }

    /// Create a list item holding one plain-text paragraph.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self::new(vec![Block::paragraph_text(text)])
    }

    /// Get plain text content of the item.
    pub fn plain_text(&self) -> String {
        self.children
            .iter()
            .map(Block::plain_text)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TableRow;

    #[test]
    fn test_document_plain_text() {
        let doc = Document::with_blocks(vec![
            Block::heading(1, vec![Inline::text("Title")]),
            Block::ThematicBreak,
            Block::paragraph_text("Body"),
        ]);
        assert_eq!(doc.plain_text(), "Title\n\nBody");
        assert_eq!(doc.block_count(), 3);
    }

    #[test]
    fn test_block_kind() {
        assert_eq!(Block::ThematicBreak.kind(), "thematic_break");
        let unknown = Block::Unknown {
            kind: "html_block".to_string(),
            content: None,
        };
        assert_eq!(unknown.kind(), "html_block");
        assert!(unknown.inline_content().is_none());
    }

    #[test]
    fn test_list_item_plain_text() {
        let list = List::ordered(3, vec![ListItem::with_text("a"), ListItem::with_text("b")]);
        assert_eq!(Block::List(list).plain_text(), "a\nb");
    }

    #[test]
    fn test_table_block_plain_text() {
        let mut table = Table::new();
        table.add_row(TableRow::from_texts(&["A", "B"]));
        assert_eq!(Block::Table(table).plain_text(), "A\tB");
    }
}
