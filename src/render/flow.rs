//! Output flow: the ordered layout instructions handed to the page-flow engine.

use serde::{Deserialize, Serialize};

use super::StyleName;

/// A single layout instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowItem {
    /// A paragraph of markup text
    Paragraph {
        /// Markup text (see [`crate::render::compose_inline`])
        text: String,
        /// Paragraph style
        style: StyleName,
    },

    /// A heading
    Heading {
        /// Markup text
        text: String,
        /// Clamped heading level (1-3)
        level: u8,
        /// Heading style
        style: StyleName,
    },

    /// A bulleted or numbered list
    List {
        /// Markup text of each item
        items: Vec<String>,
        /// Numbered rather than bulleted
        ordered: bool,
        /// First number of a numbered list
        start: u64,
    },

    /// Verbatim text, line breaks preserved
    Preformatted {
        /// Raw text
        text: String,
        /// Text style
        style: StyleName,
    },

    /// A rule across the full frame width
    HorizontalRule {
        /// Line thickness in points
        thickness: f32,
    },

    /// Vertical whitespace
    Spacer {
        /// Height in points
        height: f32,
    },
}

impl FlowItem {
    /// Create a body paragraph.
    pub fn body(text: impl Into<String>) -> Self {
        FlowItem::Paragraph {
            text: text.into(),
            style: StyleName::Body,
        }
    }

    /// Short name of the instruction kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FlowItem::Paragraph { .. } => "paragraph",
            FlowItem::Heading { .. } => "heading",
            FlowItem::List { .. } => "list",
            FlowItem::Preformatted { .. } => "preformatted",
            FlowItem::HorizontalRule { .. } => "horizontal_rule",
            FlowItem::Spacer { .. } => "spacer",
        }
    }
}

/// An ordered sequence of layout instructions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    /// Instructions in submission order
    pub items: Vec<FlowItem>,
}

impl Flow {
    /// Create an empty flow.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an instruction.
    pub fn push(&mut self, item: FlowItem) {
        self.items.push(item);
    }

    /// Number of instructions.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the flow holds no instructions.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over instructions in order.
    pub fn iter(&self) -> std::slice::Iter<'_, FlowItem> {
        self.items.iter()
    }
}

impl From<Vec<FlowItem>> for Flow {
    fn from(items: Vec<FlowItem>) -> Self {
        Self { items }
    }
}

impl<'a> IntoIterator for &'a Flow {
    type Item = &'a FlowItem;
    type IntoIter = std::slice::Iter<'a, FlowItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
