//! Statistics over a rendered flow.

use serde::{Deserialize, Serialize};

use super::{Flow, FlowItem};

/// Counts collected from an output flow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowStats {
    /// Number of headings
    pub heading_count: u32,

    /// Number of body paragraphs (including quotes and tables)
    pub paragraph_count: u32,

    /// Number of lists
    pub list_count: u32,

    /// Number of list items across all lists
    pub list_item_count: u32,

    /// Number of preformatted blocks
    pub code_block_count: u32,

    /// Number of horizontal rules
    pub horizontal_rule_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl FlowStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a flow.
    pub fn from_flow(flow: &Flow) -> Self {
        let mut stats = Self::new();
        for item in flow {
            stats.add_item(item);
        }
        stats
    }

    /// Account for one instruction.
    pub fn add_item(&mut self, item: &FlowItem) {
        match item {
            FlowItem::Heading { text, .. } => {
                self.heading_count += 1;
                self.count_text(text);
            }
            FlowItem::Paragraph { text, .. } => {
                self.paragraph_count += 1;
                self.count_text(text);
            }
            FlowItem::List { items, .. } => {
                self.list_count += 1;
                self.list_item_count += items.len() as u32;
                for text in items {
                    self.count_text(text);
                }
            }
            FlowItem::Preformatted { text, .. } => {
                self.code_block_count += 1;
                self.count_text(text);
            }
            FlowItem::HorizontalRule { .. } => self.horizontal_rule_count += 1,
            FlowItem::Spacer { .. } => {}
        }
    }

    /// Add word counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }
}
