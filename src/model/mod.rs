//! Document model types for parsed Markdown.
//!
//! This module defines the tree that bridges Markdown parsing and the flow
//! renderer. It is produced once from the aggregated text, read once by the
//! block walker, and then dropped.

mod document;
mod inline;
mod table;

pub use document::{Block, Document, List, ListItem};
pub use inline::Inline;
pub use table::{Table, TableRow};

pub(crate) use inline::plain_text;
