//! JSON rendering for document trees and flows.

use serde::Serialize;

use crate::error::{Error, Result};

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a document tree or flow to JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Document, Inline};
    use crate::render::{Flow, FlowItem};

    #[test]
    fn test_to_json_pretty() {
        let doc = Document::with_blocks(vec![Block::heading(2, vec![Inline::text("Test")])]);

        let json = to_json(&doc, JsonFormat::Pretty).unwrap();
        assert!(json.contains("\"heading\""));
        assert!(json.contains("Test"));
        assert!(json.contains('\n')); // Pretty has newlines
    }

    #[test]
    fn test_to_json_compact() {
        let flow = Flow::from(vec![FlowItem::Spacer { height: 6.0 }]);

        let json = to_json(&flow, JsonFormat::Compact).unwrap();
        assert_eq!(json, r#"{"items":[{"type":"spacer","height":6.0}]}"#);
    }
}
