//! Inline-level types.

use serde::{Deserialize, Serialize};

/// A sub-paragraph markup unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Inline {
    /// A run of plain text
    Text {
        /// Literal characters
        text: String,
    },

    /// A hard line break
    LineBreak,

    /// A soft line break (source newline inside a paragraph)
    SoftBreak,

    /// Emphasised content
    Emphasis {
        /// Wrapped content
        children: Vec<Inline>,
    },

    /// Strongly emphasised content
    Strong {
        /// Wrapped content
        children: Vec<Inline>,
    },

    /// A hyperlink
    Link {
        /// Link label
        label: Vec<Inline>,
        /// Link destination (may be empty)
        url: String,
    },

    /// An image reference
    Image {
        /// Alternative text
        alt: String,
        /// Image source
        url: String,
    },

    /// A code span
    Code {
        /// Raw code text
        code: String,
    },

    /// Any inline kind without dedicated handling
    Unknown {
        /// Name of the source construct (e.g. `strikethrough`)
        kind: String,
        /// Nested content, if the construct carries any
        children: Option<Vec<Inline>>,
    },
}

impl Inline {
    /// Create a plain text node.
    pub fn text(text: impl Into<String>) -> Self {
        Inline::Text { text: text.into() }
    }

    /// Create an emphasis node.
    pub fn emphasis(children: Vec<Inline>) -> Self {
        Inline::Emphasis { children }
    }

    /// Create a strong emphasis node.
    pub fn strong(children: Vec<Inline>) -> Self {
        Inline::Strong { children }
    }

    /// Create a link node.
    pub fn link(label: Vec<Inline>, url: impl Into<String>) -> Self {
        Inline::Link {
            label,
            url: url.into(),
        }
    }

    /// Create an image node.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Inline::Image {
            alt: alt.into(),
            url: url.into(),
        }
    }

    /// Create a code span.
    pub fn code(code: impl Into<String>) -> Self {
        Inline::Code { code: code.into() }
    }

    /// Create an unknown node.
    pub fn unknown(kind: impl Into<String>, children: Option<Vec<Inline>>) -> Self {
        Inline::Unknown {
            kind: kind.into(),
            children,
        }
    }

    /// Get the plain text of this node, without any markup.
    pub fn plain_text(&self) -> String {
        match self {
            Inline::Text { text } => text.clone(),
            Inline::LineBreak => "\n".to_string(),
            Inline::SoftBreak => " ".to_string(),
            Inline::Emphasis { children } | Inline::Strong { children } => plain_text(children),
            Inline::Link { label, .. } => plain_text(label),
            Inline::Image { alt, .. } => alt.clone(),
            Inline::Code { code } => code.clone(),
            Inline::Unknown { children, .. } => {
                children.as_deref().map(plain_text).unwrap_or_default()
            }
        }
    }
}

/// Concatenate the plain text of a sequence of inline nodes.
pub(crate) fn plain_text(content: &[Inline]) -> String {
    content.iter().map(Inline::plain_text).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_flattens_markup() {
        let content = vec![
            Inline::text("a "),
            Inline::strong(vec![Inline::emphasis(vec![Inline::text("b")])]),
            Inline::SoftBreak,
            Inline::link(vec![Inline::text("c")], "https://example.com"),
        ];
        assert_eq!(plain_text(&content), "a b c");
    }

    #[test]
    fn test_unknown_without_children_is_empty() {
        assert_eq!(Inline::unknown("inline_html", None).plain_text(), "");
    }

    #[test]
    fn test_serde_tagging() {
        let json = serde_json::to_string(&Inline::code("x")).unwrap();
        assert_eq!(json, r#"{"type":"code","code":"x"}"#);
    }
}
