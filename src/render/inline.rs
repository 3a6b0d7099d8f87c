//! Inline composer: flattens inline content into the markup string consumed
//! by the page-flow engine.
//!
//! The markup is a tiny tag dialect: `<b>`, `<i>`, `<font face="Courier">`
//! and `<br/>`. Text is emitted unescaped; the engine treats anything that is
//! not one of these tags as literal text.

use crate::model::Inline;

/// Opening bold marker.
pub const BOLD_OPEN: &str = "<b>";
/// Closing bold marker.
pub const BOLD_CLOSE: &str = "</b>";
/// Opening italic marker.
pub const ITALIC_OPEN: &str = "<i>";
/// Closing italic marker.
pub const ITALIC_CLOSE: &str = "</i>";
/// Opening monospace marker.
pub const MONO_OPEN: &str = "<font face=\"Courier\">";
/// Closing monospace marker.
pub const MONO_CLOSE: &str = "</font>";
/// Explicit line break marker.
pub const BREAK: &str = "<br/>";

/// Compose inline content into a single markup string.
pub fn compose_inline(content: &[Inline]) -> String {
    let mut output = String::new();
    compose_into(&mut output, content);
    output
}

fn compose_into(output: &mut String, content: &[Inline]) {
    for node in content {
        match node {
            Inline::Text { text } => output.push_str(text),
            Inline::LineBreak => output.push_str(BREAK),
            Inline::SoftBreak => output.push(' '),
            Inline::Emphasis { children } => {
                output.push_str(ITALIC_OPEN);
                compose_into(output, children);
                output.push_str(ITALIC_CLOSE);
            }
            Inline::Strong { children } => {
                output.push_str(BOLD_OPEN);
                compose_into(output, children);
                output.push_str(BOLD_CLOSE);
            }
            Inline::Link { label, url } => {
                compose_into(output, label);
                if !url.is_empty() {
                    output.push_str(" (");
                    output.push_str(url);
                    output.push(')');
                }
            }
            Inline::Image { alt, url } => {
                output.push_str(&format!("[Image: {}] ({})", alt, url));
            }
            Inline::Code { code } => {
                output.push_str(MONO_OPEN);
                output.push_str(code);
                output.push_str(MONO_CLOSE);
            }
            Inline::Unknown { children, .. } => {
                if let Some(children) = children {
                    compose_into(output, children);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_identity() {
        let text = "Plain <text> & \"quotes\" stay as-is";
        assert_eq!(compose_inline(&[Inline::text(text)]), text);
    }

    #[test]
    fn test_breaks() {
        let content = vec![
            Inline::text("a"),
            Inline::SoftBreak,
            Inline::text("b"),
            Inline::LineBreak,
            Inline::text("c"),
        ];
        assert_eq!(compose_inline(&content), "a b<br/>c");
    }

    #[test]
    fn test_strong_wrapping_emphasis() {
        let content = vec![Inline::strong(vec![Inline::emphasis(vec![Inline::text("x")])])];
        assert_eq!(compose_inline(&content), "<b><i>x</i></b>");
    }

    #[test]
    fn test_emphasis_wrapping_strong() {
        let content = vec![Inline::emphasis(vec![Inline::strong(vec![Inline::text("x")])])];
        assert_eq!(compose_inline(&content), "<i><b>x</b></i>");
    }

    #[test]
    fn test_link_with_url() {
        let content = vec![Inline::link(
            vec![Inline::strong(vec![Inline::text("docs")])],
            "https://esphome.io",
        )];
        assert_eq!(compose_inline(&content), "<b>docs</b> (https://esphome.io)");
    }

    #[test]
    fn test_link_with_empty_url() {
        let content = vec![Inline::link(vec![Inline::text("label")], "")];
        assert_eq!(compose_inline(&content), "label");
    }

    #[test]
    fn test_image_placeholder() {
        let content = vec![Inline::image("Board", "https://esphome.io/board.png")];
        assert_eq!(
            compose_inline(&content),
            "[Image: Board] (https://esphome.io/board.png)"
        );
    }

    #[test]
    fn test_code_span() {
        let content = vec![Inline::code("api:")];
        assert_eq!(compose_inline(&content), "<font face=\"Courier\">api:</font>");
    }

    #[test]
    fn test_unknown_degrades_to_children_or_nothing() {
        let content = vec![
            Inline::unknown("strikethrough", Some(vec![Inline::text("old")])),
            Inline::unknown("inline_html", None),
            Inline::text("!"),
        ];
        assert_eq!(compose_inline(&content), "old!");
    }

    #[test]
    fn test_order_is_preserved() {
        let content: Vec<Inline> = ["1", "2", "3"].iter().map(|t| Inline::text(*t)).collect();
        assert_eq!(compose_inline(&content), "123");
    }
}
