//! Style registry: the fixed mapping from logical style names to layout
//! parameters used by the page-flow engine.

use serde::{Deserialize, Serialize};

/// Logical paragraph style names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StyleName {
    /// Top-level heading
    Heading1,
    /// Second-level heading
    Heading2,
    /// Third-level heading (and everything deeper)
    Heading3,
    /// Body text, list items, quotes, tables
    Body,
    /// Preformatted code
    Code,
}

impl StyleName {
    /// Heading style for a heading level, collapsing levels above 3.
    pub fn for_heading(level: u8) -> Self {
        match level {
            0 | 1 => StyleName::Heading1,
            2 => StyleName::Heading2,
            _ => StyleName::Heading3,
        }
    }

    /// All style names, in registry order.
    pub fn all() -> [StyleName; 5] {
        [
            StyleName::Heading1,
            StyleName::Heading2,
            StyleName::Heading3,
            StyleName::Body,
            StyleName::Code,
        ]
    }
}

/// Base font families available to the page-flow engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontFamily {
    /// Proportional sans-serif (Helvetica)
    Helvetica,
    /// Monospace (Courier)
    Courier,
}

/// Layout parameters of one paragraph style. All lengths are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Base font family
    pub font: FontFamily,
    /// Whether the base font is bold
    pub bold: bool,
    /// Whether the base font is oblique
    pub italic: bool,
    /// Font size
    pub font_size: f32,
    /// Distance between baselines
    pub leading: f32,
    /// Vertical space before the paragraph
    pub space_before: f32,
    /// Vertical space after the paragraph
    pub space_after: f32,
    /// Left indentation from the frame
    pub left_indent: f32,
    /// Right indentation from the frame
    pub right_indent: f32,
}

impl ParagraphStyle {
    fn new(font: FontFamily, font_size: f32, leading: f32) -> Self {
        Self {
            font,
            bold: false,
            italic: false,
            font_size,
            leading,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            right_indent: 0.0,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    fn spacing(mut self, before: f32, after: f32) -> Self {
        self.space_before = before;
        self.space_after = after;
        self
    }

    fn indent(mut self, left: f32, right: f32) -> Self {
        self.left_indent = left;
        self.right_indent = right;
        self
    }
}

/// Immutable registry of the five paragraph styles.
///
/// Built once before rendering and passed by reference to the walker and the
/// page-flow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleRegistry {
    heading1: ParagraphStyle,
    heading2: ParagraphStyle,
    heading3: ParagraphStyle,
    body: ParagraphStyle,
    code: ParagraphStyle,
}

impl StyleRegistry {
    /// Build the registry.
    pub fn new() -> Self {
        use FontFamily::{Courier, Helvetica};

        Self {
            heading1: ParagraphStyle::new(Helvetica, 18.0, 22.0)
                .bold()
                .spacing(12.0, 6.0),
            heading2: ParagraphStyle::new(Helvetica, 14.0, 18.0)
                .bold()
                .spacing(12.0, 6.0),
            heading3: ParagraphStyle::new(Helvetica, 12.0, 14.0)
                .bold()
                .italic()
                .spacing(10.0, 4.0),
            body: ParagraphStyle::new(Helvetica, 10.0, 12.0).spacing(6.0, 6.0),
            code: ParagraphStyle::new(Courier, 9.0, 11.0)
                .spacing(6.0, 6.0)
                .indent(6.0, 6.0),
        }
    }

    /// Look up a style by name.
    pub fn get(&self, name: StyleName) -> &ParagraphStyle {
        match name {
            StyleName::Heading1 => &self.heading1,
            StyleName::Heading2 => &self.heading2,
            StyleName::Heading3 => &self.heading3,
            StyleName::Body => &self.body,
            StyleName::Code => &self.code,
        }
    }
}

impl Default for StyleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_deterministic() {
        assert_eq!(StyleRegistry::new(), StyleRegistry::default());
    }

    #[test]
    fn test_heading_style_clamping() {
        assert_eq!(StyleName::for_heading(1), StyleName::Heading1);
        assert_eq!(StyleName::for_heading(2), StyleName::Heading2);
        for level in 3..=6 {
            assert_eq!(StyleName::for_heading(level), StyleName::Heading3);
        }
    }

    #[test]
    fn test_code_style() {
        let registry = StyleRegistry::new();
        let code = registry.get(StyleName::Code);
        assert_eq!(code.font, FontFamily::Courier);
        assert_eq!(code.font_size, 9.0);
        assert_eq!(code.leading, 11.0);
        assert_eq!(code.left_indent, 6.0);
        assert_eq!(code.right_indent, 6.0);
    }

    #[test]
    fn test_heading_sizes_decrease() {
        let registry = StyleRegistry::new();
        let sizes: Vec<f32> = [StyleName::Heading1, StyleName::Heading2, StyleName::Heading3]
            .iter()
            .map(|name| registry.get(*name).font_size)
            .collect();
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
        assert!(registry.get(StyleName::Heading3).italic);
    }
}
