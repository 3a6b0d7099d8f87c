//! Line breaking and pagination of an output flow.
//!
//! Coordinates are PDF user space: origin at the bottom-left corner, `y`
//! growing upwards.

use crate::render::{
    Flow, FlowItem, FontFamily, PageGeometry, ParagraphStyle, StyleName, StyleRegistry,
};

use super::encoding::normalize;
use super::markup::{parse_markup, TextStyle, Token};
use super::metrics::StandardFont;

/// Hanging indent of list item text, in points.
pub const LIST_INDENT: f32 = 18.0;

const BULLET: &str = "\u{2022}";
const TAB_WIDTH: usize = 4;

/// A piece of a line drawn in a single font.
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// Font to draw with
    pub font: StandardFont,
    /// Font size in points
    pub size: f32,
    /// Text, NFC-normalised
    pub text: String,
}

/// A drawing instruction on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// A line of text starting at `(x, y)` on its baseline
    Text {
        x: f32,
        y: f32,
        fragments: Vec<Fragment>,
    },
    /// A horizontal rule
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

/// Drawing instructions for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    /// Instructions in paint order
    pub ops: Vec<DrawOp>,
}

impl PageLayout {
    /// Check if nothing is drawn on the page.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Concatenated text of every line, one line per entry.
    pub fn text_lines(&self) -> Vec<String> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { fragments, .. } => {
                    Some(fragments.iter().map(|f| f.text.as_str()).collect())
                }
                DrawOp::Rule { .. } => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct Line {
    fragments: Vec<Fragment>,
    width: f32,
}

impl Line {
    fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    fn push(&mut self, font: StandardFont, size: f32, text: &str) {
        self.width += font.text_width(text, size);
        if let Some(last) = self.fragments.last_mut() {
            if last.font == font && last.size == size {
                last.text.push_str(text);
                return;
            }
        }
        self.fragments.push(Fragment {
            font,
            size,
            text: text.to_string(),
        });
    }
}

/// Greedy word-wrapping over styled runs.
struct LineBreaker {
    max_width: f32,
    size: f32,
    lines: Vec<Line>,
    line: Line,
    word: Vec<(StandardFont, String)>,
    word_width: f32,
    pending_space: Option<StandardFont>,
}

impl LineBreaker {
    fn new(max_width: f32, size: f32) -> Self {
        Self {
            max_width,
            size,
            lines: Vec::new(),
            line: Line::default(),
            word: Vec::new(),
            word_width: 0.0,
            pending_space: None,
        }
    }

    fn push_text(&mut self, font: StandardFont, text: &str) {
        for c in text.chars() {
            if c.is_whitespace() {
                self.end_word();
                if !self.line.is_empty() {
                    self.pending_space = Some(font);
                }
            } else {
                self.word_width += font.text_width(c.encode_utf8(&mut [0; 4]), self.size);
                match self.word.last_mut() {
                    Some((last, text)) if *last == font => text.push(c),
                    _ => self.word.push((font, c.to_string())),
                }
            }
        }
    }

    fn hard_break(&mut self) {
        self.end_word();
        self.lines.push(std::mem::take(&mut self.line));
        self.pending_space = None;
    }

    fn end_word(&mut self) {
        if self.word.is_empty() {
            return;
        }
        let word = std::mem::take(&mut self.word);
        let word_width = std::mem::replace(&mut self.word_width, 0.0);
        let space = self.pending_space.take();

        let space_width = match space {
            Some(font) if !self.line.is_empty() => font.text_width(" ", self.size),
            _ => 0.0,
        };

        if self.line.width + space_width + word_width <= self.max_width {
            if let Some(font) = space.filter(|_| !self.line.is_empty()) {
                self.line.push(font, self.size, " ");
            }
            for (font, text) in &word {
                self.line.push(*font, self.size, text);
            }
            return;
        }

        if !self.line.is_empty() {
            self.lines.push(std::mem::take(&mut self.line));
        }

        if word_width <= self.max_width {
            for (font, text) in &word {
                self.line.push(*font, self.size, text);
            }
        } else {
            self.split_word(&word);
        }
    }

    /// Break a word wider than the line at character boundaries.
    fn split_word(&mut self, word: &[(StandardFont, String)]) {
        let mut buf = [0; 4];
        for (font, text) in word {
            for c in text.chars() {
                let piece = c.encode_utf8(&mut buf);
                let width = font.text_width(piece, self.size);
                if !self.line.is_empty() && self.line.width + width > self.max_width {
                    self.lines.push(std::mem::take(&mut self.line));
                }
                self.line.push(*font, self.size, piece);
            }
        }
    }

    fn finish(mut self) -> Vec<Line> {
        self.end_word();
        if !self.line.is_empty() {
            self.lines.push(self.line);
        }
        self.lines
    }
}

fn base_style(style: &ParagraphStyle) -> TextStyle {
    TextStyle {
        bold: style.bold,
        italic: style.italic,
        mono: style.font == FontFamily::Courier,
    }
}

fn wrap_markup(markup: &str, style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let text = normalize(markup);
    let mut breaker = LineBreaker::new(max_width, style.font_size);
    for token in parse_markup(&text, base_style(style)) {
        match token {
            Token::Text(run) => breaker.push_text(StandardFont::select(run.style), &run.text),
            Token::Break => breaker.hard_break(),
        }
    }
    breaker.finish()
}

/// Hard-wrap verbatim text at the column limit of a fixed-pitch font.
fn wrap_preformatted(text: &str, style: &ParagraphStyle, max_width: f32) -> Vec<Line> {
    let font = StandardFont::select(base_style(style));
    let advance = font.text_width(" ", style.font_size).max(f32::EPSILON);
    let columns = ((max_width / advance).floor() as usize).max(1);

    let mut lines = Vec::new();
    for raw in normalize(text).split('\n') {
        let expanded = raw.replace('\t', &" ".repeat(TAB_WIDTH));
        let chars: Vec<char> = expanded.trim_end().chars().collect();
        if chars.is_empty() {
            lines.push(Line::default());
            continue;
        }
        for chunk in chars.chunks(columns) {
            let mut line = Line::default();
            line.push(font, style.font_size, &chunk.iter().collect::<String>());
            lines.push(line);
        }
    }
    lines
}

/// Paginates a flow into page layouts.
pub struct LayoutEngine<'a> {
    styles: &'a StyleRegistry,
    geometry: PageGeometry,
    pages: Vec<PageLayout>,
    page: PageLayout,
    cursor: f32,
    at_top: bool,
}

impl<'a> LayoutEngine<'a> {
    /// Create an engine for a page geometry.
    pub fn new(styles: &'a StyleRegistry, geometry: PageGeometry) -> Self {
        Self {
            styles,
            geometry,
            pages: Vec::new(),
            page: PageLayout::default(),
            cursor: geometry.height() - geometry.margins.top,
            at_top: true,
        }
    }

    /// Lay out every instruction and return the pages. Always at least one.
    pub fn layout(mut self, flow: &Flow) -> Vec<PageLayout> {
        for item in flow {
            self.place(item);
        }
        self.pages.push(self.page);
        self.pages
    }

    fn top(&self) -> f32 {
        self.geometry.height() - self.geometry.margins.top
    }

    fn bottom(&self) -> f32 {
        self.geometry.margins.bottom
    }

    fn left(&self) -> f32 {
        self.geometry.margins.left
    }

    fn new_page(&mut self) {
        let page = std::mem::take(&mut self.page);
        self.pages.push(page);
        self.cursor = self.top();
        self.at_top = true;
    }

    /// Move down by `height`, starting a new page if it does not fit.
    fn reserve(&mut self, height: f32) {
        if !self.at_top && self.cursor - height < self.bottom() {
            self.new_page();
        }
        self.cursor -= height;
        self.at_top = false;
    }

    fn skip(&mut self, height: f32) {
        if self.at_top {
            return;
        }
        self.cursor -= height;
        if self.cursor < self.bottom() {
            self.new_page();
        }
    }

    fn place(&mut self, item: &FlowItem) {
        match item {
            FlowItem::Paragraph { text, style } | FlowItem::Heading { text, style, .. } => {
                let style = self.styles.get(*style).clone();
                let lines = wrap_markup(text, &style, self.text_width(&style, 0.0));
                self.place_lines(&style, lines, 0.0);
            }
            FlowItem::Preformatted { text, style } => {
                let style = self.styles.get(*style).clone();
                let lines = wrap_preformatted(text, &style, self.text_width(&style, 0.0));
                self.place_lines(&style, lines, 0.0);
            }
            FlowItem::List {
                items,
                ordered,
                start,
            } => self.place_list(items, *ordered, *start),
            FlowItem::Spacer { height } => self.skip(*height),
            FlowItem::HorizontalRule { thickness } => {
                self.reserve(*thickness);
                let y = self.cursor + thickness / 2.0;
                let x1 = self.left();
                self.page.ops.push(DrawOp::Rule {
                    x1,
                    x2: x1 + self.geometry.frame_width(),
                    y,
                    thickness: *thickness,
                });
            }
        }
    }

    fn text_width(&self, style: &ParagraphStyle, extra_indent: f32) -> f32 {
        (self.geometry.frame_width() - style.left_indent - style.right_indent - extra_indent)
            .max(1.0)
    }

    fn place_lines(&mut self, style: &ParagraphStyle, lines: Vec<Line>, extra_indent: f32) {
        self.skip(style.space_before);
        self.draw_lines(style, lines, extra_indent, None);
        self.skip(style.space_after);
    }

    fn draw_lines(
        &mut self,
        style: &ParagraphStyle,
        lines: Vec<Line>,
        extra_indent: f32,
        label: Option<String>,
    ) {
        let x = self.left() + style.left_indent + extra_indent;
        let mut label = label;

        for line in lines {
            self.reserve(style.leading);
            let y = self.cursor + (style.leading - style.font_size);

            if let Some(label) = label.take() {
                let mut marker = Line::default();
                marker.push(StandardFont::select(base_style(style)), style.font_size, &label);
                self.page.ops.push(DrawOp::Text {
                    x: self.left() + style.left_indent,
                    y,
                    fragments: marker.fragments,
                });
            }
            if !line.is_empty() {
                self.page.ops.push(DrawOp::Text {
                    x,
                    y,
                    fragments: line.fragments,
                });
            }
        }
    }

    fn place_list(&mut self, items: &[String], ordered: bool, start: u64) {
        let style = self.styles.get(StyleName::Body).clone();
        let width = self.text_width(&style, LIST_INDENT);

        self.skip(style.space_before);
        for (index, item) in items.iter().enumerate() {
            let label = if ordered {
                format!("{}.", start.saturating_add(index as u64))
            } else {
                BULLET.to_string()
            };
            let mut lines = wrap_markup(item, &style, width);
            if lines.is_empty() {
                lines.push(Line::default());
            }
            self.draw_lines(&style, lines, LIST_INDENT, Some(label));
        }
        self.skip(style.space_after);
    }
}

/// Lay out a flow with the given styles and geometry.
pub fn layout_flow(flow: &Flow, styles: &StyleRegistry, geometry: &PageGeometry) -> Vec<PageLayout> {
    LayoutEngine::new(styles, *geometry).layout(flow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Margins, PageSize};

    fn layout(items: Vec<FlowItem>) -> Vec<PageLayout> {
        layout_flow(&Flow::from(items), &StyleRegistry::new(), &PageGeometry::default())
    }

    fn small_page() -> PageGeometry {
        PageGeometry::new(
            PageSize::Custom {
                width: 200.0,
                height: 100.0,
            },
            Margins::uniform(10.0),
        )
    }

    #[test]
    fn test_empty_flow_has_one_page() {
        let pages = layout(vec![]);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].is_empty());
    }

    #[test]
    fn test_short_paragraph_is_one_line() {
        let pages = layout(vec![FlowItem::body("Hello <b>world</b>")]);
        assert_eq!(pages[0].text_lines(), vec!["Hello world".to_string()]);

        match &pages[0].ops[0] {
            DrawOp::Text { fragments, x, .. } => {
                assert_eq!(fragments.len(), 2);
                assert_eq!(fragments[0].font, StandardFont::Helvetica);
                assert_eq!(fragments[1].font, StandardFont::HelveticaBold);
                assert!((x - 56.69).abs() < 0.01);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_long_paragraph_wraps_within_frame() {
        let text = "lorem ipsum dolor sit amet ".repeat(40);
        let geometry = PageGeometry::default();
        let pages = layout_flow(
            &Flow::from(vec![FlowItem::body(text.trim())]),
            &StyleRegistry::new(),
            &geometry,
        );

        let lines = pages[0].text_lines();
        assert!(lines.len() > 1);
        for line in &lines {
            let width = StandardFont::Helvetica.text_width(line, 10.0);
            assert!(width <= geometry.frame_width() + 0.01);
            assert!(!line.starts_with(' '));
        }
    }

    #[test]
    fn test_overlong_word_is_split() {
        let word = "x".repeat(200);
        let pages = layout_flow(
            &Flow::from(vec![FlowItem::body(word.clone())]),
            &StyleRegistry::new(),
            &small_page(),
        );
        let joined: String = pages.iter().flat_map(|p| p.text_lines()).collect();
        assert_eq!(joined, word);
        assert!(pages.iter().map(|p| p.text_lines().len()).sum::<usize>() > 1);
    }

    #[test]
    fn test_newline_is_hard_break() {
        let pages = layout(vec![FlowItem::body("A | B\n--------------------\n1 | 2")]);
        assert_eq!(
            pages[0].text_lines(),
            vec!["A | B", "--------------------", "1 | 2"]
        );
    }

    #[test]
    fn test_preformatted_keeps_indentation() {
        let pages = layout(vec![FlowItem::Preformatted {
            text: "sensor:\n  - platform: dht\n\nend".to_string(),
            style: StyleName::Code,
        }]);
        let lines = pages[0].text_lines();
        assert_eq!(lines, vec!["sensor:", "  - platform: dht", "end"]);
        match &pages[0].ops[0] {
            DrawOp::Text { fragments, .. } => assert_eq!(fragments[0].font, StandardFont::Courier),
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_list_labels() {
        let pages = layout(vec![
            FlowItem::List {
                items: vec!["foo".to_string(), "bar".to_string()],
                ordered: false,
                start: 1,
            },
            FlowItem::List {
                items: vec!["x".to_string()],
                ordered: true,
                start: 3,
            },
        ]);
        assert_eq!(
            pages[0].text_lines(),
            vec!["\u{2022}", "foo", "\u{2022}", "bar", "3.", "x"]
        );
    }

    #[test]
    fn test_list_numbers_saturate() {
        let pages = layout(vec![FlowItem::List {
            items: vec!["a".to_string(), "b".to_string()],
            ordered: true,
            start: u64::MAX,
        }]);
        let max = format!("{}.", u64::MAX);
        assert_eq!(pages[0].text_lines(), vec![max.as_str(), "a", max.as_str(), "b"]);
    }

    #[test]
    fn test_pagination() {
        let items: Vec<FlowItem> = (0..20).map(|i| FlowItem::body(format!("line {}", i))).collect();
        let pages = layout_flow(&Flow::from(items), &StyleRegistry::new(), &small_page());
        assert!(pages.len() > 1);

        let total: usize = pages.iter().map(|p| p.text_lines().len()).sum();
        assert_eq!(total, 20);
        for page in &pages {
            for op in &page.ops {
                if let DrawOp::Text { y, .. } = op {
                    assert!(*y >= 10.0);
                }
            }
        }
    }

    #[test]
    fn test_rule_spans_frame() {
        let pages = layout(vec![
            FlowItem::Spacer { height: 6.0 },
            FlowItem::HorizontalRule { thickness: 0.5 },
            FlowItem::Spacer { height: 6.0 },
        ]);
        let geometry = PageGeometry::default();
        match &pages[0].ops[0] {
            DrawOp::Rule { x1, x2, thickness, .. } => {
                assert!((x2 - x1 - geometry.frame_width()).abs() < 0.01);
                assert_eq!(*thickness, 0.5);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }
}
