//! Markdown to document-tree parsing on top of pulldown-cmark.
//!
//! pulldown-cmark produces a flat stream of start/end events. The builder
//! below keeps two stacks: block containers (root, quotes, list items, lists,
//! tables, code) and open inline containers (paragraphs, headings, emphasis,
//! links, ...). Events are balanced, so every end event closes the innermost
//! frame of the matching stack.

use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag, TagEnd};

use super::ParseOptions;
use crate::model::{Block, Document, Inline, List, ListItem, Table, TableRow};

/// Parse Markdown text into a document tree.
pub fn parse_markdown(text: &str, options: &ParseOptions) -> Document {
    MarkdownParser::new(options.clone()).parse(text)
}

/// Markdown parser producing [`Document`] trees.
#[derive(Debug, Clone, Default)]
pub struct MarkdownParser {
    options: ParseOptions,
}

impl MarkdownParser {
    /// Create a new parser with the given options.
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse Markdown text.
    pub fn parse(&self, text: &str) -> Document {
        let mut builder = TreeBuilder::new();
        for event in Parser::new_ext(text, self.options.to_pulldown()) {
            builder.handle(event);
        }
        let doc = builder.finish();
        log::debug!("Parsed {} root blocks", doc.block_count());
        doc
    }
}

enum BlockFrame {
    Root(Vec<Block>),
    Quote(Vec<Block>),
    Item(Vec<Block>),
    Other { kind: String, blocks: Vec<Block> },
    List { ordered: bool, start: Option<u64>, items: Vec<ListItem> },
    Table { rows: Vec<TableRow>, row: Vec<Vec<Inline>> },
    Code { info: Option<String>, text: String },
    Html,
}

enum InlineKind {
    Paragraph,
    Heading(u8),
    Cell,
    Emphasis,
    Strong,
    Link(String),
    Image(String),
    Other(&'static str),
}

struct InlineFrame {
    kind: InlineKind,
    content: Vec<Inline>,
}

struct TreeBuilder {
    blocks: Vec<BlockFrame>,
    inlines: Vec<InlineFrame>,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            blocks: vec![BlockFrame::Root(Vec::new())],
            inlines: Vec::new(),
        }
    }

    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => self.push_inline(Inline::code(code.as_ref())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::LineBreak),
            Event::Rule => self.push_block(Block::ThematicBreak),
            Event::InlineHtml(_) => self.push_inline(Inline::unknown("inline_html", None)),
            Event::FootnoteReference(_) => {
                self.push_inline(Inline::unknown("footnote_reference", None))
            }
            Event::TaskListMarker(_) => self.push_inline(Inline::unknown("task_list_marker", None)),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.push_inline(
                Inline::unknown("math", Some(vec![Inline::text(math.as_ref())])),
            ),
            // Raw HTML lines only occur inside HTML blocks, which are dropped.
            Event::Html(_) => {}
            #[allow(unreachable_patterns)]
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open_inline(InlineKind::Paragraph),
            Tag::Heading { level, .. } => self.open_inline(InlineKind::Heading(heading_number(level))),
            Tag::TableCell => self.open_inline(InlineKind::Cell),
            Tag::Emphasis => self.open_inline(InlineKind::Emphasis),
            Tag::Strong => self.open_inline(InlineKind::Strong),
            Tag::Strikethrough => self.open_inline(InlineKind::Other("strikethrough")),
            Tag::Superscript => self.open_inline(InlineKind::Other("superscript")),
            Tag::Subscript => self.open_inline(InlineKind::Other("subscript")),
            Tag::Link { dest_url, .. } => self.open_inline(InlineKind::Link(dest_url.to_string())),
            Tag::Image { dest_url, .. } => self.open_inline(InlineKind::Image(dest_url.to_string())),
            Tag::BlockQuote(_) => self.blocks.push(BlockFrame::Quote(Vec::new())),
            Tag::Item => self.blocks.push(BlockFrame::Item(Vec::new())),
            Tag::List(start) => self.blocks.push(BlockFrame::List {
                ordered: start.is_some(),
                start,
                items: Vec::new(),
            }),
            Tag::Table(_) => self.blocks.push(BlockFrame::Table {
                rows: Vec::new(),
                row: Vec::new(),
            }),
            Tag::TableHead | Tag::TableRow => {
                if let Some(BlockFrame::Table { row, .. }) = self.blocks.last_mut() {
                    row.clear();
                }
            }
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) if !info.trim().is_empty() => {
                        Some(info.trim().to_string())
                    }
                    _ => None,
                };
                self.blocks.push(BlockFrame::Code {
                    info,
                    text: String::new(),
                });
            }
            Tag::HtmlBlock => self.blocks.push(BlockFrame::Html),
            Tag::FootnoteDefinition(_) => self.open_other("footnote_definition"),
            Tag::DefinitionList => self.open_other("definition_list"),
            Tag::DefinitionListTitle => self.open_other("definition_list_title"),
            Tag::DefinitionListDefinition => self.open_other("definition_list_definition"),
            Tag::MetadataBlock(_) => self.open_other("metadata_block"),
            #[allow(unreachable_patterns)]
            _ => self.open_other("unknown"),
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::TableCell
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Superscript
            | TagEnd::Subscript
            | TagEnd::Link
            | TagEnd::Image => self.close_inline(),
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(BlockFrame::Table { rows, row }) = self.blocks.last_mut() {
                    rows.push(TableRow::new(std::mem::take(row)));
                }
            }
            _ => self.close_block(),
        }
    }

    fn text(&mut self, text: &str) {
        match self.blocks.last_mut() {
            Some(BlockFrame::Code { text: code, .. }) => code.push_str(text),
            Some(BlockFrame::Html) => {}
            _ => self.push_inline(Inline::text(text)),
        }
    }

    fn open_inline(&mut self, kind: InlineKind) {
        self.inlines.push(InlineFrame {
            kind,
            content: Vec::new(),
        });
    }

    fn open_other(&mut self, kind: &str) {
        self.blocks.push(BlockFrame::Other {
            kind: kind.to_string(),
            blocks: Vec::new(),
        });
    }

    fn close_inline(&mut self) {
        let Some(frame) = self.inlines.pop() else {
            return;
        };
        let content = frame.content;
        match frame.kind {
            InlineKind::Paragraph => self.push_block(Block::paragraph(content)),
            InlineKind::Heading(level) => self.push_block(Block::heading(level, content)),
            InlineKind::Cell => {
                if let Some(BlockFrame::Table { row, .. }) = self.blocks.last_mut() {
                    row.push(content);
                }
            }
            InlineKind::Emphasis => self.push_inline(Inline::emphasis(content)),
            InlineKind::Strong => self.push_inline(Inline::strong(content)),
            InlineKind::Link(url) => self.push_inline(Inline::link(content, url)),
            InlineKind::Image(url) => {
                let alt = crate::model::plain_text(&content);
                self.push_inline(Inline::image(alt, url));
            }
            InlineKind::Other(kind) => self.push_inline(Inline::unknown(kind, Some(content))),
        }
    }

    fn close_block(&mut self) {
        // The root frame is never closed by an event.
        if self.blocks.len() <= 1 {
            return;
        }
        let Some(frame) = self.blocks.pop() else {
            return;
        };
        match frame {
            BlockFrame::Root(blocks) => self.blocks.push(BlockFrame::Root(blocks)),
            BlockFrame::Quote(children) => self.push_block(Block::BlockQuote { children }),
            BlockFrame::Item(children) => {
                if let Some(BlockFrame::List { items, .. }) = self.blocks.last_mut() {
                    items.push(ListItem::new(children));
                }
            }
            BlockFrame::List {
                ordered,
                start,
                items,
            } => self.push_block(Block::List(List {
                ordered,
                start,
                items,
            })),
            BlockFrame::Table { rows, .. } => self.push_block(Block::Table(Table { rows })),
            BlockFrame::Code { info, text } => self.push_block(Block::CodeBlock { info, text }),
            BlockFrame::Html => self.push_block(Block::Unknown {
                kind: "html_block".to_string(),
                content: None,
            }),
            BlockFrame::Other { kind, blocks } => {
                let content = flatten_inline(&blocks);
                self.push_block(Block::Unknown { kind, content });
            }
        }
    }

    fn container(&mut self) -> Option<&mut Vec<Block>> {
        match self.blocks.last_mut() {
            Some(BlockFrame::Root(blocks))
            | Some(BlockFrame::Quote(blocks))
            | Some(BlockFrame::Item(blocks))
            | Some(BlockFrame::Other { blocks, .. }) => Some(blocks),
            _ => None,
        }
    }

    fn push_block(&mut self, block: Block) {
        match self.container() {
            Some(blocks) => blocks.push(block),
            None => log::debug!("Dropping {} block outside a container", block.kind()),
        }
    }

    /// Append inline content to the innermost open inline frame, or as bare
    /// text to the current block container (tight list items).
    fn push_inline(&mut self, node: Inline) {
        if let Some(frame) = self.inlines.last_mut() {
            frame.content.push(node);
            return;
        }
        let Some(blocks) = self.container() else {
            return;
        };
        match blocks.last_mut() {
            Some(Block::Text { content }) => content.push(node),
            _ => blocks.push(Block::Text {
                content: vec![node],
            }),
        }
    }

    fn finish(mut self) -> Document {
        while !self.inlines.is_empty() {
            self.close_inline();
        }
        while self.blocks.len() > 1 {
            self.close_block();
        }
        match self.blocks.pop() {
            Some(BlockFrame::Root(blocks)) => Document::with_blocks(blocks),
            _ => Document::new(),
        }
    }
}

fn heading_number(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

/// Collect the inline content of child blocks, separated by soft breaks.
fn flatten_inline(blocks: &[Block]) -> Option<Vec<Inline>> {
    let mut out = Vec::new();
    for content in blocks.iter().filter_map(Block::inline_content) {
        if !out.is_empty() {
            out.push(Inline::SoftBreak);
        }
        out.extend(content.iter().cloned());
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
