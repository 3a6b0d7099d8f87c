//! # docbind
//!
//! Bind a tree of markdown documentation pages into a single markdown file
//! and a paginated PDF.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docbind::Docbind;
//!
//! fn main() -> docbind::Result<()> {
//!     let report = Docbind::new("third_party/esphome-docs/content")
//!         .with_output_dir("data")
//!         .with_name("esphome-all")
//!         .build()?;
//!
//!     println!("{} files, PDF by {}", report.file_count, report.strategy);
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Aggregate**: collect pages, order by front-matter weight, rewrite
//!   shortcodes and links, demote headings, concatenate
//! - **Render**: hand the combined file to pandoc, falling back to the
//!   built-in renderer (markdown tree, block walker, PDF layout)

pub mod aggregate;
pub mod convert;
pub mod error;
pub mod model;
pub mod parser;
pub mod pdf;
pub mod render;

// Re-export commonly used types
pub use aggregate::{Aggregate, AggregateOptions, DEFAULT_SITE_URL};
pub use convert::{Attempt, RenderChain, RenderJob, RenderOutcome, RenderStrategy};
pub use error::{Error, Result};
pub use model::{Block, Document, Inline, List, ListItem, Table, TableRow};
pub use parser::{MarkdownParser, ParseOptions};
pub use render::{
    BlockWalker, Flow, FlowItem, FlowRenderer, JsonFormat, PageFlowEngine, PageGeometry,
    PageSize, RenderOptions, StyleName, StyleRegistry, SubmitReport,
};

use std::fs;
use std::path::{Path, PathBuf};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse markdown into a document tree with default options.
///
/// # Example
///
/// ```
/// let doc = docbind::parse_markdown("# Hello\n\nWorld\n");
/// assert_eq!(doc.block_count(), 2);
/// ```
pub fn parse_markdown(text: &str) -> Document {
    parser::parse_markdown(text, &ParseOptions::default())
}

/// Parse markdown with custom options.
pub fn parse_markdown_with_options(text: &str, options: &ParseOptions) -> Document {
    parser::parse_markdown(text, options)
}

/// Parse markdown and walk it into an output flow.
///
/// # Example
///
/// ```
/// let flow = docbind::markdown_to_flow("# Title\n\nBody\n\n    code\n").unwrap();
/// assert_eq!(flow.len(), 3);
/// ```
pub fn markdown_to_flow(text: &str) -> Result<Flow> {
    let styles = StyleRegistry::new();
    BlockWalker::new(&styles).walk(&parse_markdown(text))
}

/// Render markdown to PDF bytes with the built-in renderer.
pub fn markdown_to_pdf_bytes(text: &str) -> Result<Vec<u8>> {
    markdown_to_pdf_bytes_with_options(text, &RenderOptions::default())
}

/// Render markdown to PDF bytes with custom options.
pub fn markdown_to_pdf_bytes_with_options(text: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    let (bytes, _) = convert::render_markdown(text, options, &StyleRegistry::new())?;
    Ok(bytes)
}

/// Render markdown to a PDF file with the built-in renderer.
///
/// The file is written only after the whole document rendered.
///
/// # Example
///
/// ```no_run
/// let report = docbind::markdown_to_pdf("# Notes\n", "notes.pdf").unwrap();
/// println!("{} pages", report.pages);
/// ```
pub fn markdown_to_pdf<P: AsRef<Path>>(text: &str, path: P) -> Result<SubmitReport> {
    let (bytes, report) =
        convert::render_markdown(text, &RenderOptions::default(), &StyleRegistry::new())?;
    fs::write(path, bytes)?;
    Ok(report)
}

/// The combined markdown file written by [`Docbind::write_markdown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownOutput {
    /// Path of the markdown file
    pub path: PathBuf,
    /// Number of pages aggregated
    pub file_count: usize,
}

/// What [`Docbind::build`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Path of the combined markdown file
    pub markdown_path: PathBuf,
    /// Path of the PDF file
    pub pdf_path: PathBuf,
    /// Number of pages aggregated
    pub file_count: usize,
    /// Name of the strategy that rendered the PDF
    pub strategy: String,
}

/// Builder for the aggregate-then-render pipeline.
///
/// # Example
///
/// ```no_run
/// use docbind::Docbind;
///
/// let report = Docbind::new("docs/content")
///     .with_site_url("https://example.org")
///     .with_heading_shift(1)
///     .without_external()
///     .build()?;
/// # Ok::<(), docbind::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Docbind {
    aggregate: AggregateOptions,
    render: RenderOptions,
    output_dir: PathBuf,
    name: String,
    external: bool,
    pandoc_program: String,
}

impl Docbind {
    /// Create a builder for a documentation source directory.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            aggregate: AggregateOptions::new(source_dir),
            render: RenderOptions::default(),
            output_dir: PathBuf::from("data"),
            name: "docs-all".to_string(),
            external: true,
            pandoc_program: "pandoc".to_string(),
        }
    }

    /// Set the directory receiving the markdown and PDF files.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Set the output file stem.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the site URL used for root-relative links.
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.aggregate = self.aggregate.with_site_url(url);
        self
    }

    /// Set the text placed before the first page.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.aggregate = self.aggregate.with_header(header);
        self
    }

    /// Title the collection: a level-one header and the PDF title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        let header = aggregate::title_header(&title, &self.aggregate.site_url);
        self.aggregate = self.aggregate.with_header(header);
        self.render = self.render.with_title(title);
        self
    }

    /// Set the number of levels added to every heading.
    pub fn with_heading_shift(mut self, shift: usize) -> Self {
        self.aggregate = self.aggregate.with_heading_shift(shift);
        self
    }

    /// Set the root provenance paths are relative to.
    pub fn with_provenance_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.aggregate = self.aggregate.with_provenance_root(root);
        self
    }

    /// Skip pandoc and render with the built-in renderer only.
    pub fn without_external(mut self) -> Self {
        self.external = false;
        self
    }

    /// Use a different pandoc executable.
    pub fn with_pandoc_program(mut self, program: impl Into<String>) -> Self {
        self.pandoc_program = program.into();
        self
    }

    /// Set options for the built-in renderer.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render = options;
        self
    }

    /// Path of the combined markdown file.
    pub fn markdown_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.md", self.name))
    }

    /// Path of the PDF file.
    pub fn pdf_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.pdf", self.name))
    }

    /// The strategy chain `build` will run.
    pub fn chain(&self) -> RenderChain {
        if self.external {
            RenderChain::with_pandoc(&self.pandoc_program)
        } else {
            RenderChain::fallback_only()
        }
    }

    /// Aggregate the source tree and write the combined markdown file.
    pub fn write_markdown(&self) -> Result<MarkdownOutput> {
        let combined = aggregate::aggregate(&self.aggregate)?;

        fs::create_dir_all(&self.output_dir)?;
        let path = self.markdown_path();
        fs::write(&path, &combined.text)?;
        log::info!("Wrote {} ({} files)", path.display(), combined.file_count);

        Ok(MarkdownOutput {
            path,
            file_count: combined.file_count,
        })
    }

    /// Write the combined markdown file, then render it to PDF.
    pub fn build(&self) -> Result<BuildReport> {
        let markdown = self.write_markdown()?;
        let pdf_path = self.pdf_path();

        let job = RenderJob::new(&markdown.path, &pdf_path).with_options(self.render.clone());
        let outcome = self.chain().run(&job)?;

        Ok(BuildReport {
            markdown_path: markdown.path,
            pdf_path,
            file_count: markdown.file_count,
            strategy: outcome.strategy,
        })
    }
}
