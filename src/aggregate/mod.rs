//! Aggregation of a documentation tree into one markdown file.
//!
//! Pages are collected recursively, ordered by their front-matter weights,
//! cleaned of site-generator shortcodes and concatenated with a provenance
//! comment in front of each one.

mod collect;
mod frontmatter;
mod rewrite;

pub use collect::{collect_sources, SourceFile, DEFAULT_WEIGHT, INDEX_PAGE};
pub use frontmatter::{split_front_matter, FrontMatter};
pub use rewrite::Rewriter;

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default base URL for root-relative links and image sources.
pub const DEFAULT_SITE_URL: &str = "https://esphome.io";

/// Options for aggregation.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// Directory holding the markdown pages
    pub source_dir: PathBuf,

    /// Root that provenance paths are relative to (default: parent of the
    /// source directory)
    pub provenance_root: Option<PathBuf>,

    /// Base URL for root-relative links
    pub site_url: String,

    /// Levels added to every ATX heading
    pub heading_shift: usize,

    /// Text placed before the first page
    pub header: Option<String>,
}

impl AggregateOptions {
    /// Create options for a source directory.
    pub fn new(source_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            provenance_root: None,
            site_url: DEFAULT_SITE_URL.to_string(),
            heading_shift: 1,
            header: None,
        }
    }

    /// Set the provenance root.
    pub fn with_provenance_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.provenance_root = Some(root.into());
        self
    }

    /// Set the site URL.
    pub fn with_site_url(mut self, url: impl Into<String>) -> Self {
        self.site_url = url.into();
        self
    }

    /// Set the heading shift.
    pub fn with_heading_shift(mut self, shift: usize) -> Self {
        self.heading_shift = shift;
        self
    }

    /// Set the header text.
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// The effective provenance root.
    pub fn provenance_root(&self) -> PathBuf {
        match &self.provenance_root {
            Some(root) => root.clone(),
            None => self
                .source_dir
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| self.source_dir.clone()),
        }
    }
}

/// The combined markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    /// Concatenated markdown
    pub text: String,
    /// Number of pages included
    pub file_count: usize,
}

/// A header naming the collection and its origin.
pub fn title_header(title: &str, site_url: &str) -> String {
    format!("# {}\n\n> **Source**: {}/\n", title, site_url.trim_end_matches('/'))
}

/// One page as it appears in the combined document.
fn page_section(relative: &str, body: &str) -> String {
    format!("\n\n---\n\n<!-- SOURCE: {} -->\n\n{}\n", relative, body.trim())
}

/// Aggregate a documentation tree.
pub fn aggregate(options: &AggregateOptions) -> Result<Aggregate> {
    if !options.source_dir.is_dir() {
        return Err(Error::MissingSource(options.source_dir.clone()));
    }

    let rewriter = Rewriter::new(&options.site_url, options.heading_shift)?;
    let sources = collect_sources(&options.source_dir, &options.provenance_root())?;

    let mut parts = Vec::with_capacity(sources.len() + 1);
    if let Some(header) = &options.header {
        parts.push(header.clone());
    }
    for source in &sources {
        parts.push(page_section(&source.relative, &rewriter.rewrite(&source.body)));
    }

    log::info!(
        "Aggregated {} files from {}",
        sources.len(),
        options.source_dir.display()
    );

    Ok(Aggregate {
        text: parts.join("\n"),
        file_count: sources.len(),
    })
}
