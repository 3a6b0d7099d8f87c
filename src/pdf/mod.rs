//! In-process page-flow engine producing PDF through `lopdf`.

pub mod encoding;
pub mod layout;
pub mod markup;
pub mod metrics;
pub mod writer;

use std::io::Write;

use crate::error::Result;
use crate::render::{Flow, PageFlowEngine, PageGeometry, StyleRegistry, SubmitReport};

pub use layout::{layout_flow, DrawOp, Fragment, PageLayout, LIST_INDENT};
pub use metrics::StandardFont;
pub use writer::{write_pdf, DocumentInfo, PdfWriter};

/// Page-flow engine that writes a PDF file into `W`.
pub struct PdfEngine<'a, W: Write> {
    styles: &'a StyleRegistry,
    writer: W,
    info: DocumentInfo,
}

impl<'a, W: Write> PdfEngine<'a, W> {
    /// Create an engine writing into `writer`.
    pub fn new(styles: &'a StyleRegistry, writer: W) -> Self {
        Self {
            styles,
            writer,
            info: DocumentInfo::default(),
        }
    }

    /// Set the document title.
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.info.title = title;
        self
    }

    /// Consume the engine and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> PageFlowEngine for PdfEngine<'_, W> {
    fn submit(&mut self, flow: &Flow, geometry: &PageGeometry) -> Result<SubmitReport> {
        let pages = layout_flow(flow, self.styles, geometry);
        let bytes = write_pdf(&pages, geometry, &self.info)?;

        self.writer.write_all(&bytes)?;
        self.writer.flush()?;

        log::debug!(
            "Laid out {} instructions on {} pages ({} bytes)",
            flow.len(),
            pages.len(),
            bytes.len()
        );

        Ok(SubmitReport {
            pages: pages.len(),
            instructions: flow.len(),
            bytes: bytes.len(),
        })
    }
}
