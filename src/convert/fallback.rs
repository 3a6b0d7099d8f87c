//! In-process strategy: parse, walk and lay out without external tools.

use std::fs;

use crate::error::Result;
use crate::parser::parse_markdown;
use crate::pdf::PdfEngine;
use crate::render::{render_document, RenderOptions, StyleRegistry, SubmitReport};

use super::{Attempt, RenderJob, RenderStrategy};

/// Name of the in-process strategy.
pub const FALLBACK_NAME: &str = "built-in";

/// Render markdown text to PDF bytes in memory.
pub fn render_markdown(
    text: &str,
    options: &RenderOptions,
    styles: &StyleRegistry,
) -> Result<(Vec<u8>, SubmitReport)> {
    let doc = parse_markdown(text, &options.parse);
    let mut engine = PdfEngine::new(styles, Vec::new()).with_title(options.title.clone());
    let report = render_document(&doc, styles, &mut engine, &options.geometry)?;
    Ok((engine.into_inner(), report))
}

/// The last-resort strategy. Read or write errors are fatal.
#[derive(Debug, Clone, Default)]
pub struct FallbackStrategy {
    styles: StyleRegistry,
}

impl FallbackStrategy {
    /// Create a fallback strategy with the default styles.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderStrategy for FallbackStrategy {
    fn name(&self) -> &str {
        FALLBACK_NAME
    }

    fn render(&self, job: &RenderJob) -> Result<Attempt> {
        let text = fs::read_to_string(&job.input)?;
        let (bytes, report) = render_markdown(&text, &job.options, &self.styles)?;

        // Written only once the whole document rendered.
        fs::write(&job.output, &bytes)?;

        Ok(Attempt::Rendered {
            detail: format!("{} pages, {} bytes", report.pages, report.bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_render_markdown() {
        let (bytes, report) = render_markdown(
            "# Title\n\nBody text.\n",
            &RenderOptions::default(),
            &StyleRegistry::new(),
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert_eq!(report.instructions, 2);
        assert_eq!(report.pages, 1);
    }

    #[test]
    fn test_fallback_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.md");
        let output = dir.path().join("doc.pdf");
        fs::write(&input, "Hello\n").unwrap();

        let attempt = FallbackStrategy::new()
            .render(&RenderJob::new(&input, &output))
            .unwrap();
        assert!(matches!(attempt, Attempt::Rendered { .. }));
        assert!(fs::read(&output).unwrap().starts_with(b"%PDF"));
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let job = RenderJob::new(dir.path().join("missing.md"), dir.path().join("out.pdf"));
        assert!(matches!(FallbackStrategy::new().render(&job), Err(Error::Io(_))));
        assert!(!job.output.exists());
    }
}
