//! Rendering-strategy chain: try external converters first, fall back to the
//! in-process renderer.
//!
//! # Example
//!
//! ```no_run
//! use docbind::convert::{RenderChain, RenderJob};
//!
//! fn main() -> docbind::Result<()> {
//!     let chain = RenderChain::with_defaults();
//!     let outcome = chain.run(&RenderJob::new("docs.md", "docs.pdf"))?;
//!     println!("rendered by {}", outcome.strategy);
//!     Ok(())
//! }
//! ```

mod fallback;
mod pandoc;

pub use fallback::{render_markdown, FallbackStrategy, FALLBACK_NAME};
pub use pandoc::{find_program, PandocStrategy};

use crate::error::{Error, Result};
use crate::render::RenderOptions;
use std::path::PathBuf;
use std::sync::Arc;

/// One markdown-to-PDF conversion request.
#[derive(Debug, Clone)]
pub struct RenderJob {
    /// Markdown file to read
    pub input: PathBuf,

    /// PDF file to write
    pub output: PathBuf,

    /// Options for the in-process renderer
    pub options: RenderOptions,
}

impl RenderJob {
    /// Create a job with default render options.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            options: RenderOptions::default(),
        }
    }

    /// Set render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }
}

/// Result of one strategy attempt.
///
/// Skips and failures are expected outcomes, not errors: the chain moves on
/// to the next strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The PDF was written
    Rendered {
        /// Human-readable summary
        detail: String,
    },

    /// The strategy could not run (e.g. tool not installed)
    Skipped(String),

    /// The strategy ran and failed
    Failed(String),
}

/// A way of turning a markdown file into a PDF file.
pub trait RenderStrategy: Send + Sync {
    /// Get the name of this strategy.
    fn name(&self) -> &str;

    /// Attempt the conversion.
    ///
    /// `Err` is fatal and stops the chain.
    fn render(&self, job: &RenderJob) -> Result<Attempt>;
}

/// Which strategy produced the PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutcome {
    /// Strategy name
    pub strategy: String,

    /// Summary reported by the strategy
    pub detail: String,
}

/// Ordered list of strategies, each tried once.
#[derive(Clone, Default)]
pub struct RenderChain {
    strategies: Vec<Arc<dyn RenderStrategy>>,
}

impl RenderChain {
    /// Create a new empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pandoc, pandoc with wkhtmltopdf, then the in-process renderer.
    pub fn with_defaults() -> Self {
        Self::with_pandoc("pandoc")
    }

    /// Like [`RenderChain::with_defaults`] with a custom pandoc executable.
    pub fn with_pandoc(program: &str) -> Self {
        let mut chain = Self::new();
        chain.push(Arc::new(PandocStrategy::new().with_program(program)));
        chain.push(Arc::new(
            PandocStrategy::new()
                .with_program(program)
                .with_pdf_engine("wkhtmltopdf"),
        ));
        chain.push(Arc::new(FallbackStrategy::new()));
        chain
    }

    /// Only the in-process renderer.
    pub fn fallback_only() -> Self {
        let mut chain = Self::new();
        chain.push(Arc::new(FallbackStrategy::new()));
        chain
    }

    /// Append a strategy.
    pub fn push(&mut self, strategy: Arc<dyn RenderStrategy>) {
        self.strategies.push(strategy);
    }

    /// Names of the strategies, in order.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Number of strategies.
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Check if the chain has no strategies.
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    /// Try each strategy in order until one renders.
    pub fn run(&self, job: &RenderJob) -> Result<RenderOutcome> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            let name = strategy.name();
            log::debug!("Trying {} for {}", name, job.input.display());

            match strategy.render(job)? {
                Attempt::Rendered { detail } => {
                    log::info!("Wrote {} via {} ({})", job.output.display(), name, detail);
                    return Ok(RenderOutcome {
                        strategy: name.to_string(),
                        detail,
                    });
                }
                Attempt::Skipped(reason) => {
                    log::warn!("{} skipped: {}", name, reason);
                    failures.push(format!("{} skipped: {}", name, reason));
                }
                Attempt::Failed(reason) => {
                    log::warn!("{} failed: {}", name, reason);
                    failures.push(format!("{} failed: {}", name, reason));
                }
            }
        }

        Err(Error::AllStrategiesFailed(failures))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        name: &'static str,
        attempt: Attempt,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(name: &'static str, attempt: Attempt) -> Arc<Self> {
            Arc::new(Self {
                name,
                attempt,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl RenderStrategy for Fixed {
        fn name(&self) -> &str {
            self.name
        }

        fn render(&self, _job: &RenderJob) -> Result<Attempt> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.attempt.clone())
        }
    }

    struct Broken;

    impl RenderStrategy for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn render(&self, _job: &RenderJob) -> Result<Attempt> {
            Err(Error::Render("boom".into()))
        }
    }

    fn job() -> RenderJob {
        RenderJob::new("in.md", "out.pdf")
    }

    #[test]
    fn test_default_chain_order() {
        let chain = RenderChain::with_defaults();
        assert_eq!(
            chain.strategy_names(),
            vec!["pandoc", "pandoc (wkhtmltopdf)", FALLBACK_NAME]
        );
        assert_eq!(RenderChain::fallback_only().strategy_names(), vec![FALLBACK_NAME]);
    }

    #[test]
    fn test_first_success_wins() {
        let skipped = Fixed::new("a", Attempt::Skipped("missing".into()));
        let failed = Fixed::new("b", Attempt::Failed("exit 1".into()));
        let rendered = Fixed::new("c", Attempt::Rendered { detail: "ok".into() });
        let unused = Fixed::new("d", Attempt::Rendered { detail: "never".into() });

        let mut chain = RenderChain::new();
        chain.push(skipped.clone());
        chain.push(failed.clone());
        chain.push(rendered.clone());
        chain.push(unused.clone());

        let outcome = chain.run(&job()).unwrap();
        assert_eq!(outcome.strategy, "c");
        assert_eq!(outcome.detail, "ok");
        assert_eq!(skipped.calls.load(Ordering::SeqCst), 1);
        assert_eq!(failed.calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_all_failed() {
        let mut chain = RenderChain::new();
        chain.push(Fixed::new("a", Attempt::Skipped("missing".into())));
        chain.push(Fixed::new("b", Attempt::Failed("exit 2".into())));

        match chain.run(&job()) {
            Err(Error::AllStrategiesFailed(reasons)) => {
                assert_eq!(reasons, vec!["a skipped: missing", "b failed: exit 2"]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }

    #[test]
    fn test_error_stops_chain() {
        let after = Fixed::new("after", Attempt::Rendered { detail: "ok".into() });
        let mut chain = RenderChain::new();
        chain.push(Arc::new(Broken));
        chain.push(after.clone());

        assert!(matches!(chain.run(&job()), Err(Error::Render(_))));
        assert_eq!(after.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_empty_chain_fails() {
        let chain = RenderChain::new();
        assert!(chain.is_empty());
        assert!(matches!(
            chain.run(&job()),
            Err(Error::AllStrategiesFailed(reasons)) if reasons.is_empty()
        ));
    }
}
