//! Flow renderer: drives the walk and hands the result to a page-flow engine.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Document;

use super::{BlockWalker, Flow, FlowStats, PageGeometry, StyleRegistry};

/// A layout engine that paginates a flow into its output medium.
pub trait PageFlowEngine {
    /// Lay out and emit the whole flow in one pass.
    fn submit(&mut self, flow: &Flow, geometry: &PageGeometry) -> Result<SubmitReport>;
}

/// What an engine reports after a successful submission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SubmitReport {
    /// Number of pages produced
    pub pages: usize,
    /// Number of flow instructions laid out
    pub instructions: usize,
    /// Bytes written to the output
    pub bytes: usize,
}

/// Lifecycle of a [`FlowRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    /// Created, nothing walked yet
    Initialized,
    /// Tree consumed, flow accumulated
    Walking,
    /// Flow handed to the engine
    Submitted,
}

impl RenderState {
    fn name(self) -> &'static str {
        match self {
            RenderState::Initialized => "initialized",
            RenderState::Walking => "walking",
            RenderState::Submitted => "submitted",
        }
    }
}

/// Single-use renderer: `walk` once, then `submit` once.
pub struct FlowRenderer<'a> {
    styles: &'a StyleRegistry,
    state: RenderState,
    flow: Option<Flow>,
}

impl<'a> FlowRenderer<'a> {
    /// Create a renderer bound to a style registry.
    pub fn new(styles: &'a StyleRegistry) -> Self {
        Self {
            styles,
            state: RenderState::Initialized,
            flow: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> RenderState {
        self.state
    }

    /// The accumulated flow, once a walk has completed.
    pub fn flow(&self) -> Option<&Flow> {
        self.flow.as_ref()
    }

    /// Walk the document into a flow.
    ///
    /// A failed walk leaves no flow behind, so a later `submit` fails too.
    pub fn walk(&mut self, doc: &Document) -> Result<&Flow> {
        self.expect_state(RenderState::Initialized)?;
        self.state = RenderState::Walking;

        let flow = BlockWalker::new(self.styles).walk(doc)?;
        log::debug!("Walked {} blocks into {} instructions", doc.block_count(), flow.len());
        Ok(self.flow.insert(flow))
    }

    /// Submit the walked flow to an engine.
    pub fn submit<E>(&mut self, engine: &mut E, geometry: &PageGeometry) -> Result<SubmitReport>
    where
        E: PageFlowEngine + ?Sized,
    {
        self.expect_state(RenderState::Walking)?;
        let flow = self
            .flow
            .take()
            .ok_or_else(|| Error::Render("no flow to submit: the walk did not complete".into()))?;

        self.state = RenderState::Submitted;
        let report = engine.submit(&flow, geometry)?;
        self.flow = Some(flow);
        Ok(report)
    }

    /// Statistics over the walked flow.
    pub fn stats(&self) -> FlowStats {
        self.flow.as_ref().map(FlowStats::from_flow).unwrap_or_default()
    }

    fn expect_state(&self, expected: RenderState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(Error::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }
}

/// Walk a document and submit it to an engine in one call.
pub fn render_document<E>(
    doc: &Document,
    styles: &StyleRegistry,
    engine: &mut E,
    geometry: &PageGeometry,
) -> Result<SubmitReport>
where
    E: PageFlowEngine + ?Sized,
{
    let mut renderer = FlowRenderer::new(styles);
    renderer.walk(doc)?;
    renderer.submit(engine, geometry)
}
