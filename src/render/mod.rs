//! Rendering: inline composition, block walking and page-flow submission.

mod flow;
mod inline;
mod json;
mod options;
mod renderer;
mod result;
mod styles;
mod walker;

pub use flow::{Flow, FlowItem};
pub use inline::{
    compose_inline, BOLD_CLOSE, BOLD_OPEN, BREAK, ITALIC_CLOSE, ITALIC_OPEN, MONO_CLOSE, MONO_OPEN,
};
pub use json::{to_json, JsonFormat};
pub use options::{cm, Margins, PageGeometry, PageSize, RenderOptions, POINTS_PER_CM};
pub use renderer::{render_document, FlowRenderer, PageFlowEngine, RenderState, SubmitReport};
pub use result::FlowStats;
pub use styles::{FontFamily, ParagraphStyle, StyleName, StyleRegistry};
pub use walker::{BlockWalker, RULE_SPACING, RULE_THICKNESS, TABLE_SEPARATOR};
