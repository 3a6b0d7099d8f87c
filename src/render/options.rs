//! Rendering options and page geometry.

use crate::parser::ParseOptions;
use serde::{Deserialize, Serialize};

/// Points per centimetre.
pub const POINTS_PER_CM: f32 = 72.0 / 2.54;

/// Convert centimetres to points.
pub fn cm(value: f32) -> f32 {
    value * POINTS_PER_CM
}

/// Page size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// ISO A4 (210 x 297 mm)
    #[default]
    A4,
    /// US Letter (8.5 x 11 in)
    Letter,
    /// US Legal (8.5 x 14 in)
    Legal,
    /// Custom size in points
    Custom {
        /// Width in points
        width: f32,
        /// Height in points
        height: f32,
    },
}

impl PageSize {
    /// Width and height in points.
    pub fn dimensions_pt(&self) -> (f32, f32) {
        match *self {
            PageSize::A4 => (cm(21.0), cm(29.7)),
            PageSize::Letter => (612.0, 792.0),
            PageSize::Legal => (612.0, 1008.0),
            PageSize::Custom { width, height } => (width, height),
        }
    }
}

/// Page margins in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    /// Top margin
    pub top: f32,
    /// Right margin
    pub right: f32,
    /// Bottom margin
    pub bottom: f32,
    /// Left margin
    pub left: f32,
}

impl Margins {
    /// The same margin on all four sides.
    pub fn uniform(value: f32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::uniform(cm(2.0))
    }
}

/// Page size plus margins.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PageGeometry {
    /// Page size
    pub size: PageSize,
    /// Page margins
    pub margins: Margins,
}

impl PageGeometry {
    /// Create a geometry from size and margins.
    pub fn new(size: PageSize, margins: Margins) -> Self {
        Self { size, margins }
    }

    /// Page width in points.
    pub fn width(&self) -> f32 {
        self.size.dimensions_pt().0
    }

    /// Page height in points.
    pub fn height(&self) -> f32 {
        self.size.dimensions_pt().1
    }

    /// Width of the frame between the left and right margins.
    pub fn frame_width(&self) -> f32 {
        (self.width() - self.margins.left - self.margins.right).max(0.0)
    }

    /// Height of the frame between the top and bottom margins.
    pub fn frame_height(&self) -> f32 {
        (self.height() - self.margins.top - self.margins.bottom).max(0.0)
    }
}

/// Options for the in-process renderer.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Markdown parsing options
    pub parse: ParseOptions,

    /// Page geometry
    pub geometry: PageGeometry,

    /// Document title written to the PDF info dictionary
    pub title: Option<String>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set parsing options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }

    /// Set the page size.
    pub fn with_page_size(mut self, size: PageSize) -> Self {
        self.geometry.size = size;
        self
    }

    /// Set the page margins.
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.geometry.margins = margins;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
