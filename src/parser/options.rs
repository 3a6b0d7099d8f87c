//! Parsing options and configuration.

use pulldown_cmark::Options;

/// Options for parsing Markdown documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Recognise pipe tables
    pub tables: bool,

    /// Recognise `~~strikethrough~~`
    pub strikethrough: bool,

    /// Recognise footnote references and definitions
    pub footnotes: bool,

    /// Replace straight quotes, `--` and `...` with typographic characters
    pub smart_punctuation: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable table parsing.
    pub fn with_tables(mut self, enabled: bool) -> Self {
        self.tables = enabled;
        self
    }

    /// Enable or disable strikethrough parsing.
    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.strikethrough = enabled;
        self
    }

    /// Enable or disable footnotes.
    pub fn with_footnotes(mut self, enabled: bool) -> Self {
        self.footnotes = enabled;
        self
    }

    /// Enable typographic punctuation.
    pub fn smart(mut self) -> Self {
        self.smart_punctuation = true;
        self
    }

    /// Translate to pulldown-cmark extension flags.
    pub(crate) fn to_pulldown(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        options
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: false,
            smart_punctuation: false,
        }
    }
}
