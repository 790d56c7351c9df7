//! Parse configuration.

/// Default nesting limit for recursive rules.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Knobs for one parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    /// Source name. `None` parses in string mode and reports as `<string>`.
    pub filename: Option<String>,
    /// Escalate invalid escape sequence warnings to syntax errors.
    pub strict_escapes: bool,
    /// Maximum rule nesting before "too many nested expressions".
    pub max_depth: usize,
}

impl ParseOptions {
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    #[must_use]
    pub fn with_strict_escapes(mut self, strict: bool) -> Self {
        self.strict_escapes = strict;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            filename: None,
            strict_escapes: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
