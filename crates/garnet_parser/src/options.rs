//! Parser configuration.

/// Options for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Name reported in diagnostics.
    pub file_name: String,
    /// Deepest expression nesting accepted before the parse fails.
    pub max_depth: usize,
}

impl ParseOptions {
    pub const DEFAULT_FILE_NAME: &'static str = "<input>";
    pub const DEFAULT_MAX_DEPTH: usize = 256;

    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            file_name: Self::DEFAULT_FILE_NAME.to_string(),
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
