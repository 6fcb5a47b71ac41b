//! CompileResult entity - serialized output of one compile

/// Stylesheet text and, when requested separately, its source map
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CompileResult {
    pub css: String,
    /// Present only when the map is written as its own file
    pub map: Option<String>,
}

impl CompileResult {
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            map: None,
        }
    }

    pub fn with_map(mut self, map: impl Into<String>) -> Self {
        self.map = Some(map.into());
        self
    }
}
