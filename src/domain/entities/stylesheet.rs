//! Stylesheet entity - an ordered tree of top-level style nodes
//!
//! Nodes keep their raw text, so serializing a parsed tree with no changes
//! reproduces the source exactly. Merging appends clones of another tree's
//! nodes after this tree's own nodes.

use std::path::PathBuf;

/// Where a node came from (1-based line and column)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePosition {
    /// Origin file, when the engine was told which file it parsed
    pub file: Option<PathBuf>,
    pub line: usize,
    pub column: usize,
}

/// Top-level node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// `selector { ... }`
    Rule,
    /// `@media ... { ... }` or `@import ...;`
    AtRule,
    /// `/* ... */`
    Comment,
}

/// One top-level node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    /// Whitespace preceding the node
    pub before: String,
    /// The node's own text, from its first character to its terminator
    pub text: String,
    pub source: SourcePosition,
}

impl Node {
    /// Raw text including leading whitespace
    pub fn raw(&self) -> String {
        format!("{}{}", self.before, self.text)
    }
}

/// Ordered rule tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    nodes: Vec<Node>,
    /// Whitespace after the last node
    after: String,
}

impl Stylesheet {
    pub fn new(nodes: Vec<Node>, after: impl Into<String>) -> Self {
        Self {
            nodes,
            after: after.into(),
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn after(&self) -> &str {
        &self.after
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Append a node after the existing ones.
    pub fn append(&mut self, node: Node) {
        self.nodes.push(node);
    }

    /// Serialize back to text.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for node in &self.nodes {
            css.push_str(&node.before);
            css.push_str(&node.text);
        }
        css.push_str(&self.after);
        css
    }
}
