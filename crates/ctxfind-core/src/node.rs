//! The syntax node abstraction the search engine walks.

/// Kind names treated as class, module, function or method definitions when a node type
/// does not supply its own table.
pub const GENERIC_DEFINITION_KINDS: &[&str] = &[
    "class",
    "module",
    "function",
    "method",
    "class_definition",
    "module_definition",
    "function_definition",
    "method_definition",
];

/// Kind names treated as alternative branches of a conditional.
pub const GENERIC_BRANCH_KINDS: &[&str] = &["elif", "else", "elif_clause", "else_clause"];

/// A node of a parsed syntax tree.
///
/// Implementations are cheap handles (references or `Copy` wrappers) into a tree owned by
/// somebody else. The walker never mutates a node.
pub trait SyntaxNode: Sized {
    /// The syntactic category, e.g. `call` or `class_definition`.
    fn kind(&self) -> &str;

    /// 1-based source line, or `None` for structural nodes.
    fn line(&self) -> Option<usize>;

    /// Ordered child nodes; empty for leaves.
    fn children(&self) -> Vec<Self>;

    /// String-valued attributes compared by literal and regex matchers.
    ///
    /// Attributes that cannot be read as text are left out rather than reported as errors.
    fn text_attributes(&self) -> Vec<&str>;

    fn is_definition(&self) -> bool {
        GENERIC_DEFINITION_KINDS.contains(&self.kind())
    }

    fn is_branch(&self) -> bool {
        GENERIC_BRANCH_KINDS.contains(&self.kind())
    }
}

/// An in-memory syntax tree.
///
/// Useful for callers that already hold a tree in some other shape and for tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedNode {
    pub kind: String,
    pub line: Option<usize>,
    pub attributes: Vec<String>,
    pub children: Vec<OwnedNode>,
}

impl OwnedNode {
    pub fn new(kind: impl Into<String>, line: Option<usize>) -> Self {
        Self {
            kind: kind.into(),
            line,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A node that sits on `line`.
    pub fn at(kind: impl Into<String>, line: usize) -> Self {
        Self::new(kind, Some(line))
    }

    /// A node with no line of its own, such as a module root or a block.
    pub fn structural(kind: impl Into<String>) -> Self {
        Self::new(kind, None)
    }

    #[must_use]
    pub fn with_attribute(mut self, value: impl Into<String>) -> Self {
        self.attributes.push(value.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: OwnedNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = OwnedNode>) -> Self {
        self.children.extend(children);
        self
    }
}

impl<'a> SyntaxNode for &'a OwnedNode {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn line(&self) -> Option<usize> {
        self.line
    }

    fn children(&self) -> Vec<Self> {
        let node: &'a OwnedNode = self;
        node.children.iter().collect()
    }

    fn text_attributes(&self) -> Vec<&str> {
        self.attributes.iter().map(String::as_str).collect()
    }
}
