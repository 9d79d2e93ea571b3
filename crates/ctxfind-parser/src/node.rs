use ctxfind_core::SyntaxNode;

use crate::grammar::Grammar;

/// A tree-sitter node viewed through the [`SyntaxNode`] capability set.
///
/// The root and the structural kinds of the grammar have no line. Every other node sits on
/// the 1-based row where it starts. Leaf tokens expose their source text as their only
/// textual attribute.
#[derive(Clone, Copy)]
pub struct TsNode<'tree> {
    node: tree_sitter::Node<'tree>,
    source: &'tree [u8],
    grammar: &'static Grammar,
    is_root: bool,
}

impl<'tree> TsNode<'tree> {
    pub(crate) fn root(
        node: tree_sitter::Node<'tree>,
        source: &'tree [u8],
        grammar: &'static Grammar,
    ) -> Self {
        Self {
            node,
            source,
            grammar,
            is_root: true,
        }
    }

    fn child(&self, node: tree_sitter::Node<'tree>) -> Self {
        Self {
            node,
            source: self.source,
            grammar: self.grammar,
            is_root: false,
        }
    }

    pub fn text(&self) -> Option<&'tree str> {
        self.node.utf8_text(self.source).ok()
    }
}

impl std::fmt::Debug for TsNode<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TsNode")
            .field("kind", &self.node.kind())
            .field("line", &self.line())
            .field("is_root", &self.is_root)
            .finish()
    }
}

impl SyntaxNode for TsNode<'_> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn line(&self) -> Option<usize> {
        if self.is_root || self.grammar.is_structural(self.node.kind()) {
            None
        } else {
            Some(self.node.start_position().row + 1)
        }
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.node.walk();
        self.node
            .children(&mut cursor)
            .map(|child| self.child(child))
            .collect()
    }

    fn text_attributes(&self) -> Vec<&str> {
        if self.node.child_count() > 0 {
            return Vec::new();
        }
        self.text().into_iter().collect()
    }

    fn is_definition(&self) -> bool {
        self.grammar.is_definition(self.node.kind())
    }

    fn is_branch(&self) -> bool {
        self.grammar.is_branch(self.node.kind())
    }
}
