use crate::node::SyntaxNode;
use crate::result_set::ResultSet;
use crate::walker::DEFAULT_MAX_TREE_DEPTH;

/// Depth used when a definition search does not ask for one.
pub const DEFAULT_DEFINITION_DEPTH: usize = 1;

/// Collects the heading lines of class, module, function and method definitions that are
/// nested no deeper than `max_depth`.
///
/// Depth counts nodes that carry a line: the root is depth 0, a lined child of the root is
/// depth 1, and structural nodes (blocks, bodies) share their parent's depth. A method inside
/// a top-level class is therefore depth 2. No ancestor lines are added; the heading line is
/// the whole result for a definition.
#[derive(Debug, Clone)]
pub struct DefinitionFinder {
    max_depth: usize,
    max_tree_depth: usize,
}

impl Default for DefinitionFinder {
    fn default() -> Self {
        Self::new(DEFAULT_DEFINITION_DEPTH)
    }
}

impl DefinitionFinder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }

    /// Bound on raw tree nesting, counting structural nodes too.
    #[must_use]
    pub fn with_max_tree_depth(mut self, max_tree_depth: usize) -> Self {
        self.max_tree_depth = max_tree_depth;
        self
    }

    pub fn find<N: SyntaxNode>(&self, root: N) -> ResultSet {
        let mut results = ResultSet::new();
        let mut truncated = false;
        self.visit(&root, 0, 0, &mut results, &mut truncated);

        if truncated {
            log::warn!(
                "syntax tree nested deeper than {} levels; deeper definitions were not listed",
                self.max_tree_depth
            );
        }
        results
    }

    fn visit<N: SyntaxNode>(
        &self,
        node: &N,
        depth: usize,
        level: usize,
        results: &mut ResultSet,
        truncated: &mut bool,
    ) {
        if depth > self.max_depth {
            return;
        }
        if node.is_definition()
            && let Some(line) = node.line()
        {
            results.insert(line);
        }
        if level >= self.max_tree_depth {
            *truncated = true;
            return;
        }

        for child in node.children() {
            let child_depth = if child.line().is_some() { depth + 1 } else { depth };
            self.visit(&child, child_depth, level + 1, results, truncated);
        }
    }
}
