//! Core types for the ctxfind source-code context finder.
//!
//! This crate provides:
//! - The syntax node abstraction (`SyntaxNode`) and an in-memory tree (`OwnedNode`)
//! - Search targets and the matchers built from them
//! - The ancestor-tracking context walk and the top-level definition finder
//! - Programming language definitions

mod definitions;
mod error;
mod language;
mod node;
mod result_set;
mod target;
mod walker;

pub use definitions::{DefinitionFinder, DEFAULT_DEFINITION_DEPTH};
pub use error::SearchError;
pub use language::Language;
pub use node::{OwnedNode, SyntaxNode, GENERIC_BRANCH_KINDS, GENERIC_DEFINITION_KINDS};
pub use result_set::ResultSet;
pub use target::{Matcher, SearchTarget, SearchType};
pub use walker::{AncestorHistory, ContextWalker, DEFAULT_MAX_TREE_DEPTH};

/// Run a search over one tree.
///
/// Definition searches use the depth-bounded [`DefinitionFinder`]; every other target is
/// matched node by node through `walker`.
pub fn find_context<N: SyntaxNode>(
    root: N,
    target: &SearchTarget,
    walker: &ContextWalker,
) -> ResultSet {
    match target.matcher() {
        Some(matcher) => walker.walk(root, |node: &N| matcher.matches(node)),
        None => {
            let depth = target.definition_depth().unwrap_or(DEFAULT_DEFINITION_DEPTH);
            DefinitionFinder::new(depth)
                .with_max_tree_depth(walker.max_depth())
                .find(root)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> OwnedNode {
        OwnedNode::structural("module").with_children([
            OwnedNode::at("class", 1).with_child(
                OwnedNode::at("method", 2)
                    .with_child(OwnedNode::at("identifier", 3).with_attribute("target")),
            ),
            OwnedNode::at("function", 5)
                .with_child(OwnedNode::at("identifier", 6).with_attribute("other")),
        ])
    }

    #[test]
    fn test_find_context_dispatches_on_target() {
        let tree = tree();
        let walker = ContextWalker::new();

        let literal = SearchTarget::Literal("target".to_string());
        assert_eq!(find_context(&tree, &literal, &walker).to_vec(), vec![1, 2, 3]);

        let defs = SearchTarget::Definitions { max_depth: 1 };
        assert_eq!(find_context(&tree, &defs, &walker).to_vec(), vec![1, 5]);
    }

    #[test]
    fn test_find_context_applies_tree_depth_to_definitions() {
        let tree = tree();
        let defs = SearchTarget::Definitions { max_depth: 5 };

        let walker = ContextWalker::new();
        assert_eq!(find_context(&tree, &defs, &walker).to_vec(), vec![1, 2, 5]);

        let shallow = ContextWalker::new().with_max_depth(1);
        assert_eq!(find_context(&tree, &defs, &shallow).to_vec(), vec![1, 5]);
    }
}
