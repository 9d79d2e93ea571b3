//! Depth-first context walk.
//!
//! Every node is offered to the matcher. A hit contributes its own line plus the line of
//! every ancestor on the path from the root, so the caller sees the statements and
//! definitions that enclose the match.

use crate::node::SyntaxNode;
use crate::result_set::ResultSet;

/// Nesting level below which the walk stops descending.
pub const DEFAULT_MAX_TREE_DEPTH: usize = 2048;

/// Root-to-current path of line numbers.
///
/// Lines are pushed on the way down and the history is truncated back to a saved mark on
/// the way up, so sibling subtrees never see each other's contributions.
#[derive(Debug, Default, Clone)]
pub struct AncestorHistory {
    lines: Vec<usize>,
}

impl AncestorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position to restore with [`AncestorHistory::restore`].
    pub fn mark(&self) -> usize {
        self.lines.len()
    }

    /// Push a line; nodes without one leave the history unchanged.
    pub fn push(&mut self, line: Option<usize>) {
        if let Some(line) = line {
            self.lines.push(line);
        }
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = usize>) {
        self.lines.extend(lines);
    }

    pub fn restore(&mut self, mark: usize) {
        self.lines.truncate(mark);
    }

    pub fn lines(&self) -> &[usize] {
        &self.lines
    }
}

/// Mutable state for a single walk.
struct WalkState {
    history: AncestorHistory,
    results: ResultSet,
    truncated: bool,
}

/// Applies a matcher to every node of a tree and collects matches with their context.
#[derive(Debug, Clone)]
pub struct ContextWalker {
    branch_context: bool,
    max_depth: usize,
}

impl Default for ContextWalker {
    fn default() -> Self {
        Self {
            branch_context: false,
            max_depth: DEFAULT_MAX_TREE_DEPTH,
        }
    }
}

impl ContextWalker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Also report the earlier branches (`elif`, `else`, ...) of a conditional when a match
    /// sits inside a later branch.
    #[must_use]
    pub fn with_branch_context(mut self, enabled: bool) -> Self {
        self.branch_context = enabled;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Walk `root` and return the matched lines together with their ancestor lines.
    pub fn walk<N, F>(&self, root: N, matcher: F) -> ResultSet
    where
        N: SyntaxNode,
        F: Fn(&N) -> Option<usize>,
    {
        let mut state = WalkState {
            history: AncestorHistory::new(),
            results: ResultSet::new(),
            truncated: false,
        };

        self.visit(&root, &matcher, 0, &mut state);

        if state.truncated {
            log::warn!(
                "syntax tree nested deeper than {} levels; deeper nodes were not searched",
                self.max_depth
            );
        }
        log::trace!("walk finished with {} lines", state.results.len());
        state.results
    }

    fn visit<N, F>(&self, node: &N, matcher: &F, depth: usize, state: &mut WalkState)
    where
        N: SyntaxNode,
        F: Fn(&N) -> Option<usize>,
    {
        if let Some(line) = matcher(node) {
            state.results.insert(line);
            state.results.extend(state.history.lines().iter().copied());
        }

        let children = node.children();
        if children.is_empty() {
            return;
        }
        if depth >= self.max_depth {
            state.truncated = true;
            return;
        }

        let mark = state.history.mark();
        state.history.push(node.line());

        let mut earlier_branches: Vec<usize> = Vec::new();
        for child in &children {
            let is_branch = self.branch_context && child.is_branch();
            if is_branch {
                let branch_mark = state.history.mark();
                state.history.extend(earlier_branches.iter().copied());
                self.visit(child, matcher, depth + 1, state);
                state.history.restore(branch_mark);

                if let Some(line) = child.line() {
                    earlier_branches.push(line);
                }
            } else {
                self.visit(child, matcher, depth + 1, state);
            }
        }

        state.history.restore(mark);
    }
}
