//! Tree-sitter based parsing for ctxfind.
//!
//! This crate provides:
//! - Per-language grammar tables (structural, definition and branch node kinds)
//! - `TsNode`, the `SyntaxNode` implementation over tree-sitter nodes
//! - `SourceParser`, which turns source text into a `ParsedSource`

mod grammar;
mod node;
mod parser;

pub use grammar::Grammar;
pub use node::TsNode;
pub use parser::{ParseError, ParsedSource, SourceParser};
