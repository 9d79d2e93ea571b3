//! Source parser using tree-sitter.

use std::path::Path;

use ctxfind_core::Language;
use tree_sitter::{Parser, Tree};

use crate::grammar::Grammar;
use crate::node::TsNode;

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("could not detect a language for {0} (use --language)")]
    UnknownLanguage(String),

    #[error("failed to load the {language} grammar: {message}")]
    Grammar { language: Language, message: String },

    #[error("tree-sitter returned no tree for this {0} source")]
    NoTree(Language),
}

/// A parsed file: the tree-sitter tree plus the text it was built from.
pub struct ParsedSource {
    tree: Tree,
    source: String,
    grammar: &'static Grammar,
}

impl ParsedSource {
    /// Root node, ready for a walk.
    pub fn root(&self) -> TsNode<'_> {
        TsNode::root(self.tree.root_node(), self.source.as_bytes(), self.grammar)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn language(&self) -> Language {
        self.grammar.language
    }

    /// True when tree-sitter had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

/// Tree-sitter based source parser.
///
/// One parser is reused across files; the grammar is switched per file.
pub struct SourceParser {
    parser: Parser,
    current: Option<Language>,
}

impl SourceParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
            current: None,
        }
    }

    /// Get the language for a file based on its extension.
    #[must_use]
    pub fn detect_language(path: &Path) -> Option<Language> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Language::from_extension)
    }

    /// Parse a file's contents, detecting the language from its path unless `language` is given.
    pub fn parse_path(
        &mut self,
        path: &Path,
        source: String,
        language: Option<Language>,
    ) -> Result<ParsedSource, ParseError> {
        let language = language
            .or_else(|| Self::detect_language(path))
            .ok_or_else(|| ParseError::UnknownLanguage(path.display().to_string()))?;
        self.parse(source, language)
    }

    pub fn parse(&mut self, source: String, language: Language) -> Result<ParsedSource, ParseError> {
        let grammar = Grammar::for_language(language);

        if self.current != Some(language) {
            self.parser
                .set_language(&grammar.ts_language())
                .map_err(|e| ParseError::Grammar {
                    language,
                    message: e.to_string(),
                })?;
            self.current = Some(language);
        }

        let tree = self
            .parser
            .parse(&source, None)
            .ok_or(ParseError::NoTree(language))?;

        if tree.root_node().has_error() {
            log::debug!("{language} source parsed with syntax errors; searching the recovered tree");
        }

        Ok(ParsedSource {
            tree,
            source,
            grammar,
        })
    }
}

impl Default for SourceParser {
    fn default() -> Self {
        Self::new()
    }
}
