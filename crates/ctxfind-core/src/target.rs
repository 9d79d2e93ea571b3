//! Search targets and the per-node matchers built from them.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SearchError;
use crate::node::SyntaxNode;

/// Which kind of search was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchType {
    #[default]
    Literal,
    LineNumber,
    Regex,
    Definitions,
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchType::Literal => "literal",
            SearchType::LineNumber => "line number",
            SearchType::Regex => "regex",
            SearchType::Definitions => "definitions",
        };
        f.write_str(name)
    }
}

impl FromStr for SearchType {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "literal" | "default" => Ok(SearchType::Literal),
            "line" | "line-number" | "lineno" => Ok(SearchType::LineNumber),
            "regex" | "regexp" => Ok(SearchType::Regex),
            "definitions" | "defs" => Ok(SearchType::Definitions),
            _ => Err(SearchError::UnknownSearchType(s.to_string())),
        }
    }
}

/// What to look for. Exactly one variant is active per invocation.
#[derive(Debug, Clone)]
pub enum SearchTarget {
    /// Exact, case-sensitive token equality.
    Literal(String),
    LineNumber(usize),
    Regex(Regex),
    /// Class/module/function/method headings at or above `max_depth`.
    Definitions { max_depth: usize },
}

impl SearchTarget {
    /// Build a target from user input, failing fast on malformed terms.
    pub fn parse(
        search_type: SearchType,
        look_for: Option<&str>,
        definition_depth: usize,
    ) -> Result<Self, SearchError> {
        let term = || {
            look_for
                .filter(|t| !t.is_empty())
                .ok_or(SearchError::MissingTerm(search_type))
        };

        match search_type {
            SearchType::Definitions => Ok(SearchTarget::Definitions {
                max_depth: definition_depth,
            }),
            SearchType::Literal => Ok(SearchTarget::Literal(term()?.to_string())),
            SearchType::LineNumber => {
                let term = term()?;
                term.trim()
                    .parse::<usize>()
                    .ok()
                    .filter(|line| *line >= 1)
                    .map(SearchTarget::LineNumber)
                    .ok_or_else(|| SearchError::InvalidLineNumber(term.to_string()))
            }
            SearchType::Regex => Self::regex(term()?),
        }
    }

    pub fn regex(pattern: &str) -> Result<Self, SearchError> {
        Regex::new(pattern)
            .map(SearchTarget::Regex)
            .map_err(|source| SearchError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })
    }

    pub fn search_type(&self) -> SearchType {
        match self {
            SearchTarget::Literal(_) => SearchType::Literal,
            SearchTarget::LineNumber(_) => SearchType::LineNumber,
            SearchTarget::Regex(_) => SearchType::Regex,
            SearchTarget::Definitions { .. } => SearchType::Definitions,
        }
    }

    /// The per-node matcher for this target; `None` for definition searches, which are a
    /// structural filter rather than a node predicate.
    pub fn matcher(&self) -> Option<Matcher<'_>> {
        match self {
            SearchTarget::Literal(text) => Some(Matcher::Literal(text)),
            SearchTarget::LineNumber(line) => Some(Matcher::LineNumber(*line)),
            SearchTarget::Regex(regex) => Some(Matcher::Regex(regex)),
            SearchTarget::Definitions { .. } => None,
        }
    }

    pub fn definition_depth(&self) -> Option<usize> {
        match self {
            SearchTarget::Definitions { max_depth } => Some(*max_depth),
            _ => None,
        }
    }
}

/// A stateless predicate over a node, closed over one search target.
#[derive(Debug, Clone, Copy)]
pub enum Matcher<'a> {
    Literal(&'a str),
    LineNumber(usize),
    Regex(&'a Regex),
}

impl Matcher<'_> {
    /// The node's own line when it matches.
    ///
    /// Nodes without a line never match: a context needs a concrete line to report.
    pub fn matches<N: SyntaxNode>(&self, node: &N) -> Option<usize> {
        let line = node.line()?;
        let hit = match self {
            Matcher::LineNumber(target) => line == *target,
            Matcher::Literal(text) => node.text_attributes().iter().any(|attr| attr == text),
            Matcher::Regex(regex) => node
                .text_attributes()
                .iter()
                .any(|attr| regex.is_match(attr)),
        };
        hit.then_some(line)
    }
}
