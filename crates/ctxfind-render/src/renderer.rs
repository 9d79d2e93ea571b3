//! Turns a set of line numbers into printable, aligned lines.

use ctxfind_core::ResultSet;
use regex::Regex;

use crate::color::{insert_color, paint, Color};
use crate::error::RenderError;
use crate::source::SourceText;

/// What to paint inside a rendered line.
#[derive(Debug, Clone)]
pub enum Highlight {
    /// Every occurrence of the term, taken literally.
    Term(String),
    /// Every non-empty match of the pattern.
    Pattern(Regex),
    /// The whole text of one line.
    Line(usize),
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub number_color: Option<Color>,
    /// Color for highlighted text; without it nothing is highlighted.
    pub line_color: Option<Color>,
    pub highlight: Option<Highlight>,
    pub line_numbers: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            number_color: None,
            line_color: None,
            highlight: None,
            line_numbers: true,
        }
    }
}

/// Renders `<number>:  <text>` lines with the number right-aligned to the widest number in
/// the result set.
#[derive(Debug, Clone, Default)]
pub struct LineRenderer {
    options: RenderOptions,
}

impl LineRenderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn render(&self, source: &SourceText, results: &ResultSet) -> Result<Vec<String>, RenderError> {
        let width = results.max_line().map_or(0, |max| max.to_string().len());

        results
            .iter()
            .map(|line_number| {
                let text = source.line(line_number).ok_or(RenderError::LineOutOfRange {
                    line: line_number,
                    total: source.num_lines(),
                })?;
                self.render_line(line_number, text, width)
            })
            .collect()
    }

    pub fn render_line(&self, line_number: usize, text: &str, width: usize) -> Result<String, RenderError> {
        let text = self.highlight(line_number, text)?;
        if !self.options.line_numbers {
            return Ok(text);
        }

        let number = format!("{line_number:>width$}:");
        let number = match self.options.number_color {
            Some(color) => paint(&number, color),
            None => number,
        };
        Ok(format!("{number}  {text}"))
    }

    fn highlight(&self, line_number: usize, text: &str) -> Result<String, RenderError> {
        let (Some(color), Some(highlight)) = (self.options.line_color, &self.options.highlight) else {
            return Ok(text.to_string());
        };

        let ranges: Vec<(usize, usize)> = match highlight {
            Highlight::Line(target) if *target == line_number => return Ok(paint(text, color)),
            Highlight::Line(_) => Vec::new(),
            Highlight::Term(term) if term.is_empty() => Vec::new(),
            Highlight::Term(term) => text
                .match_indices(term.as_str())
                .map(|(start, found)| (start, start + found.len()))
                .collect(),
            Highlight::Pattern(regex) => regex
                .find_iter(text)
                .filter(|m| !m.is_empty())
                .map(|m| (m.start(), m.end()))
                .collect(),
        };

        // Right to left, so the character offsets of earlier ranges stay valid.
        let mut colored = text.to_string();
        for (start, end) in ranges.into_iter().rev() {
            let start_char = text[..start].chars().count();
            let end_char = start_char + text[start..end].chars().count();
            colored = insert_color(&colored, start_char, end_char, color)?;
        }
        Ok(colored)
    }
}
