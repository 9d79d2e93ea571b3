use std::path::Path;

/// The raw lines of one source file, addressed by 1-based line number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceText {
    lines: Vec<String>,
}

impl SourceText {
    pub fn new(content: &str) -> Self {
        Self {
            lines: content.lines().map(str::to_string).collect(),
        }
    }

    pub fn load(path: &Path) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::new(&content))
    }

    /// Text of `line_number` without its line terminator.
    pub fn line(&self, line_number: usize) -> Option<&str> {
        line_number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }

    pub fn num_lines(&self) -> usize {
        self.lines.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_indexed_lines() {
        let source = SourceText::new("first\r\nsecond\n\nfourth\n");
        assert_eq!(source.num_lines(), 4);
        assert_eq!(source.line(1), Some("first"));
        assert_eq!(source.line(2), Some("second"));
        assert_eq!(source.line(3), Some(""));
        assert_eq!(source.line(4), Some("fourth"));
        assert_eq!(source.line(0), None);
        assert_eq!(source.line(5), None);
    }
}
