#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RenderError {
    #[error("invalid color range {start}..{end} for text of {len} characters")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("line {line} is out of range (source has {total} lines)")]
    LineOutOfRange { line: usize, total: usize },
}
