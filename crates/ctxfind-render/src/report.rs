use ctxfind_core::ResultSet;
use serde::Serialize;

use crate::error::RenderError;
use crate::source::SourceText;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportLine {
    pub number: usize,
    pub text: String,
}

/// Machine-readable result for one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: String,
    pub lines: Vec<ReportLine>,
}

impl FileReport {
    pub fn new(path: impl Into<String>, source: &SourceText, results: &ResultSet) -> Result<Self, RenderError> {
        let lines = results
            .iter()
            .map(|number| {
                source
                    .line(number)
                    .map(|text| ReportLine {
                        number,
                        text: text.to_string(),
                    })
                    .ok_or(RenderError::LineOutOfRange {
                        line: number,
                        total: source.num_lines(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.into(),
            lines,
        })
    }
}

/// Serialize several reports as one pretty-printed JSON array.
pub fn reports_to_json(reports: &[FileReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}
