//! Output rendering for ctxfind.
//!
//! This crate provides:
//! - `SourceText`, the 1-indexed lines of one file
//! - Terminal colors and the `insert_color` primitive
//! - `LineRenderer`, which turns a `ResultSet` into aligned, optionally highlighted lines
//! - JSON file reports

pub mod color;
mod error;
mod renderer;
mod report;
mod source;

pub use color::{insert_color, paint, Color, END_COLOR};
pub use error::RenderError;
pub use renderer::{Highlight, LineRenderer, RenderOptions};
pub use report::{reports_to_json, FileReport, ReportLine};
pub use source::SourceText;
