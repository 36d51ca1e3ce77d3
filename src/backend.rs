//! Collaborators around the line differ: reading inputs, the JSON
//! capability and report export. None of them do alignment work.

pub mod file_backend;
pub mod json_backend;
pub mod report_backend;

pub use file_backend::{FileCache, FileError, read_lines, read_pair, read_text};
pub use json_backend::{JsonError, JsonStatus, format_json, validate_json};
pub use report_backend::{ComparisonReport, ReportError, ReportInput};
