use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Empty content")]
    Empty,

    #[error("{message}")]
    Parse {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl JsonError {
    fn parse(err: serde_json::Error) -> Self {
        JsonError::Parse {
            message: err.to_string(),
            line: err.line(),
            // serde_json reports column 0 when the error sits right after a line break
            column: err.column().max(1),
        }
    }
}

/// Outcome of validating one input as JSON
///
/// `line` and `column` are 1-based and only set for parse failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonStatus {
    pub valid: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

fn parse(text: &str) -> Result<Value, JsonError> {
    if text.trim().is_empty() {
        return Err(JsonError::Empty);
    }
    serde_json::from_str(text).map_err(JsonError::parse)
}

/// Check whether `text` is a single valid JSON document
pub fn validate_json(text: &str) -> JsonStatus {
    match parse(text) {
        Ok(_) => JsonStatus {
            valid: true,
            message: "Valid JSON".to_string(),
            line: None,
            column: None,
        },
        Err(JsonError::Parse {
            message,
            line,
            column,
        }) => JsonStatus {
            valid: false,
            message,
            line: Some(line),
            column: Some(column),
        },
        Err(e) => JsonStatus {
            valid: false,
            message: e.to_string(),
            line: None,
            column: None,
        },
    }
}

/// Parse `text` and re-serialize it with `indent` spaces per level, keeping key order
pub fn format_json(text: &str, indent: usize) -> Result<String, JsonError> {
    let value = parse(text)?;

    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;

    // serde_json only ever writes UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
