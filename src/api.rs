//! Request/response handling for the compare and format-json endpoints.
//!
//! Payload shapes follow the web front end: `content1`/`content2` in,
//! bucketed lines plus stats and per-input JSON status out. Binding these to
//! an HTTP listener is left to the embedding server.

use crate::backend::json_backend::{format_json, validate_json};
use crate::differ::{ChangeKind, DiffResult, LineSequence, Stats, compare};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(#[source] serde_json::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub content1: String,
    #[serde(default)]
    pub content2: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Differences {
    pub additions: Vec<String>,
    pub deletions: Vec<String>,
    pub unchanged: Vec<String>,
    pub stats: Stats,
}

impl From<&DiffResult> for Differences {
    fn from(result: &DiffResult) -> Self {
        let collect = |kind: ChangeKind| -> Vec<String> {
            result.lines_of(kind).map(str::to_string).collect()
        };
        Self {
            additions: collect(ChangeKind::Added),
            deletions: collect(ChangeKind::Removed),
            unchanged: collect(ChangeKind::Unchanged),
            stats: result.stats,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub valid: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonValidation {
    pub file1: ValidationEntry,
    pub file2: ValidationEntry,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareResponse {
    pub differences: Differences,
    pub json_validation: JsonValidation,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatJsonRequest {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatJsonResponse {
    pub success: bool,
    /// Formatted text on success, the error message otherwise
    pub result: String,
}

fn validation_entry(content: &str) -> ValidationEntry {
    let status = validate_json(content);
    ValidationEntry {
        valid: status.valid,
        message: status.message,
    }
}

pub fn handle_compare(request: &CompareRequest) -> CompareResponse {
    let first = LineSequence::from_text(&request.content1);
    let second = LineSequence::from_text(&request.content2);
    let result = compare(&first, &second);
    debug!("Compared request: {:?}", result.stats);

    CompareResponse {
        differences: Differences::from(&result),
        json_validation: JsonValidation {
            file1: validation_entry(&request.content1),
            file2: validation_entry(&request.content2),
        },
    }
}

pub fn handle_format_json(request: &FormatJsonRequest, indent: usize) -> FormatJsonResponse {
    match format_json(&request.content, indent) {
        Ok(formatted) => FormatJsonResponse {
            success: true,
            result: formatted,
        },
        Err(e) => FormatJsonResponse {
            success: false,
            result: e.to_string(),
        },
    }
}

/// Handle a raw compare request body, returning the serialized response
pub fn handle_compare_json(body: &str) -> Result<String, ApiError> {
    let request: CompareRequest = serde_json::from_str(body).map_err(ApiError::BadRequest)?;
    Ok(serde_json::to_string(&handle_compare(&request))?)
}

/// Handle a raw format-json request body, returning the serialized response
pub fn handle_format_json_str(body: &str, indent: usize) -> Result<String, ApiError> {
    let request: FormatJsonRequest = serde_json::from_str(body).map_err(ApiError::BadRequest)?;
    Ok(serde_json::to_string(&handle_format_json(&request, indent))?)
}
