use super::lines::is_line_break;
use super::stats::{Stats, calculate_stats};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Unchanged,
}

/// One classified line of the aligned output, carrying the bare line content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "line", rename_all = "lowercase")]
pub enum DiffRecord {
    Unchanged(String),
    Added(String),
    Removed(String),
}

impl DiffRecord {
    pub fn kind(&self) -> ChangeKind {
        match self {
            DiffRecord::Unchanged(_) => ChangeKind::Unchanged,
            DiffRecord::Added(_) => ChangeKind::Added,
            DiffRecord::Removed(_) => ChangeKind::Removed,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            DiffRecord::Unchanged(line) | DiffRecord::Added(line) | DiffRecord::Removed(line) => {
                line
            }
        }
    }

    /// Content without its line terminator, for display.
    pub fn display_content(&self) -> &str {
        self.content().trim_end_matches(is_line_break)
    }

    /// Conventional two-character prefix used by plain-text renderers.
    pub fn marker(&self) -> &'static str {
        match self {
            DiffRecord::Unchanged(_) => "  ",
            DiffRecord::Added(_) => "+ ",
            DiffRecord::Removed(_) => "- ",
        }
    }
}

/// Ordered records produced by the alignment walk, plus their counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    pub records: Vec<DiffRecord>,
    pub stats: Stats,
}

impl DiffResult {
    pub fn from_records(records: Vec<DiffRecord>) -> Self {
        let stats = calculate_stats(&records);
        Self { records, stats }
    }

    pub fn is_identical(&self) -> bool {
        self.stats.added == 0 && self.stats.removed == 0
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Lines of the given kind, in record order.
    pub fn lines_of(&self, kind: ChangeKind) -> impl Iterator<Item = &str> {
        self.records
            .iter()
            .filter(move |record| record.kind() == kind)
            .map(DiffRecord::content)
    }
}

/// Records grouped for two-pane display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffRow {
    Unchanged(String),
    /// A removed block (left) and the added block directly following it (right).
    Pair(Vec<String>, Vec<String>),
}
