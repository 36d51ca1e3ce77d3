use crate::constant::{REPORT_RULE_WIDTH, REPORT_TITLE};
use crate::differ::{DiffRecord, DiffResult};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One side of the comparison as it appears in the report header
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub label: String,
    pub json_valid: bool,
}

/// Plain-text summary of a finished comparison
pub struct ComparisonReport<'a> {
    pub generated_at: DateTime<Local>,
    pub first: ReportInput,
    pub second: ReportInput,
    pub result: &'a DiffResult,
}

impl<'a> ComparisonReport<'a> {
    pub fn new(first: ReportInput, second: ReportInput, result: &'a DiffResult) -> Self {
        Self {
            generated_at: Local::now(),
            first,
            second,
            result,
        }
    }

    pub fn render(&self) -> String {
        let double_rule = "=".repeat(REPORT_RULE_WIDTH);
        let rule = "-".repeat(REPORT_RULE_WIDTH);
        let stats = &self.result.stats;
        let mut report = String::new();

        // writing to a String cannot fail
        let _ = writeln!(report, "{}", REPORT_TITLE);
        let _ = writeln!(report, "{}", double_rule);
        let _ = writeln!(
            report,
            "Generated on: {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        );

        for (number, input) in [(1, &self.first), (2, &self.second)] {
            let _ = writeln!(report, "File {}: {}", number, input.label);
            let _ = writeln!(
                report,
                "JSON Status: {}\n",
                if input.json_valid { "Valid" } else { "Invalid" }
            );
        }

        let _ = writeln!(report, "Summary:");
        let _ = writeln!(report, "{}", rule);
        let _ = writeln!(report, "Lines added: {}", stats.added);
        let _ = writeln!(report, "Lines removed: {}", stats.removed);
        let _ = writeln!(report, "Lines unchanged: {}\n", stats.unchanged);

        let _ = writeln!(report, "Detailed Differences:");
        let _ = writeln!(report, "{}", rule);
        for record in &self.result.records {
            let label = match record {
                DiffRecord::Added(_) => "Added",
                DiffRecord::Removed(_) => "Removed",
                DiffRecord::Unchanged(_) => continue,
            };
            let line = record.display_content();
            let _ = writeln!(report, "{}: {}", label, line);
        }

        report
    }

    pub fn default_file_name(&self) -> String {
        format!(
            "comparison_report_{}.txt",
            self.generated_at.format("%Y%m%d_%H%M%S")
        )
    }

    /// Write the report into `dir` under its default file name
    pub fn save_to_dir(&self, dir: &Path) -> Result<PathBuf, ReportError> {
        self.save_to_file(&dir.join(self.default_file_name()))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<PathBuf, ReportError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.render())?;
        info!("Report saved to {:?}", path);
        Ok(path.to_path_buf())
    }
}
