use crate::differ::{DiffResult, DiffRow, Stats, group_into_rows, is_line_break};
use std::fmt::Write as _;

const GUTTER: &str = " | ";

fn trim_terminator(line: &str) -> &str {
    line.trim_end_matches(is_line_break)
}

/// Truncate or pad to exactly `width` characters
fn fit(text: &str, width: usize) -> String {
    let truncated: String = text.chars().take(width).collect();
    format!("{:<width$}", truncated, width = width)
}

/// One record per line, prefixed with `"  "`, `"+ "` or `"- "`
pub fn render_unified(result: &DiffResult) -> String {
    let mut out = String::new();
    for record in &result.records {
        let _ = writeln!(out, "{}{}", record.marker(), record.display_content());
    }
    out
}

/// Two columns: the first input on the left, the second on the right
pub fn render_side_by_side(result: &DiffResult, column_width: usize) -> String {
    let mut out = String::new();
    // room for the two-character marker
    let text_width = column_width.saturating_sub(2);

    for row in group_into_rows(&result.records) {
        match row {
            DiffRow::Unchanged(text) => {
                let cell = fit(trim_terminator(&text), text_width);
                let _ = writeln!(out, "  {}{}  {}", cell, GUTTER, cell.trim_end());
            }
            DiffRow::Pair(left_block, right_block) => {
                let max = left_block.len().max(right_block.len());
                for i in 0..max {
                    let left = match left_block.get(i) {
                        Some(line) => format!("- {}", fit(trim_terminator(line), text_width)),
                        None => " ".repeat(column_width),
                    };
                    let right = match right_block.get(i) {
                        Some(line) => {
                            format!("+ {}", fit(trim_terminator(line), text_width).trim_end())
                        }
                        None => String::new(),
                    };
                    let _ = writeln!(out, "{}{}{}", left, GUTTER, right);
                }
            }
        }
    }

    out
}

pub fn render_stats(stats: &Stats) -> String {
    format!("+{} -{} ={}", stats.added, stats.removed, stats.unchanged)
}
