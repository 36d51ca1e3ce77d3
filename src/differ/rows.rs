use super::types::{DiffRecord, DiffRow};

/// Group records into rows where unchanged lines are single rows,
/// and contiguous removed/added blocks become paired rows.
pub fn group_into_rows(records: &[DiffRecord]) -> Vec<DiffRow> {
    let mut rows = Vec::new();
    let mut i = 0usize;

    while i < records.len() {
        match &records[i] {
            DiffRecord::Unchanged(line) => {
                rows.push(DiffRow::Unchanged(line.clone()));
                i += 1;
            }
            DiffRecord::Removed(_) => {
                let mut removed_block = Vec::new();
                while let Some(DiffRecord::Removed(line)) = records.get(i) {
                    removed_block.push(line.clone());
                    i += 1;
                }

                // the added block directly following it (if any)
                let mut added_block = Vec::new();
                while let Some(DiffRecord::Added(line)) = records.get(i) {
                    added_block.push(line.clone());
                    i += 1;
                }

                rows.push(DiffRow::Pair(removed_block, added_block));
            }
            DiffRecord::Added(_) => {
                // added without preceding removal -> right-only
                let mut added_block = Vec::new();
                while let Some(DiffRecord::Added(line)) = records.get(i) {
                    added_block.push(line.clone());
                    i += 1;
                }
                rows.push(DiffRow::Pair(Vec::new(), added_block));
            }
        }
    }

    rows
}
