use super::lines::LineSequence;
use super::types::{DiffRecord, DiffResult};
use serde::{Deserialize, Serialize};
use similar::{Algorithm as SimilarAlgorithm, DiffOp, capture_diff_slices};
use std::collections::HashMap;
use tracing::debug;

/// Largest DP table the exact LCS engine builds before handing over to Myers.
pub const DEFAULT_MAX_TABLE_CELLS: usize = 4_000_000;

/// Engine used to align the block left between the common prefix and suffix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Exact longest common subsequence; earliest positions win ties.
    #[default]
    Lcs,
    /// Myers' O(ND) difference algorithm, as implemented by `similar`.
    Myers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffOptions {
    pub algorithm: Algorithm,
    pub max_table_cells: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Lcs,
            max_table_cells: DEFAULT_MAX_TABLE_CELLS,
        }
    }
}

type Anchor = (usize, usize);

/// Compare two line sequences with the default options.
pub fn compare(first: &LineSequence, second: &LineSequence) -> DiffResult {
    compare_with(first, second, &DiffOptions::default())
}

/// Split both texts into lines (terminators dropped) and compare them.
pub fn compare_text(old: &str, new: &str) -> DiffResult {
    compare(&LineSequence::from_text(old), &LineSequence::from_text(new))
}

/// Align `first` against `second` and classify every line.
///
/// At each divergence point all pending removals from `first` are emitted
/// before the pending additions from `second`.
pub fn compare_with(
    first: &LineSequence,
    second: &LineSequence,
    options: &DiffOptions,
) -> DiffResult {
    let old = first.as_slice();
    let new = second.as_slice();

    let anchors = find_anchors(old, new, options);
    DiffResult::from_records(walk(old, new, &anchors))
}

/// Pairs of positions matched between the two sides, strictly increasing in both.
fn find_anchors(old: &[String], new: &[String], options: &DiffOptions) -> Vec<Anchor> {
    let (old_ids, new_ids) = intern(old, new);

    let prefix = old_ids
        .iter()
        .zip(&new_ids)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = old_ids[prefix..]
        .iter()
        .rev()
        .zip(new_ids[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    let old_mid = &old_ids[prefix..old_ids.len() - suffix];
    let new_mid = &new_ids[prefix..new_ids.len() - suffix];

    let mut anchors: Vec<Anchor> = (0..prefix).map(|i| (i, i)).collect();

    if !old_mid.is_empty() && !new_mid.is_empty() {
        let cells = (old_mid.len() + 1).saturating_mul(new_mid.len() + 1);
        let middle = match options.algorithm {
            Algorithm::Lcs if cells <= options.max_table_cells => lcs_anchors(old_mid, new_mid),
            Algorithm::Lcs => {
                debug!(
                    cells,
                    limit = options.max_table_cells,
                    "LCS table too large, aligning with Myers"
                );
                myers_anchors(old_mid, new_mid)
            }
            Algorithm::Myers => myers_anchors(old_mid, new_mid),
        };
        anchors.extend(middle.into_iter().map(|(i, j)| (i + prefix, j + prefix)));
    }

    let old_tail = old_ids.len() - suffix;
    let new_tail = new_ids.len() - suffix;
    anchors.extend((0..suffix).map(|k| (old_tail + k, new_tail + k)));

    anchors
}

/// Map every distinct line to a small integer so the engines compare ids, not strings.
fn intern<'a>(old: &'a [String], new: &'a [String]) -> (Vec<u32>, Vec<u32>) {
    let mut ids: HashMap<&'a str, u32> = HashMap::new();
    let mut assign = |lines: &'a [String]| -> Vec<u32> {
        lines
            .iter()
            .map(|line| {
                let next = ids.len() as u32;
                *ids.entry(line.as_str()).or_insert(next)
            })
            .collect()
    };

    let old_ids = assign(old);
    let new_ids = assign(new);
    (old_ids, new_ids)
}

fn lcs_anchors(old: &[u32], new: &[u32]) -> Vec<Anchor> {
    let (n, m) = (old.len(), new.len());
    let width = m + 1;

    // table[i * width + j] = LCS length of old[i..] and new[j..]
    let mut table = vec![0u32; (n + 1) * width];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            table[i * width + j] = if old[i] == new[j] {
                table[(i + 1) * width + j + 1] + 1
            } else {
                table[(i + 1) * width + j].max(table[i * width + j + 1])
            };
        }
    }

    let mut anchors = Vec::with_capacity(table[0] as usize);
    let (mut i, mut j) = (0usize, 0usize);
    while i < n && j < m {
        if old[i] == new[j] {
            anchors.push((i, j));
            i += 1;
            j += 1;
        } else if table[(i + 1) * width + j] >= table[i * width + j + 1] {
            i += 1;
        } else {
            j += 1;
        }
    }

    anchors
}

fn myers_anchors(old: &[u32], new: &[u32]) -> Vec<Anchor> {
    capture_diff_slices(SimilarAlgorithm::Myers, old, new)
        .into_iter()
        .filter_map(|op| match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => Some((old_index, new_index, len)),
            _ => None,
        })
        .flat_map(|(old_index, new_index, len)| {
            (0..len).map(move |k| (old_index + k, new_index + k))
        })
        .collect()
}

fn walk(old: &[String], new: &[String], anchors: &[Anchor]) -> Vec<DiffRecord> {
    let mut records = Vec::with_capacity(old.len() + new.len() - anchors.len());
    let (mut i, mut j) = (0usize, 0usize);

    for &(anchor_old, anchor_new) in anchors {
        flush(&mut records, &old[i..anchor_old], &new[j..anchor_new]);
        records.push(DiffRecord::Unchanged(old[anchor_old].clone()));
        i = anchor_old + 1;
        j = anchor_new + 1;
    }
    flush(&mut records, &old[i..], &new[j..]);

    records
}

fn flush(records: &mut Vec<DiffRecord>, removed: &[String], added: &[String]) {
    records.extend(removed.iter().cloned().map(DiffRecord::Removed));
    records.extend(added.iter().cloned().map(DiffRecord::Added));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::Stats;

    fn seq(lines: &[&str]) -> LineSequence {
        lines.iter().copied().collect()
    }

    fn unchanged(line: &str) -> DiffRecord {
        DiffRecord::Unchanged(line.to_string())
    }

    fn added(line: &str) -> DiffRecord {
        DiffRecord::Added(line.to_string())
    }

    fn removed(line: &str) -> DiffRecord {
        DiffRecord::Removed(line.to_string())
    }

    fn assert_conserved(x: &LineSequence, y: &LineSequence, result: &DiffResult) {
        assert_eq!(result.stats.unchanged + result.stats.removed, x.len());
        assert_eq!(result.stats.unchanged + result.stats.added, y.len());
        assert_eq!(result.records.len(), x.len() + y.len() - result.stats.unchanged);
    }

    fn sample_pairs() -> Vec<(LineSequence, LineSequence)> {
        vec![
            (seq(&[]), seq(&[])),
            (seq(&["a"]), seq(&[])),
            (seq(&[]), seq(&["a", "b"])),
            (seq(&["a", "b", "c"]), seq(&["a", "x", "c"])),
            (seq(&["a", "b", "c", "d"]), seq(&["b", "d", "a", "c"])),
            (seq(&["x", "a", "x", "b", "x"]), seq(&["a", "x", "x", "b"])),
            (seq(&["1", "2", "3", "4", "5", "6"]), seq(&["6", "5", "4", "3", "2", "1"])),
            (seq(&["", "", "a", ""]), seq(&["", "a", "", ""])),
        ]
    }

    #[test]
    fn empty_against_empty() {
        let result = compare(&seq(&[]), &seq(&[]));
        assert!(result.is_empty());
        assert_eq!(result.stats, Stats::default());
    }

    #[test]
    fn identical_sequences_are_unchanged() {
        let x = seq(&["a", "b", "", "b"]);
        let result = compare(&x, &x);
        assert!(result.is_identical());
        assert_eq!(
            result.records,
            vec![unchanged("a"), unchanged("b"), unchanged(""), unchanged("b")]
        );
    }

    #[test]
    fn single_line_replacement() {
        let result = compare(&seq(&["a", "b", "c"]), &seq(&["a", "x", "c"]));
        assert_eq!(
            result.records,
            vec![unchanged("a"), removed("b"), added("x"), unchanged("c")]
        );
        assert_eq!(
            result.stats,
            Stats {
                added: 1,
                removed: 1,
                unchanged: 2
            }
        );
    }

    #[test]
    fn appended_line() {
        let result = compare(&seq(&["line1", "line2"]), &seq(&["line1", "line2", "line3"]));
        assert_eq!(
            result.records,
            vec![unchanged("line1"), unchanged("line2"), added("line3")]
        );
        assert_eq!(
            result.stats,
            Stats {
                added: 1,
                removed: 0,
                unchanged: 2
            }
        );
    }

    #[test]
    fn disjoint_removes_all_then_adds_all() {
        let x = seq(&["a", "b", "c"]);
        let y = seq(&["d", "e"]);
        let expected = vec![removed("a"), removed("b"), removed("c"), added("d"), added("e")];

        assert_eq!(compare(&x, &y).records, expected);

        let myers = DiffOptions {
            algorithm: Algorithm::Myers,
            ..DiffOptions::default()
        };
        assert_eq!(compare_with(&x, &y, &myers).records, expected);
    }

    #[test]
    fn duplicate_line_matches_first_occurrence() {
        let result = compare(&seq(&["a", "a"]), &seq(&["a"]));
        assert_eq!(result.records, vec![unchanged("a"), removed("a")]);

        let result = compare(&seq(&["b", "a", "a"]), &seq(&["a", "c"]));
        assert_eq!(
            result.records,
            vec![removed("b"), unchanged("a"), removed("a"), added("c")]
        );
    }

    #[test]
    fn common_suffix_is_anchored() {
        let result = compare(&seq(&["a", "b", "a"]), &seq(&["c", "a"]));
        assert_eq!(
            result.records,
            vec![removed("a"), removed("b"), added("c"), unchanged("a")]
        );
    }

    #[test]
    fn removals_flush_before_additions() {
        let result = compare(&seq(&["k", "a", "b", "k"]), &seq(&["k", "x", "y", "k"]));
        assert_eq!(
            result.records,
            vec![
                unchanged("k"),
                removed("a"),
                removed("b"),
                added("x"),
                added("y"),
                unchanged("k")
            ]
        );
    }

    #[test]
    fn equality_is_exact() {
        let result = compare(&seq(&["a ", "B"]), &seq(&["a", "b"]));
        assert_eq!(result.stats.unchanged, 0);

        let with_ends = compare(
            &LineSequence::from_text_keep_ends("a\nb"),
            &LineSequence::from_text_keep_ends("a\nb\n"),
        );
        assert_eq!(
            with_ends.records,
            vec![unchanged("a\n"), removed("b"), added("b\n")]
        );
    }

    #[test]
    fn conservation_holds() {
        for (x, y) in sample_pairs() {
            assert_conserved(&x, &y, &compare(&x, &y));
        }
    }

    #[test]
    fn polarity_is_symmetric() {
        for (x, y) in sample_pairs() {
            let forward = compare(&x, &y).stats;
            let backward = compare(&y, &x).stats;
            assert_eq!(forward.added, backward.removed);
            assert_eq!(forward.removed, backward.added);
            assert_eq!(forward.unchanged, backward.unchanged);
        }
    }

    #[test]
    fn finds_longest_common_subsequence() {
        let result = compare(&seq(&["a", "b", "c", "d"]), &seq(&["b", "d", "a", "c"]));
        assert_eq!(result.stats.unchanged, 2);

        let result = compare(
            &seq(&["x", "a", "x", "b", "x"]),
            &seq(&["a", "x", "x", "b"]),
        );
        assert_eq!(result.stats.unchanged, 3);
    }

    #[test]
    fn myers_fallback_keeps_invariants() {
        let tiny_table = DiffOptions {
            algorithm: Algorithm::Lcs,
            max_table_cells: 1,
        };
        for (x, y) in sample_pairs() {
            let fallback = compare_with(&x, &y, &tiny_table);
            assert_conserved(&x, &y, &fallback);
            assert_eq!(fallback.stats.unchanged, compare(&x, &y).stats.unchanged);
        }
    }

    #[test]
    fn results_are_deterministic() {
        let x = seq(&["a", "b", "a", "b", "a"]);
        let y = seq(&["b", "a", "b", "a", "b"]);
        let first = compare(&x, &y);
        for _ in 0..5 {
            assert_eq!(compare(&x, &y), first);
        }
    }

    #[test]
    fn compare_text_splits_lines() {
        let result = compare_text("a\nb\nc\n", "a\nx\nc\n");
        assert_eq!(
            result.records,
            vec![unchanged("a"), removed("b"), added("x"), unchanged("c")]
        );
    }
}
