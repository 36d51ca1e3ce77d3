use super::types::DiffRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl Stats {
    pub fn changed(&self) -> usize {
        self.added + self.removed
    }
}

/// Count records per tag
pub fn calculate_stats(records: &[DiffRecord]) -> Stats {
    records.iter().fold(Stats::default(), |mut stats, record| {
        match record {
            DiffRecord::Added(_) => stats.added += 1,
            DiffRecord::Removed(_) => stats.removed += 1,
            DiffRecord::Unchanged(_) => stats.unchanged += 1,
        }
        stats
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_counting() {
        let records = vec![
            DiffRecord::Unchanged("a".to_string()),
            DiffRecord::Removed("b".to_string()),
            DiffRecord::Added("x".to_string()),
            DiffRecord::Added("y".to_string()),
            DiffRecord::Unchanged("c".to_string()),
        ];

        let stats = calculate_stats(&records);
        assert_eq!(
            stats,
            Stats {
                added: 2,
                removed: 1,
                unchanged: 2
            }
        );
        assert_eq!(stats.changed(), 3);
    }

    #[test]
    fn stats_of_nothing() {
        assert_eq!(calculate_stats(&[]), Stats::default());
    }
}
