//! Ranking and limiting

use crate::record::SentenceRecord;

/// Sort by difficulty, hardest first. The sort is stable, so records of
/// equal difficulty keep their encounter order.
pub fn rank(records: &mut [SentenceRecord]) {
    records.sort_by(|a, b| b.difficulty.cmp(&a.difficulty));
}

/// Keep at most `limit` records.
pub fn truncate(records: &mut Vec<SentenceRecord>, limit: Option<usize>) {
    if let Some(limit) = limit {
        records.truncate(limit);
    }
}

/// Map a user-facing limit to an optional cap: zero or negative means no
/// limit.
pub fn limit_from(raw: i64) -> Option<usize> {
    if raw <= 0 {
        None
    } else {
        Some(usize::try_from(raw).unwrap_or(usize::MAX))
    }
}
