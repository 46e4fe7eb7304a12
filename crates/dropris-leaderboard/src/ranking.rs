use crate::ScoreRecord;

/// Number of entries shown on the leaderboard.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankedRecord<'a> {
    /// 1-based position.
    pub rank: usize,
    pub record: &'a ScoreRecord,
}

/// The `n` best records, highest score first.
///
/// Records with equal scores keep their insertion order.
#[must_use]
pub fn top_scores(records: &[ScoreRecord], n: usize) -> Vec<RankedRecord<'_>> {
    let mut sorted: Vec<&ScoreRecord> = records.iter().collect();
    sorted.sort_by(|a, b| b.score.cmp(&a.score));
    sorted
        .into_iter()
        .take(n)
        .zip(1..)
        .map(|(record, rank)| RankedRecord { rank, record })
        .collect()
}
