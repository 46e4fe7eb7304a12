use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Points awarded per simultaneous clear, indexed by row count.
const SCORE_TABLE: [u64; 5] = [0, 100, 300, 500, 800];

/// Gravity interval per start level, level 1 first.
const DROP_INTERVAL_MS: [u64; 10] = [1000, 900, 800, 700, 600, 500, 400, 300, 200, 100];

/// Points for clearing `rows` rows with a single lock.
///
/// A four-row clear pays the premium 800 rather than 4 × 100. Larger counts
/// can only come from debug affordances and are paid as four rows.
///
/// ```
/// use dropris_engine::score_for_clear;
///
/// assert_eq!(score_for_clear(1), 100);
/// assert_eq!(score_for_clear(4), 800);
/// ```
#[must_use]
pub fn score_for_clear(rows: usize) -> u64 {
    SCORE_TABLE[rows.min(SCORE_TABLE.len() - 1)]
}

/// Label of a line clear, used for announcements and sound cues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum ClearKind {
    Single,
    Double,
    Triple,
    Tetris,
}

impl ClearKind {
    #[must_use]
    pub fn from_rows(rows: usize) -> Option<Self> {
        match rows {
            0 => None,
            1 => Some(Self::Single),
            2 => Some(Self::Double),
            3 => Some(Self::Triple),
            _ => Some(Self::Tetris),
        }
    }

    /// Rows removed by this kind of clear; also its index in
    /// [`GameStats::line_cleared_counter`].
    #[must_use]
    pub const fn rows(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
            Self::Tetris => 4,
        }
    }
}

/// Start level, 1 through 10.
///
/// Only chooses the gravity interval; it does not advance with cleared lines.
///
/// Serialized as a bare number; deserializing rejects values outside 1..=10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Level(u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("level {level} is outside 1..=10")]
pub struct LevelOutOfRange {
    level: u8,
}

impl TryFrom<u8> for Level {
    type Error = LevelOutOfRange;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        if (Self::MIN.0..=Self::MAX.0).contains(&level) {
            Ok(Self(level))
        } else {
            Err(LevelOutOfRange { level })
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.0
    }
}

impl Default for Level {
    fn default() -> Self {
        Self::MIN
    }
}

impl Level {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(10);

    /// Parses a requested level. Absent or out-of-range values fall back to
    /// level 1.
    #[must_use]
    pub fn from_requested(level: Option<u8>) -> Self {
        level
            .and_then(|n| Self::try_from(n).ok())
            .unwrap_or(Self::MIN)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Time between gravity steps.
    #[must_use]
    pub fn drop_interval(self) -> Duration {
        Duration::from_millis(DROP_INTERVAL_MS[usize::from(self.0 - 1)])
    }
}

/// Score and counters of one session.
///
/// ```
/// use dropris_engine::{GameStats, Level};
///
/// let mut stats = GameStats::new(Level::MIN);
/// stats.complete_piece_drop(4);
///
/// assert_eq!(stats.score(), 800);
/// assert_eq!(stats.total_cleared_lines(), 4);
/// assert_eq!(stats.line_cleared_counter()[4], 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameStats {
    level: Level,
    score: u64,
    completed_pieces: usize,
    total_cleared_lines: usize,
    line_cleared_counter: [usize; 5],
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(Level::default())
    }
}

impl GameStats {
    #[must_use]
    pub const fn new(level: Level) -> Self {
        Self {
            level,
            score: 0,
            completed_pieces: 0,
            total_cleared_lines: 0,
            line_cleared_counter: [0; 5],
        }
    }

    #[must_use]
    pub const fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn completed_pieces(&self) -> usize {
        self.completed_pieces
    }

    #[must_use]
    pub const fn total_cleared_lines(&self) -> usize {
        self.total_cleared_lines
    }

    /// Locks by number of rows they cleared: `[0]` counts locks that cleared
    /// nothing, `[4]` counts four-row clears.
    #[must_use]
    pub const fn line_cleared_counter(&self) -> &[usize; 5] {
        &self.line_cleared_counter
    }

    /// Records one locked piece that cleared `cleared_lines` rows and returns
    /// the points it earned.
    pub fn complete_piece_drop(&mut self, cleared_lines: usize) -> u64 {
        let points = score_for_clear(cleared_lines);
        self.completed_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.line_cleared_counter[cleared_lines.min(4)] += 1;
        self.score += points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_table() {
        let scores: Vec<_> = (0..=4).map(score_for_clear).collect();
        assert_eq!(scores, [0, 100, 300, 500, 800]);
        assert!(score_for_clear(4) > 4 * score_for_clear(1));
        assert_eq!(score_for_clear(6), 800);
    }

    #[test]
    fn test_clear_kind_labels() {
        assert_eq!(ClearKind::from_rows(0), None);
        assert!(ClearKind::from_rows(3).is_some_and(|k| k.is_triple()));
        assert_eq!(ClearKind::from_rows(4).map(|k| k.to_string()).as_deref(), Some("Tetris"));
        assert_eq!(ClearKind::from_rows(7).map(ClearKind::rows), Some(4));
    }

    #[test]
    fn test_level_fallback() {
        assert_eq!(Level::from_requested(None), Level::MIN);
        assert_eq!(Level::from_requested(Some(0)), Level::MIN);
        assert_eq!(Level::from_requested(Some(11)), Level::MIN);
        assert_eq!(Level::from_requested(Some(7)).get(), 7);
    }

    #[test]
    fn test_level_serde_keeps_range() {
        let level: Level = serde_json::from_str("4").unwrap();
        assert_eq!(level.get(), 4);
        assert_eq!(serde_json::to_string(&level).unwrap(), "4");

        for json in ["0", "11", "255"] {
            let err = serde_json::from_str::<Level>(json).unwrap_err();
            assert!(err.to_string().contains("outside 1..=10"), "{json}: {err}");
        }
    }

    #[test]
    fn test_drop_interval_table() {
        assert_eq!(Level::MIN.drop_interval(), Duration::from_millis(1000));
        assert_eq!(Level::from_requested(Some(5)).drop_interval(), Duration::from_millis(600));
        assert_eq!(Level::MAX.drop_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = GameStats::new(Level::from_requested(Some(3)));
        assert_eq!(stats.complete_piece_drop(0), 0);
        assert_eq!(stats.complete_piece_drop(2), 300);
        assert_eq!(stats.complete_piece_drop(1), 100);
        assert_eq!(stats.score(), 400);
        assert_eq!(stats.total_cleared_lines(), 3);
        assert_eq!(stats.completed_pieces(), 3);
        assert_eq!(stats.line_cleared_counter(), &[1, 1, 1, 0, 0]);
        assert_eq!(stats.level().get(), 3);
    }
}
