use chrono::NaiveDate;
use dropris_engine::GameSummary;
use serde::{Deserialize, Serialize};

/// Name used when the player leaves the name empty.
pub const ANONYMOUS: &str = "Anonymous";

/// One finished game as persisted on disk.
///
/// ```json
/// { "name": "ada", "score": 1200, "lines": 9, "level": 3, "date": "2026-10-19" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u64,
    pub lines: usize,
    pub level: u8,
    pub date: String,
}

impl ScoreRecord {
    /// Builds a record from a game summary, dated `date` (`YYYY-MM-DD`).
    ///
    /// Surrounding whitespace is stripped from `name`; a blank name is
    /// recorded as [`ANONYMOUS`].
    #[must_use]
    pub fn from_summary(name: &str, summary: &GameSummary, date: NaiveDate) -> Self {
        let name = name.trim();
        Self {
            name: if name.is_empty() { ANONYMOUS } else { name }.to_owned(),
            score: summary.score,
            lines: summary.lines,
            level: summary.level,
            date: date.format("%Y-%m-%d").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUMMARY: GameSummary = GameSummary {
        score: 1300,
        lines: 11,
        level: 4,
    };

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).unwrap()
    }

    #[test]
    fn test_from_summary() {
        let record = ScoreRecord::from_summary("  ada ", &SUMMARY, date());
        assert_eq!(
            record,
            ScoreRecord {
                name: "ada".into(),
                score: 1300,
                lines: 11,
                level: 4,
                date: "2026-03-07".into(),
            }
        );
    }

    #[test]
    fn test_blank_name_is_anonymous() {
        let record = ScoreRecord::from_summary("   ", &SUMMARY, date());
        assert_eq!(record.name, ANONYMOUS);
    }

    #[test]
    fn test_json_field_names() {
        let record = ScoreRecord::from_summary("bo", &SUMMARY, date());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "name": "bo",
                "score": 1300,
                "lines": 11,
                "level": 4,
                "date": "2026-03-07",
            })
        );
    }
}
