use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::ScoreRecord;

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum LeaderboardError {
    #[display("failed to write leaderboard file {}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[display("failed to encode leaderboard")]
    Encode { source: serde_json::Error },
}

/// Persistent list of score records.
///
/// Loading never fails: missing or unreadable data is an empty leaderboard.
pub trait LeaderboardStore {
    fn append(&mut self, record: ScoreRecord) -> Result<(), LeaderboardError>;
    fn load_all(&self) -> Vec<ScoreRecord>;
    /// Removes every record, not just the displayed ones.
    fn clear(&mut self) -> Result<(), LeaderboardError>;
}

/// Records kept in memory only.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<ScoreRecord>,
}

impl LeaderboardStore for MemoryStore {
    fn append(&mut self, record: ScoreRecord) -> Result<(), LeaderboardError> {
        self.records.push(record);
        Ok(())
    }

    fn load_all(&self) -> Vec<ScoreRecord> {
        self.records.clone()
    }

    fn clear(&mut self) -> Result<(), LeaderboardError> {
        self.records.clear();
        Ok(())
    }
}

/// Records stored as a JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, records: &[ScoreRecord]) -> Result<(), LeaderboardError> {
        let json = serde_json::to_string_pretty(records)
            .map_err(|source| LeaderboardError::Encode { source })?;
        let write_err = |source| LeaderboardError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(write_err)?;
        }
        fs::write(&self.path, json).map_err(write_err)?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "leaderboard saved");
        Ok(())
    }
}

impl LeaderboardStore for JsonFileStore {
    fn append(&mut self, record: ScoreRecord) -> Result<(), LeaderboardError> {
        let mut records = self.load_all();
        tracing::info!(name = %record.name, score = record.score, "appending score record");
        records.push(record);
        self.write(&records)
    }

    fn load_all(&self) -> Vec<ScoreRecord> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return vec![],
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read leaderboard, treating as empty");
                return vec![];
            }
        };
        serde_json::from_str(&json).unwrap_or_else(|e| {
            tracing::warn!(path = %self.path.display(), error = %e, "malformed leaderboard, treating as empty");
            vec![]
        })
    }

    fn clear(&mut self) -> Result<(), LeaderboardError> {
        tracing::info!(path = %self.path.display(), "clearing leaderboard");
        self.write(&[])
    }
}
