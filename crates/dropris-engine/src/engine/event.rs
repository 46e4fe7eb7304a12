use crate::{ClearKind, PieceKind};

/// Final numbers of a finished game, handed to the score-record flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u64,
    pub lines: usize,
    pub level: u8,
}

/// Something that happened since the last frame.
///
/// Collected by the session and drained by the front end, which uses them to
/// trigger animations and screen changes.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::IsVariant)]
pub enum SessionEvent {
    PieceSpawned(PieceKind),
    PieceLocked(PieceKind),
    PieceHeld(PieceKind),
    LinesCleared {
        rows: usize,
        points: u64,
        kind: ClearKind,
    },
    /// First four-row clear of the session, or forced in debug mode.
    MilestoneReached,
    RowsSacrificed(usize),
    Paused,
    Resumed,
    MuteToggled {
        muted: bool,
    },
    Restarted,
    /// A new piece could not enter the board.
    ToppedOut,
    /// Game over is waiting for the advertisement to finish.
    AdvertisementStarted,
    GameFinished(GameSummary),
}
