//! Optional capabilities the session calls out to.
//!
//! Both are injected by the front end. A session without them behaves as if
//! they completed instantly and silently.

use std::{fmt::Debug, time::Duration};

/// Sound cues emitted by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SoundCue {
    #[display("lock")]
    Lock,
    #[display("line clear")]
    LineClear,
    #[display("tetris")]
    Tetris,
    #[display("game over")]
    GameOver,
}

/// Plays sound cues. Not called while the session is muted.
pub trait AudioSink: Debug {
    fn play(&mut self, cue: SoundCue);
}

/// An interstitial that must finish before a game summary is released.
///
/// Shown at game over when the player used the row sacrifice shortcut.
pub trait Advertisement: Debug {
    fn start(&mut self);
    /// Called every frame with the time since the previous frame.
    fn advance(&mut self, elapsed: Duration);
    fn is_finished(&self) -> bool;
}
