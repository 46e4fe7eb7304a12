//! Terminal implementations of the session's audio and advertisement hooks.

use std::{
    cell::Cell,
    fmt::Debug,
    io::{self, Write},
    rc::Rc,
    time::Duration,
};

use dropris_engine::{Advertisement, AudioSink, SoundCue};

/// Plays cues as terminal bells.
///
/// Locking a piece is too frequent to ring for and stays silent.
#[derive(Debug)]
pub(crate) struct TerminalBell<W> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub(crate) fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W> TerminalBell<W> {
    fn rings(cue: SoundCue) -> usize {
        match cue {
            SoundCue::Lock => 0,
            SoundCue::LineClear | SoundCue::GameOver => 1,
            SoundCue::Tetris => 2,
        }
    }
}

impl<W> AudioSink for TerminalBell<W>
where
    W: Write + Debug,
{
    fn play(&mut self, cue: SoundCue) {
        tracing::trace!(%cue, "sound cue");
        let bells = "\x07".repeat(Self::rings(cue));
        if bells.is_empty() {
            return;
        }
        if let Err(e) = self
            .out
            .write_all(bells.as_bytes())
            .and_then(|()| self.out.flush())
        {
            tracing::debug!(error = %e, "failed to ring terminal bell");
        }
    }
}

/// Fixed-length advertisement counted down in game time.
///
/// Clones share the countdown, so the screen can keep one to draw the
/// remaining time while the session owns another.
#[derive(Debug, Clone)]
pub(crate) struct CountdownAdvertisement {
    length: Duration,
    remaining: Rc<Cell<Option<Duration>>>,
}

impl CountdownAdvertisement {
    pub(crate) const DEFAULT_LENGTH: Duration = Duration::from_secs(5);

    pub(crate) fn new(length: Duration) -> Self {
        Self {
            length,
            remaining: Rc::new(Cell::new(None)),
        }
    }

    /// Time left, or `None` when not showing.
    pub(crate) fn remaining(&self) -> Option<Duration> {
        self.remaining.get().filter(|d| !d.is_zero())
    }
}

impl Advertisement for CountdownAdvertisement {
    fn start(&mut self) {
        tracing::info!(length = ?self.length, "advertisement started");
        self.remaining.set(Some(self.length));
    }

    fn advance(&mut self, elapsed: Duration) {
        if let Some(left) = self.remaining.get() {
            self.remaining.set(Some(left.saturating_sub(elapsed)));
        }
    }

    fn is_finished(&self) -> bool {
        self.remaining.get().is_some_and(|d| d.is_zero())
    }
}
