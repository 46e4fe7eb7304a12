use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event::{self, Event as CrosstermEvent};

use crate::FrameClock;

#[derive(Debug, Clone, derive_more::From)]
pub(super) enum TuiEvent {
    /// A frame elapsed; carries the time since the previous tick.
    Tick(Duration),
    /// The screen needs redrawing.
    Render,
    #[from]
    Crossterm(CrosstermEvent),
}

/// Interleaves frame ticks, redraws and terminal input.
///
/// A redraw is issued after every tick and every input event, but never
/// more than once between two of them.
#[derive(Debug)]
pub(super) struct EventLoop {
    frame_interval: Duration,
    clock: FrameClock,
    next_tick: Instant,
    dirty: bool,
}

impl EventLoop {
    pub(super) fn new(frame_interval: Duration) -> Self {
        let now = Instant::now();
        Self {
            frame_interval,
            clock: FrameClock::starting_at(now),
            next_tick: now,
            dirty: true,
        }
    }

    pub(super) fn set_frame_interval(&mut self, interval: Duration) {
        self.frame_interval = interval;
    }

    /// Blocks until the next event is due.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        loop {
            let now = Instant::now();
            if now >= self.next_tick {
                self.next_tick = now + self.frame_interval;
                self.dirty = true;
                return Ok(TuiEvent::Tick(self.clock.lap(now)));
            }
            if self.dirty {
                self.dirty = false;
                return Ok(TuiEvent::Render);
            }
            if event::poll(self.next_tick.saturating_duration_since(now))? {
                self.dirty = true;
                return Ok(event::read()?.into());
            }
        }
    }
}
