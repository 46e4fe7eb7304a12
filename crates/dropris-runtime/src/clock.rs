use std::time::{Duration, Instant};

/// Measures the time between consecutive frames.
///
/// A single lap is capped at [`FrameClock::MAX_STEP`] so that a suspended
/// terminal does not hand the game a multi-second frame on resume.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub const MAX_STEP: Duration = Duration::from_millis(250);

    #[must_use]
    pub fn starting_at(now: Instant) -> Self {
        Self { last: now }
    }

    /// Time since the previous lap (or since creation), then restarts.
    pub fn lap(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.last);
        self.last = now;
        elapsed.min(Self::MAX_STEP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lap_measures_since_previous() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.lap(start + Duration::from_millis(16)), Duration::from_millis(16));
        assert_eq!(clock.lap(start + Duration::from_millis(50)), Duration::from_millis(34));
    }

    #[test]
    fn test_lap_is_capped() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start);
        assert_eq!(clock.lap(start + Duration::from_secs(30)), FrameClock::MAX_STEP);
    }

    #[test]
    fn test_lap_never_negative() {
        let start = Instant::now();
        let mut clock = FrameClock::starting_at(start + Duration::from_millis(10));
        assert_eq!(clock.lap(start), Duration::ZERO);
    }
}
