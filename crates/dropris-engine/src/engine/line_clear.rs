use std::time::Duration;

/// Number of visibility toggles in a line-clear flash.
pub const FLASH_TOGGLES: u32 = 6;
/// Time between two visibility toggles.
pub const FLASH_INTERVAL: Duration = Duration::from_millis(100);

/// Flash animation of the rows completed by the last lock.
///
/// The rows stay on the board while the phase runs. The owner removes them
/// once [`LineClearPhase::advance`] reports completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClearPhase {
    rows: Vec<usize>,
    toggles: u32,
    elapsed: Duration,
}

impl LineClearPhase {
    #[must_use]
    pub fn new(rows: Vec<usize>) -> Self {
        Self {
            rows,
            toggles: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Rows being flashed, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Whether the flashing rows are currently drawn.
    ///
    /// Rows start visible and flip on every toggle.
    #[must_use]
    pub fn rows_visible(&self) -> bool {
        self.toggles % 2 == 0
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.toggles >= FLASH_TOGGLES
    }

    /// Advances the animation clock. Returns `true` once all toggles ran.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        self.elapsed += elapsed;
        while !self.is_finished() && self.elapsed >= FLASH_INTERVAL {
            self.elapsed -= FLASH_INTERVAL;
            self.toggles += 1;
        }
        self.is_finished()
    }

    #[must_use]
    pub fn into_rows(self) -> Vec<usize> {
        self.rows
    }
}
