use crate::{ActionError, GameSession};

/// Player input understood by [`GameSession::apply_action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum GameAction {
    #[display("move left")]
    MoveLeft,
    #[display("move right")]
    MoveRight,
    #[display("rotate")]
    Rotate,
    #[display("soft drop")]
    SoftDrop,
    #[display("hard drop")]
    HardDrop,
    #[display("hold")]
    Hold,
    #[display("pause")]
    TogglePause,
    #[display("mute")]
    ToggleMute,
    #[display("sacrifice rows")]
    SacrificeRows,
    #[display("restart")]
    Restart,
    #[display("force tetris")]
    DebugForceTetris,
    #[display("force milestone")]
    DebugForceMilestone,
}

impl GameSession {
    /// Dispatches a player action.
    ///
    /// Rejected actions leave the session untouched; the error says why.
    pub fn apply_action(&mut self, action: GameAction) -> Result<(), ActionError> {
        match action {
            GameAction::MoveLeft => self.try_move_left(),
            GameAction::MoveRight => self.try_move_right(),
            GameAction::Rotate => self.try_rotate(),
            GameAction::SoftDrop => self.try_soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Hold => self.try_hold(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::ToggleMute => {
                self.toggle_mute();
                Ok(())
            }
            GameAction::SacrificeRows => self.sacrifice_bottom_rows(),
            GameAction::Restart => {
                self.restart();
                Ok(())
            }
            GameAction::DebugForceTetris => self.debug_force_tetris(),
            GameAction::DebugForceMilestone => self.debug_force_milestone(),
        }
    }
}
