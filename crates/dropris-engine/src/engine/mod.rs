//! Game rules on top of the core data structures.
//!
//! - [`GameSession`] - frame-driven state machine (falling, paused, line clearing, game over)
//! - [`PieceQueue`] - 7-bag randomizer and hold slot
//! - [`GameStats`] / [`Level`] - scoring and gravity
//! - [`LineClearPhase`] - flash animation before cleared rows disappear
//! - [`AudioSink`] / [`Advertisement`] - optional collaborators
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use dropris_engine::{GameAction, GameSession, SessionConfig};
//!
//! let mut session = GameSession::new(SessionConfig::default());
//! _ = session.apply_action(GameAction::MoveLeft);
//! _ = session.apply_action(GameAction::HardDrop);
//! session.update(Duration::from_millis(16));
//!
//! for event in session.drain_events() {
//!     println!("{event:?}");
//! }
//! ```

pub use self::{
    action::*, collaborator::*, event::*, game_stats::*, line_clear::*, piece_queue::*,
    session::*,
};

mod action;
mod collaborator;
mod event;
mod game_stats;
mod line_clear;
mod piece_queue;
mod session;
