//! Falling-block puzzle engine.
//!
//! - [`core`]: the playfield ([`Board`]) and pieces ([`Piece`], [`Shape`], [`PieceKind`])
//! - [`engine`]: piece randomizer, scoring, and the frame-driven [`GameSession`]
//!
//! The engine never sleeps or reads a clock. The front end calls
//! [`GameSession::update`] once per frame with the elapsed time, feeds player
//! input through [`GameSession::apply_action`], and draws from the session's
//! read accessors.

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece colliding when moving falling piece")]
pub struct PieceCollisionError;

/// Why a player action was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ActionError {
    #[display("no piece is falling")]
    NotFalling,
    #[display("game is not running")]
    NotPlaying,
    #[display("{_0}")]
    PieceCollision(PieceCollisionError),
    #[display("hold already used for this piece")]
    HoldAlreadyUsed,
    #[display("rows already sacrificed in this game")]
    SacrificeAlreadyUsed,
    #[display("debug actions are disabled")]
    DebugDisabled,
}
