//! High-score persistence for finished games.
//!
//! A leaderboard is an append-only list of [`ScoreRecord`]s. Stores keep the
//! records in insertion order; ranking for display is done by [`top_scores`].

pub use self::{ranking::*, record::*, store::*};

mod ranking;
mod record;
mod store;
