pub(crate) use self::{game::GameScreen, leaderboard::LeaderboardScreen, name_entry::NameEntryScreen};

mod game;
mod leaderboard;
mod name_entry;
