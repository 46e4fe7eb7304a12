use std::path::PathBuf;

use clap::{Parser, Subcommand};

use self::{leaderboard::LeaderboardArg, play::PlayArg};

mod leaderboard;
mod play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None, args_conflicts_with_subcommands = true)]
pub struct CommandArgs {
    /// What to do; plays a game when omitted
    #[command(subcommand)]
    mode: Option<Mode>,
    #[clap(flatten)]
    play: PlayArg,
    /// JSON file holding the high scores
    #[clap(
        long,
        global = true,
        env = "DROPRIS_LEADERBOARD",
        default_value = "./data/leaderboard.json"
    )]
    leaderboard_file: PathBuf,
    /// File receiving the log output (filtered by RUST_LOG, default "info")
    #[clap(long, global = true, default_value = "./data/dropris.log")]
    log_file: PathBuf,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play a game in the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Print the top scores
    Leaderboard(#[clap(flatten)] LeaderboardArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    crate::logging::init(&args.log_file)?;
    match args.mode.unwrap_or(Mode::Play(args.play)) {
        Mode::Play(arg) => play::run(&arg, &args.leaderboard_file)?,
        Mode::Leaderboard(arg) => leaderboard::run(&arg, &args.leaderboard_file)?,
    }
    Ok(())
}
