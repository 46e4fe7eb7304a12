use std::{
    io::{self, Write as _},
    path::Path,
};

use anyhow::Context as _;
use dropris_leaderboard::{JsonFileStore, LeaderboardStore as _, TOP_N, top_scores};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LeaderboardArg {
    /// Remove every saved score instead of printing them
    #[clap(long)]
    clear: bool,
    /// Number of entries to print
    #[clap(long, default_value_t = TOP_N)]
    top: usize,
}

pub(crate) fn run(arg: &LeaderboardArg, leaderboard_file: &Path) -> anyhow::Result<()> {
    let mut store = JsonFileStore::new(leaderboard_file);
    if arg.clear {
        store
            .clear()
            .with_context(|| format!("Failed to clear {}", leaderboard_file.display()))?;
        println!("Leaderboard cleared: {}", leaderboard_file.display());
        return Ok(());
    }

    let records = store.load_all();
    let ranked = top_scores(&records, arg.top);
    let mut out = io::stdout().lock();
    if ranked.is_empty() {
        writeln!(out, "No scores yet.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:>4}  {:<16}  {:>8}  {:>5}  {:>5}  {:<10}",
        "#", "NAME", "SCORE", "LINES", "LEVEL", "DATE"
    )?;
    for entry in ranked {
        let record = entry.record;
        writeln!(
            out,
            "{:>4}  {:<16}  {:>8}  {:>5}  {:>5}  {:<10}",
            entry.rank, record.name, record.score, record.lines, record.level, record.date
        )?;
    }
    Ok(())
}
