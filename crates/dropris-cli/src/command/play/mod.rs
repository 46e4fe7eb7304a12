use std::{path::Path, time::Duration};

use anyhow::Context as _;
use dropris_engine::{GameSession, Level, PieceSeed, SessionConfig};
use dropris_leaderboard::JsonFileStore;
use dropris_runtime::{Runtime, ScreenStack};

use self::screens::GameScreen;
use crate::collaborator::{CountdownAdvertisement, TerminalBell};

mod screens;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Start level, 1 (slowest) to 10; other values start at 1
    #[clap(long, env = "DROPRIS_LEVEL")]
    level: Option<u8>,
    /// Enable the F1 (four-row clear) and F2 (milestone) shortcuts
    #[clap(long, env = "DROPRIS_DEBUG")]
    debug: bool,
    /// Name proposed when saving a score
    #[clap(long)]
    name: Option<String>,
    /// Ring the terminal bell on line clears and game over
    #[clap(long)]
    bell: bool,
    /// Seed of the piece randomizer, as 32 hex digits
    #[clap(long)]
    seed: Option<PieceSeed>,
    /// Length of the game over advertisement, in seconds
    #[clap(long, default_value_t = CountdownAdvertisement::DEFAULT_LENGTH.as_secs())]
    ad_seconds: u64,
}

/// Everything needed to start a game; kept to start the next one.
#[derive(Debug, Clone)]
pub(crate) struct PlaySettings {
    config: SessionConfig,
    bell: bool,
    ad_length: Duration,
    player_name: String,
    store: JsonFileStore,
}

impl PlaySettings {
    fn new(arg: &PlayArg, leaderboard_file: &Path) -> Self {
        let level = Level::from_requested(arg.level);
        if let Some(requested) = arg.level
            && requested != level.get()
        {
            tracing::warn!(requested, used = level.get(), "start level out of range");
        }
        Self {
            config: SessionConfig {
                level,
                debug: arg.debug,
                seed: arg.seed,
            },
            bell: arg.bell,
            ad_length: Duration::from_secs(arg.ad_seconds),
            player_name: arg.name.clone().unwrap_or_default(),
            store: JsonFileStore::new(leaderboard_file),
        }
    }

    /// A fresh session wired to this front end's collaborators, along with a
    /// handle to its advertisement countdown.
    fn start_session(&self) -> (GameSession, CountdownAdvertisement) {
        let advertisement = CountdownAdvertisement::new(self.ad_length);
        let mut session =
            GameSession::new(self.config).with_advertisement(Box::new(advertisement.clone()));
        if self.bell {
            session = session.with_audio(Box::new(TerminalBell::stdout()));
        }
        (session, advertisement)
    }
}

pub(crate) fn run(arg: &PlayArg, leaderboard_file: &Path) -> anyhow::Result<()> {
    let settings = PlaySettings::new(arg, leaderboard_file);
    if let Some(seed) = settings.config.seed {
        tracing::info!(%seed, "using fixed piece seed");
    }
    let mut app = ScreenStack::new(Box::new(GameScreen::new(settings)));
    Runtime::new()
        .run(&mut app)
        .context("Terminal UI failed")?;
    Ok(())
}
