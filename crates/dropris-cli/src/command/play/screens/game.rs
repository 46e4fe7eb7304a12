use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dropris_engine::{GameAction, GameSession, SessionEvent};
use dropris_runtime::{Runtime, Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
};

use super::NameEntryScreen;
use crate::{
    collaborator::CountdownAdvertisement,
    command::play::PlaySettings,
    view::widgets::{KeyBinding, KeyBindingDisplay, SessionDisplay},
};

const ROCKET_FLIGHT: Duration = Duration::from_secs(2);
const BANNER_TIME: Duration = Duration::from_millis(1500);

const KEY_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "move"),
    (&["↑", "x"], "rotate"),
    (&["↓"], "soft drop"),
    (&["Space"], "hard drop"),
    (&["c"], "hold"),
    (&["s"], "sacrifice"),
    (&["p"], "pause"),
    (&["m"], "mute"),
    (&["r"], "restart"),
    (&["q"], "quit"),
];

const DEBUG_KEY_BINDINGS: &[KeyBinding] = &[(&["F1"], "four-row clear"), (&["F2"], "milestone")];

/// What a key press on the game screen asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyCommand {
    Action(GameAction),
    SaveScore,
    Quit,
}

fn key_command(key: KeyEvent, debug: bool) -> Option<KeyCommand> {
    let command = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyCommand::Quit,
        KeyCode::Left => KeyCommand::Action(GameAction::MoveLeft),
        KeyCode::Right => KeyCommand::Action(GameAction::MoveRight),
        KeyCode::Up | KeyCode::Char('x') => KeyCommand::Action(GameAction::Rotate),
        KeyCode::Down => KeyCommand::Action(GameAction::SoftDrop),
        KeyCode::Char(' ') => KeyCommand::Action(GameAction::HardDrop),
        KeyCode::Char('c') => KeyCommand::Action(GameAction::Hold),
        KeyCode::Char('p') => KeyCommand::Action(GameAction::TogglePause),
        KeyCode::Char('m') => KeyCommand::Action(GameAction::ToggleMute),
        KeyCode::Char('s') => KeyCommand::Action(GameAction::SacrificeRows),
        KeyCode::Char('r') => KeyCommand::Action(GameAction::Restart),
        KeyCode::F(1) if debug => KeyCommand::Action(GameAction::DebugForceTetris),
        KeyCode::F(2) if debug => KeyCommand::Action(GameAction::DebugForceMilestone),
        KeyCode::Enter => KeyCommand::SaveScore,
        KeyCode::Char('q') | KeyCode::Esc => KeyCommand::Quit,
        _ => return None,
    };
    Some(command)
}

#[derive(Debug)]
struct Banner {
    text: String,
    remaining: Duration,
}

#[derive(Debug)]
pub(crate) struct GameScreen {
    settings: PlaySettings,
    session: GameSession,
    advertisement: CountdownAdvertisement,
    rocket: Option<Duration>,
    banner: Option<Banner>,
}

impl GameScreen {
    pub(crate) fn new(settings: PlaySettings) -> Self {
        let (session, advertisement) = settings.start_session();
        Self {
            settings,
            session,
            advertisement,
            rocket: None,
            banner: None,
        }
    }

    fn show_banner(&mut self, text: String) {
        self.banner = Some(Banner {
            text,
            remaining: BANNER_TIME,
        });
    }

    fn on_event(&mut self, event: SessionEvent) {
        tracing::debug!(?event, "session event");
        match event {
            SessionEvent::LinesCleared { points, kind, .. } => {
                self.show_banner(format!("{} +{points}", kind.to_string().to_uppercase()));
            }
            SessionEvent::MilestoneReached => self.rocket = Some(Duration::ZERO),
            SessionEvent::RowsSacrificed(rows) => {
                self.show_banner(format!("{rows} ROWS SACRIFICED"));
            }
            SessionEvent::Restarted => {
                self.rocket = None;
                self.banner = None;
            }
            SessionEvent::GameFinished(summary) => {
                tracing::info!(
                    score = summary.score,
                    lines = summary.lines,
                    level = summary.level,
                    "game finished"
                );
            }
            _ => {}
        }
    }

    fn advance_effects(&mut self, elapsed: Duration) {
        if let Some(flight) = &mut self.rocket {
            *flight += elapsed;
            if *flight >= ROCKET_FLIGHT {
                self.rocket = None;
            }
        }
        if let Some(banner) = &mut self.banner {
            banner.remaining = banner.remaining.saturating_sub(elapsed);
            if banner.remaining.is_zero() {
                self.banner = None;
            }
        }
    }
}

impl Screen for GameScreen {
    fn handle_key(&mut self, _runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition {
        let Some(command) = key_command(key, self.session.config().debug) else {
            return ScreenTransition::Stay;
        };
        match command {
            KeyCommand::Action(action) => {
                if let Err(e) = self.session.apply_action(action) {
                    tracing::trace!(%action, error = %e, "action rejected");
                }
                // Restart and similar actions emit events; handle them before the next draw.
                for event in self.session.drain_events() {
                    self.on_event(event);
                }
                ScreenTransition::Stay
            }
            KeyCommand::SaveScore => match self.session.game_summary() {
                Some(summary) => ScreenTransition::Replace(Box::new(NameEntryScreen::new(
                    self.settings.clone(),
                    summary,
                ))),
                None => ScreenTransition::Stay,
            },
            KeyCommand::Quit => ScreenTransition::Exit,
        }
    }

    fn update(&mut self, _runtime: &mut Runtime, elapsed: Duration) -> ScreenTransition {
        self.session.update(elapsed);
        for event in self.session.drain_events() {
            self.on_event(event);
        }
        self.advance_effects(elapsed);
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let session_display = SessionDisplay::new(&self.session)
            .banner(self.banner.as_ref().map(|b| b.text.as_str()))
            .rocket(self.rocket.map(|flight| (flight, ROCKET_FLIGHT)))
            .advertisement_remaining(self.advertisement.remaining());

        let [main_area, help_area] =
            Layout::vertical([Constraint::Length(22), Constraint::Length(2)])
                .flex(Flex::Center)
                .areas(frame.area());
        frame.render_widget(session_display, main_area);

        let bindings: Vec<KeyBinding> = if self.session.config().debug {
            KEY_BINDINGS.iter().chain(DEBUG_KEY_BINDINGS).copied().collect()
        } else {
            KEY_BINDINGS.to_vec()
        };
        frame.render_widget(KeyBindingDisplay::new(&bindings), help_area);
    }
}
