use crossterm::event::{KeyCode, KeyEvent};
use dropris_leaderboard::{LeaderboardStore as _, ScoreRecord, TOP_N, top_scores};
use dropris_runtime::{Runtime, Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    text::Line,
    widgets::Block,
};

use super::GameScreen;
use crate::{
    command::play::PlaySettings,
    view::widgets::{KeyBinding, KeyBindingDisplay, LeaderboardDisplay, style},
};

const KEY_BINDINGS: &[KeyBinding] = &[(&["Enter", "r"], "play again"), (&["q"], "quit")];

/// Top scores, shown between games.
#[derive(Debug)]
pub(crate) struct LeaderboardScreen {
    settings: PlaySettings,
    records: Vec<ScoreRecord>,
    saved: Option<ScoreRecord>,
    status: Option<String>,
}

impl LeaderboardScreen {
    pub(crate) fn new(settings: PlaySettings) -> Self {
        Self {
            settings,
            records: vec![],
            saved: None,
            status: None,
        }
    }

    /// Marks the record just saved so it can be highlighted.
    pub(crate) fn saved(self, saved: Option<ScoreRecord>) -> Self {
        Self { saved, ..self }
    }

    pub(crate) fn status(self, status: Option<String>) -> Self {
        Self { status, ..self }
    }

    /// Rank of the record just saved, if it made the table.
    ///
    /// Equal records keep insertion order, so the newest is the last match.
    fn saved_rank(&self) -> Option<usize> {
        let saved = self.saved.as_ref()?;
        top_scores(&self.records, TOP_N)
            .iter()
            .rfind(|entry| entry.record == saved)
            .map(|entry| entry.rank)
    }
}

impl Screen for LeaderboardScreen {
    fn on_active(&mut self, _runtime: &mut Runtime) {
        self.records = self.settings.store.load_all();
        tracing::debug!(count = self.records.len(), "leaderboard loaded");
    }

    fn handle_key(&mut self, _runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Enter | KeyCode::Char('r') => {
                ScreenTransition::Replace(Box::new(GameScreen::new(self.settings.clone())))
            }
            KeyCode::Char('q') | KeyCode::Esc => ScreenTransition::Exit,
            _ => ScreenTransition::Stay,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let ranked = top_scores(&self.records, TOP_N);
        let table = LeaderboardDisplay::new(&ranked)
            .highlight(self.saved_rank())
            .block(
                Block::bordered()
                    .title(Line::from(" HIGH SCORES ").centered())
                    .style(style::DEFAULT),
            );

        let [table_area, status_area, help_area] = Layout::vertical([
            Constraint::Length(table.height()),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let table_area = table_area.centered_horizontally(Constraint::Length(table.width()));

        frame.render_widget(table, table_area);
        if let Some(status) = &self.status {
            frame.render_widget(
                Line::styled(status.as_str(), style::GAME_OVER_POPUP).centered(),
                status_area,
            );
        }
        frame.render_widget(KeyBindingDisplay::new(KEY_BINDINGS), help_area);
    }
}
