use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dropris_engine::GameSummary;
use dropris_leaderboard::{LeaderboardStore as _, ScoreRecord};
use dropris_runtime::{Runtime, Screen, ScreenTransition};
use ratatui::{
    Frame,
    layout::Constraint,
    text::{Line, Span},
    widgets::{Block, Clear, Paragraph},
};

use super::LeaderboardScreen;
use crate::{command::play::PlaySettings, view::widgets::style};

const MAX_NAME_LEN: usize = 16;

/// Asks for the player's name after a game and saves the score.
#[derive(Debug)]
pub(crate) struct NameEntryScreen {
    settings: PlaySettings,
    summary: GameSummary,
    name: String,
}

impl NameEntryScreen {
    pub(crate) fn new(settings: PlaySettings, summary: GameSummary) -> Self {
        let name = settings.player_name.chars().take(MAX_NAME_LEN).collect();
        Self {
            settings,
            summary,
            name,
        }
    }

    fn save(&mut self) -> ScreenTransition {
        let record =
            ScoreRecord::from_summary(&self.name, &self.summary, Local::now().date_naive());
        let status = match self.settings.store.append(record.clone()) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!(error = %e, "failed to save score");
                Some(format!("Score not saved: {e}"))
            }
        };
        // Later games in this run propose the same name.
        self.settings.player_name.clone_from(&record.name);
        let screen = LeaderboardScreen::new(self.settings.clone())
            .saved(status.is_none().then_some(record))
            .status(status);
        ScreenTransition::Replace(Box::new(screen))
    }
}

impl Screen for NameEntryScreen {
    fn handle_key(&mut self, _runtime: &mut Runtime, key: KeyEvent) -> ScreenTransition {
        match key.code {
            KeyCode::Enter => return self.save(),
            KeyCode::Esc => {
                tracing::info!(score = self.summary.score, "score not recorded");
                return ScreenTransition::Replace(Box::new(LeaderboardScreen::new(
                    self.settings.clone(),
                )));
            }
            KeyCode::Backspace => _ = self.name.pop(),
            KeyCode::Char(c)
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && self.name.chars().count() < MAX_NAME_LEN =>
            {
                self.name.push(c);
            }
            _ => {}
        }
        ScreenTransition::Stay
    }

    fn draw(&self, frame: &mut Frame) {
        let area = frame
            .area()
            .centered(Constraint::Length(36), Constraint::Length(9));
        let block = Block::bordered()
            .title(Line::from(" GAME OVER ").centered())
            .style(style::DEFAULT);
        let text = vec![
            Line::from(format!("SCORE {}", self.summary.score)),
            Line::from(format!(
                "LINES {}   LEVEL {}",
                self.summary.lines, self.summary.level
            )),
            Line::from(""),
            Line::from(vec![
                Span::raw("NAME: "),
                Span::styled(format!("{}_", self.name), style::BANNER),
            ]),
            Line::from(""),
            Line::styled("Enter: save   Esc: skip", style::DIM),
        ];
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(text).centered().block(block), area);
    }
}
