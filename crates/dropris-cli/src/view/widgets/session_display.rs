use std::time::Duration;

use dropris_engine::{GameSession, SessionState};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    text::Line,
    widgets::{Block, Padding, Widget},
};

use super::{
    BoardDisplay, PieceDisplay, PieceStackDisplay, PopupDisplay, RocketDisplay,
    SessionStatsDisplay, color, style,
};

/// Board, hold slot, next queue and stats of a running session, plus any
/// overlay the session's state calls for.
#[derive(Debug)]
pub struct SessionDisplay<'a> {
    session: &'a GameSession,
    next_pieces: usize,
    banner: Option<&'a str>,
    rocket: Option<(Duration, Duration)>,
    advertisement_remaining: Option<Duration>,
}

impl<'a> SessionDisplay<'a> {
    pub const NEXT_PIECES: usize = 5;

    pub fn new(session: &'a GameSession) -> Self {
        Self {
            session,
            next_pieces: Self::NEXT_PIECES,
            banner: None,
            rocket: None,
            advertisement_remaining: None,
        }
    }

    /// Short announcement shown across the top of the board.
    pub fn banner(self, banner: Option<&'a str>) -> Self {
        Self { banner, ..self }
    }

    /// Milestone rocket, as `(elapsed, duration)` of its flight.
    pub fn rocket(self, rocket: Option<(Duration, Duration)>) -> Self {
        Self { rocket, ..self }
    }

    pub fn advertisement_remaining(self, remaining: Option<Duration>) -> Self {
        Self {
            advertisement_remaining: remaining,
            ..self
        }
    }

    fn popup(&self) -> Option<PopupDisplay<'static>> {
        let session = self.session;
        match session.session_state() {
            SessionState::Falling | SessionState::LineClearing => None,
            SessionState::Paused => Some(PopupDisplay::new(["PAUSED"], style::PAUSED_POPUP)),
            SessionState::GameOver if session.is_awaiting_advertisement() => {
                let secs = self
                    .advertisement_remaining
                    .map_or(0, |d| d.as_millis().div_ceil(1000));
                Some(PopupDisplay::new(
                    [
                        "ADVERTISEMENT".to_owned(),
                        "a word from our sponsor".to_owned(),
                        format!("score in {secs}s"),
                    ],
                    style::ADVERTISEMENT_POPUP,
                ))
            }
            SessionState::GameOver => Some(PopupDisplay::new(
                [
                    "GAME OVER!!".to_owned(),
                    format!("SCORE {}", session.stats().score()),
                    "Enter: save score".to_owned(),
                ],
                style::GAME_OVER_POPUP,
            )),
        }
    }
}

impl Widget for SessionDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = self.session;
        let block_padding = Padding::symmetric(1, 0);
        let border_style = match session.session_state() {
            SessionState::Falling => color::WHITE,
            SessionState::LineClearing => color::MINT,
            SessionState::Paused => color::YELLOW,
            SessionState::GameOver => color::RED,
        };
        let panel = |title: &'static str| {
            Block::bordered()
                .title(Line::from(title).centered())
                .padding(block_padding)
                .border_style(border_style)
                .style(style::DEFAULT)
        };

        let game_board = BoardDisplay::new(session.board())
            .falling_piece(session.falling_piece())
            .ghost(session.ghost_piece())
            .flashing_rows(session.flashing_rows(), session.flashing_rows_visible())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let hold_title = if session.can_hold() { "HOLD" } else { "HOLD (used)" };
        let hold_panel = PieceDisplay::new(session.held_piece()).block(panel(hold_title));
        let piece_stack =
            PieceStackDisplay::new(session.next_pieces(self.next_pieces)).block(panel("NEXT"));
        let session_stats = SessionStatsDisplay::new(session).block(panel("STATS"));

        let [left_column, center_column, right_column] = Layout::horizontal([
            Constraint::Length(u16::max(hold_panel.width(), session_stats.width())),
            Constraint::Length(game_board.width()),
            Constraint::Length(piece_stack.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);

        let [hold_area, stats_area] = Layout::vertical([
            Constraint::Length(hold_panel.height()),
            Constraint::Length(session_stats.height()),
        ])
        .spacing(1)
        .areas(left_column);
        let hold_area = hold_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(hold_panel.width())]).flex(Flex::End),
        )[0];
        let stats_area = stats_area.layout::<1>(
            &Layout::horizontal([Constraint::Length(session_stats.width())]).flex(Flex::End),
        )[0];
        let [board_area] =
            Layout::vertical([Constraint::Length(game_board.height())]).areas(center_column);
        let [piece_stack_area] =
            Layout::vertical([Constraint::Length(piece_stack.height())]).areas(right_column);

        hold_panel.render(hold_area, buf);
        session_stats.render(stats_area, buf);
        piece_stack.render(piece_stack_area, buf);
        let board_inner = Block::bordered().inner(board_area);
        game_board.render(board_area, buf);

        if let Some((elapsed, duration)) = self.rocket {
            RocketDisplay::new(elapsed, duration).render(board_inner, buf);
        }
        if let Some(banner) = self.banner {
            let banner_area = Rect::new(board_inner.x, board_inner.y + 1, board_inner.width, 1);
            Line::styled(banner, style::BANNER)
                .centered()
                .render(banner_area, buf);
        }
        if let Some(popup) = self.popup() {
            popup.render(board_inner, buf);
        }
    }
}
