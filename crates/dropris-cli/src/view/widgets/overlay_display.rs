use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block as BlockWidget, Clear, Widget},
};

use super::color;

/// A solid box of centered text drawn over whatever is below it.
#[derive(Debug)]
pub struct PopupDisplay<'a> {
    lines: Vec<Line<'a>>,
    style: Style,
}

impl<'a> PopupDisplay<'a> {
    pub fn new<I, L>(lines: I, style: Style) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line<'a>>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            style,
        }
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX) + 2
    }
}

impl Widget for PopupDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered_vertically(Constraint::Length(self.height()));
        let block = BlockWidget::new().style(self.style);
        let inner = block.inner(area);
        let text_height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        Clear.render(area, buf);
        block.render(area, buf);
        Text::from(self.lines)
            .style(self.style)
            .centered()
            .render(inner.centered_vertically(Constraint::Length(text_height)), buf);
    }
}

const ROCKET: [&str; 6] = [r"  /\  ", r" /  \ ", r" |DR| ", r" |  | ", r"/|__|\", r" ^^^^ "];

/// Rocket flying from the bottom of the area to above its top edge.
///
/// `elapsed` out of `duration` sets how far it has climbed.
#[derive(Debug)]
pub struct RocketDisplay {
    elapsed: Duration,
    duration: Duration,
}

impl RocketDisplay {
    pub fn new(elapsed: Duration, duration: Duration) -> Self {
        Self { elapsed, duration }
    }

    fn climbed(&self, travel: u16) -> u16 {
        let total = self.duration.as_millis().max(1);
        let done = self.elapsed.as_millis().min(total);
        u16::try_from(u128::from(travel) * done / total).unwrap_or(travel)
    }
}

impl Widget for RocketDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rocket_height = u16::try_from(ROCKET.len()).unwrap_or(u16::MAX);
        let climbed = self.climbed(area.height + rocket_height);
        let body = Style::new().fg(color::ORANGE);
        let flame = Style::new().fg(color::YELLOW);
        let x_area = area.centered_horizontally(Constraint::Length(6));

        for (line, dy) in ROCKET.iter().zip(0u16..) {
            // Row of this line, counted from the area's top; negative rows are off screen.
            let row = i32::from(area.height) + i32::from(dy) - i32::from(climbed);
            let Ok(row) = u16::try_from(row) else {
                continue;
            };
            if row >= area.height {
                continue;
            }
            let line_style = if usize::from(dy) == ROCKET.len() - 1 {
                flame
            } else {
                body
            };
            let line_area = Rect::new(x_area.x, area.y + row, x_area.width, 1);
            Line::styled(*line, line_style).render(line_area, buf);
        }
    }
}
