use dropris_leaderboard::RankedRecord;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block as BlockWidget, Row, Table, Widget},
};

use super::{color, style};

/// High score table: rank, name, score, lines, level and date.
#[derive(Debug)]
pub struct LeaderboardDisplay<'a> {
    entries: &'a [RankedRecord<'a>],
    highlight: Option<usize>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> LeaderboardDisplay<'a> {
    const COLUMNS: [Constraint; 6] = [
        Constraint::Length(4),
        Constraint::Length(16),
        Constraint::Length(8),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(10),
    ];

    pub fn new(entries: &'a [RankedRecord<'a>]) -> Self {
        Self {
            entries,
            highlight: None,
            block: None,
        }
    }

    /// Emphasizes the entry with the given 1-based rank.
    pub fn highlight(self, rank: Option<usize>) -> Self {
        Self {
            highlight: rank,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        let columns: u16 = Self::COLUMNS
            .iter()
            .map(|c| match c {
                Constraint::Length(n) => *n,
                _ => 0,
            })
            .sum();
        let spacing = u16::try_from(Self::COLUMNS.len() - 1).unwrap_or(0);
        columns + spacing + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let rows = u16::try_from(self.entries.len().max(1)).unwrap_or(u16::MAX);
        rows + 1 + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for LeaderboardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let header = Row::new(["#", "NAME", "SCORE", "LINES", "LEVEL", "DATE"])
            .style(Style::new().fg(color::SKY).add_modifier(Modifier::BOLD));

        let rows = self.entries.iter().map(|entry| {
            let record = entry.record;
            let row_style = if Some(entry.rank) == self.highlight {
                style::BANNER
            } else {
                style::DEFAULT
            };
            Row::new([
                Line::from(entry.rank.to_string()).right_aligned(),
                Line::from(record.name.clone()),
                Line::from(record.score.to_string()).right_aligned(),
                Line::from(record.lines.to_string()).right_aligned(),
                Line::from(record.level.to_string()).right_aligned(),
                Line::from(record.date.clone()),
            ])
            .style(row_style)
        });

        let mut table = Table::new(rows, Self::COLUMNS)
            .header(header)
            .column_spacing(1)
            .style(style::DEFAULT);
        if let Some(block) = self.block {
            table = table.block(block);
        }
        if self.entries.is_empty() {
            table = table.footer(Row::new([Line::from(""), Line::styled("no scores yet", style::DIM)]));
        }
        table.render(area, buf);
    }
}
