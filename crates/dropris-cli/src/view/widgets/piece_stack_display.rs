use std::iter;

use dropris_engine::PieceKind;
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::{BlockDisplay, PieceDisplay};

/// Upcoming pieces stacked top to bottom, one blank row between previews.
#[derive(Debug)]
pub struct PieceStackDisplay<'a> {
    pieces: Vec<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceStackDisplay<'a> {
    pub fn new<I>(pieces: I) -> Self
    where
        I: IntoIterator<Item = PieceKind>,
    {
        Self {
            pieces: pieces.into_iter().collect(),
            block: None,
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        PieceDisplay::CELLS_WIDE * BlockDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        let count = u16::try_from(self.pieces.len()).unwrap_or(u16::MAX);
        PieceDisplay::CELLS_HIGH * BlockDisplay::HEIGHT * count
            + count.saturating_sub(1)
            + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceStackDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceStackDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        let layout = Layout::vertical(self.pieces.iter().map(|_| {
            Constraint::Length(PieceDisplay::CELLS_HIGH * BlockDisplay::HEIGHT)
        }))
        .flex(Flex::SpaceBetween);

        for (cell, piece) in iter::zip(area.layout_vec(&layout), &self.pieces) {
            PieceDisplay::new(Some(*piece)).render(cell, buf);
        }
    }
}
