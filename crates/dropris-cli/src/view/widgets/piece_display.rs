use dropris_engine::PieceKind;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

/// A piece preview in a 4×2 cell box; the I piece is the widest at 4×1.
#[derive(Debug)]
pub struct PieceDisplay<'a> {
    piece: Option<PieceKind>,
    block: Option<BlockWidget<'a>>,
}

impl<'a> PieceDisplay<'a> {
    pub const CELLS_WIDE: u16 = 4;
    pub const CELLS_HIGH: u16 = 2;

    pub fn new(piece: Option<PieceKind>) -> Self {
        Self { piece, block: None }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    pub fn width(&self) -> u16 {
        Self::CELLS_WIDE * BlockDisplay::WIDTH + super::block_horizontal_margin(self.block.as_ref())
    }

    pub fn height(&self) -> u16 {
        Self::CELLS_HIGH * BlockDisplay::HEIGHT + super::block_vertical_margin(self.block.as_ref())
    }
}

impl Widget for PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &PieceDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);
        BlockDisplay::EMPTY.render(area, buf);

        let Some(kind) = self.piece else {
            return;
        };
        let shape = kind.shape();
        let (Ok(cols), Ok(rows)) = (u16::try_from(shape.width()), u16::try_from(shape.height()))
        else {
            return;
        };
        let piece_area = area.centered(
            Constraint::Length(cols * BlockDisplay::WIDTH),
            Constraint::Length(rows * BlockDisplay::HEIGHT),
        );

        let horizontal = Layout::horizontal((0..cols).map(|_| Constraint::Length(BlockDisplay::WIDTH)))
            .flex(Flex::Center);
        let vertical = Layout::vertical((0..rows).map(|_| Constraint::Length(BlockDisplay::HEIGHT)));
        let filled = BlockDisplay::piece(kind);
        for (y, grid_row) in piece_area.layout_vec(&vertical).into_iter().enumerate() {
            for (x, grid_cell) in grid_row.layout_vec(&horizontal).into_iter().enumerate() {
                if shape.is_filled((x, y)) {
                    Widget::render(&filled, grid_cell, buf);
                }
            }
        }
    }
}
