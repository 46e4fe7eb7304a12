use dropris_engine::{Block, PieceKind};
use ratatui::{
    prelude::{Buffer, Rect},
    style::Style,
    widgets::{Paragraph, Widget},
};

use super::style;

/// One board cell, two terminal columns wide.
#[derive(Debug, Clone, Copy)]
pub struct BlockDisplay {
    style: Style,
    symbol: &'static str,
}

impl BlockDisplay {
    pub const WIDTH: u16 = 2;
    pub const HEIGHT: u16 = 1;

    pub const EMPTY: Self = Self::new(style::EMPTY, "");
    pub const EMPTY_DOT: Self = Self::new(style::EMPTY_DOT, ".");
    pub const GHOST: Self = Self::new(style::GHOST, "[]");
    pub const FLASH: Self = Self::new(style::FLASH, "");

    pub const fn new(style: Style, symbol: &'static str) -> Self {
        Self { style, symbol }
    }

    pub const fn piece(kind: PieceKind) -> Self {
        let style = match kind {
            PieceKind::I => style::I_BLOCK,
            PieceKind::T => style::T_BLOCK,
            PieceKind::L => style::L_BLOCK,
            PieceKind::J => style::J_BLOCK,
            PieceKind::Z => style::Z_BLOCK,
            PieceKind::S => style::S_BLOCK,
            PieceKind::O => style::O_BLOCK,
        };
        Self::new(style, "")
    }

    pub const fn from_block(block: Block, show_dots: bool) -> Self {
        match block {
            Block::Empty if show_dots => Self::EMPTY_DOT,
            Block::Empty => Self::EMPTY,
            Block::Piece(kind) => Self::piece(kind),
        }
    }
}

impl Widget for BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BlockDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // A Paragraph paints the whole area, not only the symbol's cells.
        Paragraph::new(self.symbol)
            .style(self.style)
            .centered()
            .render(area, buf);
    }
}
