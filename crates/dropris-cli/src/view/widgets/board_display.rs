use std::iter;

use dropris_engine::{BOARD_HEIGHT, BOARD_WIDTH, Board, Piece};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::{Block as BlockWidget, BlockExt as _, Widget},
};

use super::BlockDisplay;

type Grid = [[BlockDisplay; BOARD_WIDTH]; BOARD_HEIGHT];

#[derive(Debug)]
pub struct BoardDisplay<'a> {
    board: &'a Board,
    ghost: Option<Piece>,
    falling_piece: Option<&'a Piece>,
    flashing_rows: &'a [usize],
    flash_visible: bool,
    block: Option<BlockWidget<'a>>,
}

impl<'a> BoardDisplay<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            ghost: None,
            falling_piece: None,
            flashing_rows: &[],
            flash_visible: false,
            block: None,
        }
    }

    pub fn ghost(self, piece: Option<Piece>) -> Self {
        Self {
            ghost: piece,
            ..self
        }
    }

    pub fn falling_piece(self, piece: Option<&'a Piece>) -> Self {
        Self {
            falling_piece: piece,
            ..self
        }
    }

    /// Rows being cleared; painted solid while `visible`, blank otherwise.
    pub fn flashing_rows(self, rows: &'a [usize], visible: bool) -> Self {
        Self {
            flashing_rows: rows,
            flash_visible: visible,
            ..self
        }
    }

    pub fn block(self, block: BlockWidget<'a>) -> Self {
        Self {
            block: Some(block),
            ..self
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn width(&self) -> u16 {
        BOARD_WIDTH as u16 * BlockDisplay::WIDTH
            + super::block_horizontal_margin(self.block.as_ref())
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn height(&self) -> u16 {
        BOARD_HEIGHT as u16 * BlockDisplay::HEIGHT
            + super::block_vertical_margin(self.block.as_ref())
    }

    fn grid(&self) -> Grid {
        let mut grid = [[BlockDisplay::EMPTY; BOARD_WIDTH]; BOARD_HEIGHT];
        for (cells, row) in iter::zip(&mut grid, self.board.rows()) {
            for (cell, block) in iter::zip(cells, row.cells()) {
                *cell = BlockDisplay::from_block(*block, true);
            }
        }
        for &y in self.flashing_rows {
            if let Some(cells) = grid.get_mut(y) {
                let display = if self.flash_visible {
                    BlockDisplay::FLASH
                } else {
                    BlockDisplay::EMPTY
                };
                cells.fill(display);
            }
        }

        let mut paint = |piece: &Piece, display: BlockDisplay, only_empty: bool| {
            for (x, y) in piece.cells() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                let Some(board_block) = self.board.block_at(x, y) else {
                    continue;
                };
                if !only_empty || board_block.is_empty() {
                    grid[y][x] = display;
                }
            }
        };
        if let Some(ghost) = &self.ghost {
            paint(ghost, BlockDisplay::GHOST, true);
        }
        if let Some(piece) = self.falling_piece {
            paint(piece, BlockDisplay::piece(piece.kind()), false);
        }
        grid
    }
}

impl Widget for BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Widget::render(&self, area, buf);
    }
}

impl Widget for &BoardDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.block.as_ref().render(area, buf);
        let area = self.block.inner_if_some(area);

        let horizontal =
            Layout::horizontal([Constraint::Length(BlockDisplay::WIDTH); BOARD_WIDTH])
                .flex(Flex::Center);
        let vertical = Layout::vertical([Constraint::Length(BlockDisplay::HEIGHT); BOARD_HEIGHT]);
        let grid_cells = area
            .layout::<BOARD_HEIGHT>(&vertical)
            .into_iter()
            .map(|row| row.layout::<BOARD_WIDTH>(&horizontal));

        for (grid_row, row) in iter::zip(grid_cells, self.grid()) {
            for (grid_cell, display) in iter::zip(grid_row, row) {
                display.render(grid_cell, buf);
            }
        }
    }
}
