use super::piece::{Piece, PieceKind, Shape};

/// Number of columns of the playfield.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows of the playfield.
pub const BOARD_HEIGHT: usize = 20;

/// A single cell of the board.
///
/// Locked cells remember the kind of the piece that filled them; the kind is
/// only used to pick a color when drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Block {
    #[default]
    Empty,
    Piece(PieceKind),
}

impl Block {
    #[must_use]
    pub fn is_empty(self) -> bool {
        self == Block::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Block; BOARD_WIDTH],
}

impl BoardRow {
    pub const EMPTY: Self = Self {
        cells: [Block::Empty; BOARD_WIDTH],
    };

    #[must_use]
    pub fn cells(&self) -> &[Block; BOARD_WIDTH] {
        &self.cells
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|b| !b.is_empty())
    }
}

/// The 20×10 playfield.
///
/// Row 0 is the top of the visible area. A falling piece may extend above
/// row 0 (negative rows); those cells never collide with the stack and are
/// discarded when the piece locks.
///
/// # Example
///
/// ```
/// use dropris_engine::{Board, Piece, PieceKind};
///
/// let mut board = Board::EMPTY;
/// let piece = Piece::spawn(PieceKind::I).drop_position(&board);
/// board.lock(&piece);
/// assert!(board.find_full_rows().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = BOARD_WIDTH;
    pub const HEIGHT: usize = BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    pub fn rows(&self) -> impl Iterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the cell at `(x, y)`, or `None` outside the playfield.
    #[must_use]
    pub fn block_at(&self, x: usize, y: usize) -> Option<Block> {
        self.rows.get(y).and_then(|row| row.cells.get(x)).copied()
    }

    /// Checks whether `shape` anchored at `(x, y)` overlaps a wall, the floor
    /// or a locked cell.
    ///
    /// Cells in negative rows are allowed unless `above_top_collides` is set,
    /// which is how a spawn that pokes out of the top is detected.
    #[must_use]
    pub fn collides_at(&self, shape: &Shape, x: i32, y: i32, above_top_collides: bool) -> bool {
        shape.filled_cells().any(|(dx, dy)| {
            let Ok(bx) = usize::try_from(x + dx) else {
                return true;
            };
            if bx >= BOARD_WIDTH {
                return true;
            }
            let Ok(by) = usize::try_from(y + dy) else {
                return above_top_collides;
            };
            by >= BOARD_HEIGHT || !self.rows[by].cells[bx].is_empty()
        })
    }

    /// Collision check used while a piece is moving.
    #[must_use]
    pub fn is_colliding(&self, piece: &Piece) -> bool {
        self.collides_at(piece.shape(), piece.x(), piece.y(), false)
    }

    /// Collision check used when a piece enters the board.
    #[must_use]
    pub fn is_spawn_blocked(&self, piece: &Piece) -> bool {
        self.collides_at(piece.shape(), piece.x(), piece.y(), true)
    }

    /// Writes every filled cell of `piece` into the board.
    ///
    /// Cells outside the playfield (only possible above the top) are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        let block = Block::Piece(piece.kind());
        for (x, y) in piece.cells() {
            if let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y))
                && let Some(cell) = self.rows.get_mut(y).and_then(|row| row.cells.get_mut(x))
            {
                *cell = block;
            }
        }
    }

    /// Indices of every full row, in ascending order.
    #[must_use]
    pub fn find_full_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(y, row)| row.is_full().then_some(y))
            .collect()
    }

    /// Removes the given rows, shifting everything above them down and
    /// inserting empty rows at the top.
    ///
    /// Indices outside the board and duplicates are ignored. Returns the
    /// number of rows actually removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut removed = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if rows.contains(&y) {
                removed += 1;
                continue;
            }
            if removed > 0 {
                self.rows[y + removed] = self.rows[y];
            }
        }
        self.rows[..removed].fill(BoardRow::EMPTY);
        removed
    }

    /// Removes the bottom `n` rows regardless of their contents.
    pub fn sacrifice_bottom_rows(&mut self, n: usize) -> usize {
        let n = n.min(BOARD_HEIGHT);
        let rows: Vec<usize> = (BOARD_HEIGHT - n..BOARD_HEIGHT).collect();
        self.clear_rows(&rows)
    }

    /// Fills row `y` completely with cells of `kind`.
    pub fn fill_row(&mut self, y: usize, kind: PieceKind) {
        if let Some(row) = self.rows.get_mut(y) {
            row.cells.fill(Block::Piece(kind));
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(|row| row.cells.iter().all(|b| b.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_from_ascii(lines: &[&str]) -> Board {
        assert!(lines.len() <= BOARD_HEIGHT);
        let mut board = Board::EMPTY;
        let offset = BOARD_HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                if ch == '#' {
                    board.rows[offset + i].cells[x] = Block::Piece(PieceKind::I);
                }
            }
        }
        board
    }

    fn occupied(board: &Board, y: usize) -> String {
        board.rows[y]
            .cells
            .iter()
            .map(|b| if b.is_empty() { '.' } else { '#' })
            .collect()
    }

    #[test]
    fn test_collision_with_walls_and_floor() {
        let board = Board::EMPTY;
        let o = PieceKind::O.shape();
        assert!(!board.collides_at(&o, 0, 0, false));
        assert!(board.collides_at(&o, -1, 0, false));
        assert!(!board.collides_at(&o, 8, 0, false));
        assert!(board.collides_at(&o, 9, 0, false));
        assert!(!board.collides_at(&o, 0, 18, false));
        assert!(board.collides_at(&o, 0, 19, false));
    }

    #[test]
    fn test_negative_rows_only_collide_when_flagged() {
        let board = Board::EMPTY;
        let o = PieceKind::O.shape();
        assert!(!board.collides_at(&o, 4, -1, false));
        assert!(board.collides_at(&o, 4, -1, true));
        assert!(!board.collides_at(&o, 4, 0, true));
    }

    #[test]
    fn test_collision_with_locked_cell() {
        let board = board_from_ascii(&["....#....."]);
        let i = PieceKind::I.shape();
        assert!(board.collides_at(&i, 1, 19, false));
        assert!(!board.collides_at(&i, 5, 19, false));
        assert!(!board.collides_at(&i, 1, 18, false));
    }

    #[test]
    fn test_lock_drops_cells_above_top() {
        let mut board = Board::EMPTY;
        let piece = Piece::with_position(PieceKind::O.shape(), 0, -1);
        board.lock(&piece);
        assert_eq!(occupied(&board, 0), "##........");
        assert_eq!(board.rows().filter(|r| !r.cells.iter().all(|b| b.is_empty())).count(), 1);
        assert_eq!(board.block_at(0, 0), Some(Block::Piece(PieceKind::O)));
    }

    #[test]
    fn test_find_full_rows_ascending() {
        let board = board_from_ascii(&[
            "##########",
            "#########.",
            "##########",
            "##########",
        ]);
        assert_eq!(board.find_full_rows(), vec![16, 18, 19]);
    }

    #[test]
    fn test_clear_rows_shifts_remaining_rows() {
        let mut board = board_from_ascii(&[
            "#.........",
            "##########",
            ".#........",
            "##########",
            "..#.......",
        ]);
        let full = board.find_full_rows();
        assert_eq!(board.clear_rows(&full), 2);
        assert_eq!(occupied(&board, 0), "..........");
        assert_eq!(occupied(&board, 1), "..........");
        assert_eq!(occupied(&board, 17), "#.........");
        assert_eq!(occupied(&board, 18), ".#........");
        assert_eq!(occupied(&board, 19), "..#.......");
        assert!(board.find_full_rows().is_empty());
    }

    #[test]
    fn test_clear_rows_ignores_duplicates_and_out_of_range() {
        let mut board = board_from_ascii(&["#.........", "##########"]);
        assert_eq!(board.clear_rows(&[19, 19, 42]), 1);
        assert_eq!(occupied(&board, 19), "#.........");
    }

    #[test]
    fn test_sacrifice_bottom_rows() {
        let mut board = Board::EMPTY;
        for y in 5..BOARD_HEIGHT {
            board.fill_row(y, PieceKind::S);
        }
        assert_eq!(board.sacrifice_bottom_rows(10), 10);
        assert_eq!(board.find_full_rows(), (15..BOARD_HEIGHT).collect::<Vec<_>>());
        assert_eq!(board.sacrifice_bottom_rows(100), BOARD_HEIGHT);
        assert!(board.is_empty());
    }

    #[test]
    fn test_o_piece_stops_at_right_wall() {
        let board = Board::EMPTY;
        let mut piece = Piece::spawn(PieceKind::O);
        loop {
            let next = piece.right();
            if board.is_colliding(&next) {
                break;
            }
            piece = next;
        }
        let width = i32::try_from(BOARD_WIDTH).unwrap();
        assert_eq!(piece.x(), width - 2);
    }
}
