use arrayvec::ArrayVec;
use super::board::{BOARD_WIDTH, Block, Board};

/// Kind of a tetromino.
///
/// The discriminant order is the order in which the kinds are listed in a
/// fresh bag before it is shuffled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// T-piece.
    T = 1,
    /// L-piece.
    L = 2,
    /// J-piece.
    J = 3,
    /// Z-piece.
    Z = 4,
    /// S-piece.
    S = 5,
    /// O-piece.
    O = 6,
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    /// All kinds, in bag order.
    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
    ];

    /// Returns the spawn-orientation shape of this kind.
    #[must_use]
    pub fn shape(self) -> Shape {
        Shape::base(self)
    }
}

/// Cell matrix of a piece, tightly bounded.
///
/// Rows are stored top to bottom. The I-piece spawns as a 1×4 matrix, the
/// O-piece as 2×2 and every other kind as 2×3. Filled cells carry the piece
/// kind so a locked cell remembers which color to draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    kind: PieceKind,
    rows: ArrayVec<ArrayVec<Block, 4>, 4>,
}

impl Shape {
    fn base(kind: PieceKind) -> Self {
        const F: bool = true;
        const E: bool = false;
        let pattern: &[&[bool]] = match kind {
            PieceKind::I => &[&[F, F, F, F]],
            PieceKind::T => &[&[E, F, E], &[F, F, F]],
            PieceKind::L => &[&[F, E, E], &[F, F, F]],
            PieceKind::J => &[&[E, E, F], &[F, F, F]],
            PieceKind::Z => &[&[F, F, E], &[E, F, F]],
            PieceKind::S => &[&[E, F, F], &[F, F, E]],
            PieceKind::O => &[&[F, F], &[F, F]],
        };
        let rows = pattern
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&filled| {
                        if filled {
                            Block::Piece(kind)
                        } else {
                            Block::Empty
                        }
                    })
                    .collect()
            })
            .collect();
        Self { kind, rows }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Number of columns of the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, ArrayVec::len)
    }

    /// Number of rows of the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Block]> {
        self.rows.iter().map(ArrayVec::as_slice)
    }

    #[must_use]
    pub fn is_filled(&self, (dx, dy): (usize, usize)) -> bool {
        self.rows
            .get(dy)
            .and_then(|row| row.get(dx))
            .is_some_and(|block| !block.is_empty())
    }

    /// Offsets `(dx, dy)` of the filled cells relative to the top-left corner.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.rows.iter().zip(0..).flat_map(|(row, dy)| {
            row.iter()
                .zip(0..)
                .filter(|(block, _)| !block.is_empty())
                .map(move |(_, dx)| (dx, dy))
        })
    }

    /// Rotates the matrix 90° clockwise.
    ///
    /// `result[i][j] = self[height - 1 - j][i]`, i.e. transpose and then
    /// reverse every new row. Four rotations give back the original matrix.
    ///
    /// ```
    /// use dropris_engine::PieceKind;
    ///
    /// let t = PieceKind::T.shape();
    /// let turned = t.rotated_cw();
    /// assert_eq!((turned.width(), turned.height()), (2, 3));
    /// assert_eq!(turned.rotated_cw().rotated_cw().rotated_cw(), t);
    /// ```
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        let height = self.height();
        let rows = (0..self.width())
            .map(|i| (0..height).map(|j| self.rows[height - 1 - j][i]).collect())
            .collect();
        Self {
            kind: self.kind,
            rows,
        }
    }
}

/// The falling piece: a shape anchored on the board.
///
/// `(x, y)` is the top-left corner of the shape's bounding box in board
/// coordinates. `y` may be negative while the piece enters from above the
/// visible area. Movement returns new values; the caller decides whether to
/// keep them after a collision check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    /// Column of the bounding box's left edge for a freshly spawned piece.
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const SPAWN_X: i32 = (BOARD_WIDTH / 2) as i32 - 1;
    /// Row of the bounding box's top edge for a freshly spawned piece.
    pub const SPAWN_Y: i32 = 0;

    /// Places a piece of the given kind in spawn orientation at the spawn anchor.
    #[must_use]
    pub fn spawn(kind: PieceKind) -> Self {
        Self::with_position(kind.shape(), Self::SPAWN_X, Self::SPAWN_Y)
    }

    #[must_use]
    pub fn with_position(shape: Shape, x: i32, y: i32) -> Self {
        Self { shape, x, y }
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.shape.kind()
    }

    #[must_use]
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    #[must_use]
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            shape: self.shape.clone(),
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    #[must_use]
    pub fn left(&self) -> Self {
        self.shifted(-1, 0)
    }

    #[must_use]
    pub fn right(&self) -> Self {
        self.shifted(1, 0)
    }

    #[must_use]
    pub fn down(&self) -> Self {
        self.shifted(0, 1)
    }

    /// Same anchor, shape turned 90° clockwise. No wall kicks are attempted.
    #[must_use]
    pub fn rotated_cw(&self) -> Self {
        Self {
            shape: self.shape.rotated_cw(),
            x: self.x,
            y: self.y,
        }
    }

    /// Lowest position reachable by moving straight down (the ghost).
    #[must_use]
    pub fn drop_position(&self, board: &Board) -> Self {
        let mut dropped = self.clone();
        loop {
            let next = dropped.down();
            if board.is_colliding(&next) {
                return dropped;
            }
            dropped = next;
        }
    }
}
