use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use super::{
    board::Board,
    piece::{PieceKind, PieceRotation, normalize},
};

/// A single tetromino found on an otherwise empty board.
///
/// `x` and `y` locate the top-left corner of the piece's tight bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    kind: PieceKind,
    rotation: PieceRotation,
    x: usize,
    y: usize,
}

impl PlacedPiece {
    /// Finds the one piece that makes up every occupied cell of `board`.
    ///
    /// Returns `None` when the board is empty, has any number of occupied
    /// cells other than four, or its four cells do not form a tetromino in
    /// any rotation (which includes disjoint fragments).
    ///
    /// # Example
    ///
    /// ```
    /// use ocrtris_engine::{Board, CellColor, PieceKind, PlacedPiece};
    ///
    /// let mut board = Board::EMPTY;
    /// for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
    ///     board.set_at(x, y, CellColor::Primary);
    /// }
    ///
    /// let piece = PlacedPiece::isolate(&board).unwrap();
    /// assert_eq!(piece.kind(), PieceKind::O);
    /// assert_eq!((piece.x(), piece.y()), (4, 0));
    /// ```
    #[must_use]
    pub fn isolate(board: &Board) -> Option<Self> {
        let mut cells = ArrayVec::<(usize, usize), 4>::new();
        for position in board.occupied_positions() {
            cells.try_push(position).ok()?;
        }
        if !cells.is_full() {
            return None;
        }

        let x = cells.iter().map(|&(x, _)| x).min()?;
        let y = cells.iter().map(|&(_, y)| y).min()?;
        let shape = normalize(cells);

        PieceKind::ALL.into_iter().find_map(|kind| {
            kind.distinct_rotations()
                .iter()
                .find(|&&rotation| kind.normalized_cells(rotation) == shape)
                .map(|&rotation| Self {
                    kind,
                    rotation,
                    x,
                    y,
                })
        })
    }

    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    #[must_use]
    pub fn rotation(&self) -> PieceRotation {
        self.rotation
    }

    #[must_use]
    pub fn x(&self) -> usize {
        self.x
    }

    #[must_use]
    pub fn y(&self) -> usize {
        self.y
    }
}
