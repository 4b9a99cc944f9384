use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

/// Enum representing the type of piece.
///
/// The declaration order is the canonical order used to break ties between
/// equally good classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, derive_more::Display)]
#[repr(u8)]
pub enum PieceKind {
    /// I-piece.
    I = 0,
    /// O-piece.
    O = 1,
    /// S-piece.
    S = 2,
    /// Z-piece.
    Z = 3,
    /// J-piece.
    J = 4,
    /// L-piece.
    L = 5,
    /// T-piece.
    T = 6,
}

impl PieceKind {
    /// Number of piece types (7).
    pub const LEN: usize = 7;

    /// All piece kinds in canonical order.
    pub const ALL: [PieceKind; PieceKind::LEN] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Returns an iterator of occupied positions for the piece in the given rotation.
    ///
    /// Positions are relative to the top-left of the piece's 4×4 bounding box.
    pub fn occupied_positions(self, rotation: PieceRotation) -> impl Iterator<Item = (usize, usize)> {
        PIECE_SHAPES[self as usize][rotation.as_usize()]
            .iter()
            .enumerate()
            .flat_map(move |(dy, row)| {
                row.iter()
                    .enumerate()
                    .filter_map(move |(dx, &cell)| cell.then_some((dx, dy)))
            })
    }

    /// Returns the occupied positions in the given rotation, shifted so that
    /// the topmost row and leftmost column are both zero, in row-major order.
    #[must_use]
    pub fn normalized_cells(self, rotation: PieceRotation) -> ArrayVec<(usize, usize), 4> {
        let cells = self.occupied_positions(rotation).collect::<ArrayVec<_, 4>>();
        normalize(cells)
    }

    /// Returns the rotations that produce distinct shapes.
    ///
    /// The O-piece has one, the I, S and Z pieces have two, the rest four.
    #[must_use]
    pub fn distinct_rotations(self) -> &'static [PieceRotation] {
        static ROTATIONS: [PieceRotation; 4] = PieceRotation::ALL;
        match self {
            PieceKind::O => &ROTATIONS[..1],
            PieceKind::I | PieceKind::S | PieceKind::Z => &ROTATIONS[..2],
            PieceKind::J | PieceKind::L | PieceKind::T => &ROTATIONS,
        }
    }
}

/// Shifts cells so the minimum x and minimum y are zero, sorted row-major.
pub(crate) fn normalize(mut cells: ArrayVec<(usize, usize), 4>) -> ArrayVec<(usize, usize), 4> {
    let min_x = cells.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = cells.iter().map(|&(_, y)| y).min().unwrap_or(0);
    for (x, y) in &mut cells {
        *x -= min_x;
        *y -= min_y;
    }
    cells.sort_unstable_by_key(|&(x, y)| (y, x));
    cells
}

/// Rotation state of a piece.
///
/// Represents one of four rotation states:
///
/// - `0`: 0° (spawn orientation)
/// - `1`: 90° clockwise
/// - `2`: 180°
/// - `3`: 270° clockwise (90° counterclockwise)
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct PieceRotation(u8);

impl PieceRotation {
    /// All four rotation states, spawn orientation first.
    pub const ALL: [PieceRotation; 4] = [
        PieceRotation(0),
        PieceRotation(1),
        PieceRotation(2),
        PieceRotation(3),
    ];

    const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

/// Piece shape represented as a 4×4 occupancy array.
type PieceShape = [[bool; 4]; 4];

/// Generates all 4 rotation states of a piece shape by rotating 90° clockwise.
///
/// # Arguments
///
/// * `size` - Effective size of the piece (3 for most pieces, 4 for I, 2 for O)
/// * `shape` - Initial piece shape at 0° rotation
const fn shape_rotations(size: usize, shape: &PieceShape) -> [PieceShape; 4] {
    let mut rotates = [*shape; 4];
    let mut i = 1;
    while i < 4 {
        let mut new_shape = [[false; 4]; 4];
        let mut y = 0;
        while y < size {
            let mut x = 0;
            while x < size {
                new_shape[y][x] = rotates[i - 1][size - 1 - x][y];
                x += 1;
            }
            y += 1;
        }
        rotates[i] = new_shape;
        i += 1;
    }
    rotates
}

static PIECE_SHAPES: [[PieceShape; 4]; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    const EEEE: [bool; 4] = [E; 4];
    [
        // I-piece
        shape_rotations(4, &[EEEE, [C, C, C, C], EEEE, EEEE]),
        // O-piece
        shape_rotations(2, &[[C, C, E, E], [C, C, E, E], EEEE, EEEE]),
        // S-piece
        shape_rotations(3, &[[E, C, C, E], [C, C, E, E], EEEE, EEEE]),
        // Z-piece
        shape_rotations(3, &[[C, C, E, E], [E, C, C, E], EEEE, EEEE]),
        // J-piece
        shape_rotations(3, &[[C, E, E, E], [C, C, C, E], EEEE, EEEE]),
        // L-piece
        shape_rotations(3, &[[E, E, C, E], [C, C, C, E], EEEE, EEEE]),
        // T-piece
        shape_rotations(3, &[[E, C, E, E], [C, C, C, E], EEEE, EEEE]),
    ]
};
