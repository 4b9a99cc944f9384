use std::fmt;

use serde::{Deserialize, Serialize};

use super::{BOARD_HEIGHT, BOARD_WIDTH};

/// Color class of a single board cell.
///
/// The recognizer only distinguishes the color classes a rendered board uses,
/// not the concrete palette of the current level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, derive_more::IsVariant)]
#[repr(u8)]
pub enum CellColor {
    /// No block in this cell.
    #[default]
    Empty = 0,
    /// Block drawn with the level's primary color.
    Primary = 1,
    /// Block drawn with the level's secondary color.
    Secondary = 2,
    /// Block drawn white with a colored border.
    White = 3,
}

impl CellColor {
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            CellColor::Empty => '.',
            CellColor::Primary => '1',
            CellColor::Secondary => '2',
            CellColor::White => '3',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(CellColor::Empty),
            '1' => Some(CellColor::Primary),
            '2' => Some(CellColor::Secondary),
            '3' => Some(CellColor::White),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct BoardRow {
    cells: [CellColor; BOARD_WIDTH],
}

impl BoardRow {
    const EMPTY: Self = BoardRow {
        cells: [CellColor::Empty; BOARD_WIDTH],
    };

    fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }
}

/// Placed-block occupancy of a 10×20 playfield.
///
/// Coordinates are `(x, y)` with `(0, 0)` at the top-left cell; `y` grows
/// downward. Writes outside the grid are ignored and reads outside the grid
/// through [`Board::exists`] report an empty cell, so callers can probe
/// neighbours without bounds checks.
///
/// # Example
///
/// ```
/// use ocrtris_engine::{Board, CellColor};
///
/// let mut board = Board::EMPTY;
/// for x in 0..Board::WIDTH {
///     board.set_at(x, 19, CellColor::Primary);
/// }
/// board.set_at(3, 18, CellColor::White);
///
/// assert_eq!(board.clear_lines(), 1);
/// assert!(board.exists(3, 19));
/// assert_eq!(board.count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
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
    pub const CELLS: usize = BOARD_WIDTH * BOARD_HEIGHT;

    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; BOARD_HEIGHT],
    };

    /// Returns every board coordinate in row-major order.
    ///
    /// The order does not depend on any board's contents, so two boards can be
    /// walked in lockstep.
    pub fn positions() -> impl Iterator<Item = (usize, usize)> + Clone {
        (0..BOARD_HEIGHT).flat_map(|y| (0..BOARD_WIDTH).map(move |x| (x, y)))
    }

    /// Sets the cell at `(x, y)`. Out-of-range coordinates are a no-op.
    pub fn set_at(&mut self, x: usize, y: usize, color: CellColor) {
        if x >= BOARD_WIDTH || y >= BOARD_HEIGHT {
            return;
        }
        self.rows[y].cells[x] = color;
    }

    /// Returns the cell at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the board.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> CellColor {
        self.rows[y].cells[x]
    }

    /// Returns `true` if `(x, y)` is on the board and holds a block.
    #[must_use]
    pub fn exists(&self, x: usize, y: usize) -> bool {
        x < BOARD_WIDTH && y < BOARD_HEIGHT && !self.rows[y].cells[x].is_empty()
    }

    /// Returns the number of occupied cells.
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .filter(|c| !c.is_empty())
            .count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    #[must_use]
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows[y].is_full()
    }

    /// Returns the number of rows in which every cell is occupied.
    #[must_use]
    pub fn full_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.is_full()).count()
    }

    pub fn occupied_positions(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        Self::positions().filter(|&(x, y)| self.exists(x, y))
    }

    /// Removes full rows and returns how many were removed.
    ///
    /// Remaining rows keep their relative order and settle to the bottom; the
    /// same number of empty rows is inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..BOARD_HEIGHT).rev() {
            if self.rows[y].is_full() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for cell in &row.cells {
                write!(f, "{}", cell.as_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// Serialized as one string per row, top to bottom (e.g. "..11......").
impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let rows = self
            .rows
            .iter()
            .map(|row| row.cells.iter().map(|c| c.as_char()).collect::<String>())
            .collect::<Vec<_>>();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        if rows.len() != BOARD_HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {BOARD_HEIGHT} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Board::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != BOARD_WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "row {y} must have {BOARD_WIDTH} cells, got '{row}'"
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let color = CellColor::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell '{c}' in row {y}"))
                })?;
                board.set_at(x, y, color);
            }
        }
        Ok(board)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: usize, color: CellColor) {
        for x in 0..BOARD_WIDTH {
            board.set_at(x, y, color);
        }
    }

    #[test]
    fn test_empty_board() {
        let board = Board::EMPTY;
        assert_eq!(board.count(), 0);
        assert!(board.is_empty());
        for (x, y) in Board::positions() {
            assert_eq!(board.get(x, y), CellColor::Empty);
            assert!(!board.exists(x, y));
        }
    }

    #[test]
    fn test_set_at_out_of_range_is_noop() {
        let mut board = Board::EMPTY;
        board.set_at(BOARD_WIDTH, 0, CellColor::Primary);
        board.set_at(0, BOARD_HEIGHT, CellColor::Primary);
        board.set_at(usize::MAX, usize::MAX, CellColor::Primary);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_exists_out_of_range() {
        let mut board = Board::EMPTY;
        board.set_at(9, 19, CellColor::White);
        assert!(board.exists(9, 19));
        assert!(!board.exists(10, 19));
        assert!(!board.exists(9, 20));
    }

    #[test]
    fn test_positions_cover_grid_in_row_major_order() {
        let positions = Board::positions().collect::<Vec<_>>();
        assert_eq!(positions.len(), Board::CELLS);
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[1], (1, 0));
        assert_eq!(positions[BOARD_WIDTH], (0, 1));
        assert_eq!(positions[Board::CELLS - 1], (9, 19));

        let mut unique = positions.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), Board::CELLS);

        // Restartable and stable
        assert_eq!(Board::positions().collect::<Vec<_>>(), positions);
    }

    #[test]
    fn test_clear_lines_empty_board() {
        let mut board = Board::EMPTY;
        assert_eq!(board.clear_lines(), 0);
        assert_eq!(board, Board::EMPTY);
    }

    #[test]
    fn test_clear_lines_preserves_remaining_rows() {
        let mut board = Board::EMPTY;
        // Marker cells identify rows after the shift
        board.set_at(0, 15, CellColor::Primary);
        fill_row(&mut board, 16, CellColor::White);
        board.set_at(1, 17, CellColor::Secondary);
        fill_row(&mut board, 18, CellColor::Primary);
        board.set_at(2, 19, CellColor::White);

        assert_eq!(board.clear_lines(), 2);

        let mut expected = Board::EMPTY;
        expected.set_at(0, 17, CellColor::Primary);
        expected.set_at(1, 18, CellColor::Secondary);
        expected.set_at(2, 19, CellColor::White);
        assert_eq!(board, expected);
    }

    #[test]
    fn test_clear_lines_every_count() {
        for k in 0..=BOARD_HEIGHT {
            let mut board = Board::EMPTY;
            for y in BOARD_HEIGHT - k..BOARD_HEIGHT {
                fill_row(&mut board, y, CellColor::Primary);
            }
            // A partial row above the full ones must survive at the bottom
            if k < BOARD_HEIGHT {
                board.set_at(4, BOARD_HEIGHT - k - 1, CellColor::White);
            }

            assert_eq!(board.clear_lines(), k, "k = {k}");
            assert_eq!(board.full_rows(), 0);
            if k < BOARD_HEIGHT {
                assert_eq!(board.count(), 1);
                assert_eq!(board.get(4, BOARD_HEIGHT - 1), CellColor::White);
            } else {
                assert!(board.is_empty());
            }
        }
    }

    #[test]
    fn test_clear_lines_non_contiguous() {
        let mut board = Board::EMPTY;
        fill_row(&mut board, 10, CellColor::Primary);
        fill_row(&mut board, 19, CellColor::Primary);
        board.set_at(5, 11, CellColor::Secondary);

        assert_eq!(board.clear_lines(), 2);
        assert_eq!(board.count(), 1);
        // Only the row cleared below the marker moves it down
        assert_eq!(board.get(5, 12), CellColor::Secondary);
        assert!((0..BOARD_WIDTH).all(|x| !board.exists(x, 19)));
    }

    #[test]
    fn test_is_row_full() {
        let mut board = Board::EMPTY;
        for x in 0..BOARD_WIDTH - 1 {
            board.set_at(x, 19, CellColor::Primary);
        }
        assert!(!board.is_row_full(19));
        board.set_at(BOARD_WIDTH - 1, 19, CellColor::Secondary);
        assert!(board.is_row_full(19));
        assert_eq!(board.full_rows(), 1);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut board = Board::EMPTY;
        board.set_at(3, 4, CellColor::Primary);
        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.set_at(5, 6, CellColor::White);
        assert_ne!(copy, board);
        assert!(!board.exists(5, 6));
    }

    #[test]
    fn test_board_serialization() {
        let mut board = Board::EMPTY;
        board.set_at(0, 0, CellColor::Primary);
        board.set_at(9, 19, CellColor::White);

        let serialized = serde_json::to_string(&board).unwrap();
        assert!(serialized.starts_with("[\"1.........\""));
        assert!(serialized.ends_with("\".........3\"]"));

        let deserialized: Board = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, board);
    }

    #[test]
    fn test_board_deserialization_error_cases() {
        assert!(serde_json::from_str::<Board>("[]").is_err());
        let mut rows = vec![".........."; BOARD_HEIGHT];
        rows[3] = "....x.....";
        assert!(serde_json::from_str::<Board>(&serde_json::to_string(&rows).unwrap()).is_err());
        rows[3] = ".........";
        assert!(serde_json::from_str::<Board>(&serde_json::to_string(&rows).unwrap()).is_err());
    }
}
