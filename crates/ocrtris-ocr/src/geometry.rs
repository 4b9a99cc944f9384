//! Sampling geometry: logical coordinates to frame pixels.
//!
//! Each geometry divides a calibrated [`Rect`] into a uniform grid and picks
//! fixed fractional offsets inside each cell. The offsets reflect how blocks
//! and digits are drawn, not anything frame specific.

use ocrtris_engine::Board;

use crate::{calibration::Rect, frame::Point};

/// Offset of the block-shine highlight inside a board cell.
const SHINE_OFFSET: (f64, f64) = (0.2, 0.2);

/// Two points on the body of a block. A genuine block renders both in the
/// same color; anything else on screen rarely does.
const MINO_POINTS: [(f64, f64); 2] = [(0.35, 0.65), (0.65, 0.35)];

/// Maps board cells to the sample points of the calibrated playfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    rect: Rect,
}

impl BoardGeometry {
    #[must_use]
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }

    /// Point whose brightness tells whether cell `(x, y)` holds a block.
    #[must_use]
    pub fn block_shine(&self, x: usize, y: usize) -> Point {
        self.point(x, y, SHINE_OFFSET)
    }

    /// Pair of points compared to score how board-like cell `(x, y)` looks.
    #[must_use]
    pub fn mino_points(&self, x: usize, y: usize) -> [Point; 2] {
        MINO_POINTS.map(|offset| self.point(x, y, offset))
    }

    #[expect(clippy::cast_precision_loss)]
    fn point(&self, x: usize, y: usize, (dx, dy): (f64, f64)) -> Point {
        self.rect
            .grid_point(Board::WIDTH, Board::HEIGHT, x as f64 + dx, y as f64 + dy)
    }
}

/// Maps a `cols` × `rows` sample grid onto a region, one point at the
/// centre of each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    rect: Rect,
    cols: usize,
    rows: usize,
}

impl GridGeometry {
    #[must_use]
    pub const fn new(rect: Rect, cols: usize, rows: usize) -> Self {
        Self { rect, cols, rows }
    }

    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn point(&self, col: usize, row: usize) -> Point {
        self.rect
            .grid_point(self.cols, self.rows, col as f64 + 0.5, row as f64 + 0.5)
    }

    /// Splits the region into `count` equally wide side-by-side regions.
    ///
    /// Used for digit strings, where each character occupies its own cell.
    pub fn split_columns(rect: Rect, count: usize) -> impl Iterator<Item = Rect> {
        let count = u32::try_from(count).unwrap_or(u32::MAX).max(1);
        let width = rect.width / count;
        (0..count).map(move |i| Rect::new(rect.x + i * width, rect.y, width, rect.height))
    }
}
