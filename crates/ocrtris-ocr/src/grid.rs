use std::fmt;

/// Fixed-size bright/dark grid sampled from a screen region.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BinaryGrid<const W: usize, const H: usize> {
    cells: [[bool; W]; H],
}

/// Sample grid of the next-piece box, at half-block resolution.
pub type NextGrid = BinaryGrid<8, 4>;

/// Sample grid of one digit glyph.
pub type DigitGrid = BinaryGrid<5, 7>;

impl<const W: usize, const H: usize> Default for BinaryGrid<W, H> {
    fn default() -> Self {
        Self::DARK
    }
}

impl<const W: usize, const H: usize> BinaryGrid<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;
    pub const DARK: Self = Self {
        cells: [[false; W]; H],
    };

    /// Builds a grid from rows of `X` (bright) and any other character (dark).
    ///
    /// # Panics
    ///
    /// Panics if `art` does not have exactly `W` characters per row.
    #[must_use]
    pub fn from_art(art: [&str; H]) -> Self {
        let mut grid = Self::DARK;
        for (y, row) in art.iter().enumerate() {
            assert_eq!(row.chars().count(), W, "row {y} of {row:?} has wrong width");
            for (x, c) in row.chars().enumerate() {
                grid.cells[y][x] = c == 'X';
            }
        }
        grid
    }

    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    pub fn set(&mut self, x: usize, y: usize, bright: bool) {
        self.cells[y][x] = bright;
    }

    pub fn positions() -> impl Iterator<Item = (usize, usize)> + Clone {
        (0..H).flat_map(|y| (0..W).map(move |x| (x, y)))
    }

    /// Number of cells that differ between the two grids.
    #[must_use]
    pub fn distance(&self, other: &Self) -> usize {
        self.cells
            .iter()
            .flatten()
            .zip(other.cells.iter().flatten())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl<const W: usize, const H: usize> fmt::Debug for BinaryGrid<W, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self
            .cells
            .iter()
            .map(|row| row.iter().map(|&c| if c { 'X' } else { '.' }).collect::<String>())
            .collect::<Vec<_>>();
        f.debug_tuple("BinaryGrid").field(&rows).finish()
    }
}

/// Picks the label of the template closest to `grid`.
///
/// Ties keep the earliest template, so template order decides. Returns the
/// label and distance, or `None` when there are no templates.
pub(crate) fn closest<'a, L, const W: usize, const H: usize>(
    grid: &BinaryGrid<W, H>,
    templates: impl IntoIterator<Item = (L, &'a BinaryGrid<W, H>)>,
) -> Option<(L, usize)> {
    let mut best: Option<(L, usize)> = None;
    for (label, template) in templates {
        let distance = grid.distance(template);
        if best.as_ref().is_none_or(|&(_, d)| distance < d) {
            best = Some((label, distance));
        }
    }
    best
}
