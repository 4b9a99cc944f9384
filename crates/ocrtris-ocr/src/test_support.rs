//! Synthetic captures painted through the same sampling geometry the
//! recognizers use.

use std::cell::Cell;

use image::RgbImage;
use ocrtris_engine::{Board, PieceKind};

use crate::{
    BitmapDigits, Calibration, Frame, NextClassifier, NextGrid, Point, Rect, Rgb,
    geometry::GridGeometry,
};

pub(crate) const FRAME_WIDTH: u32 = 256;
pub(crate) const FRAME_HEIGHT: u32 = 224;

const BLOCK: Rgb = Rgb::new(220, 200, 180);
const GLYPH: Rgb = Rgb::WHITE;

pub(crate) fn calibration() -> Calibration {
    Calibration {
        board: Rect::new(96, 40, 80, 160),
        next: Rect::new(192, 112, 32, 16),
        level: Rect::new(200, 180, 40, 28),
    }
}

pub(crate) fn fill_rect(image: &mut RgbImage, rect: Rect, color: Rgb) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            image.put_pixel(x, y, image::Rgb([color.r, color.g, color.b]));
        }
    }
}

/// Paints every occupied cell of `board` as a solid block.
pub(crate) fn paint_board(image: &mut RgbImage, rect: Rect, board: &Board) {
    let cell_width = rect.width / 10;
    let cell_height = rect.height / 20;
    for (x, y) in board.occupied_positions() {
        let x = u32::try_from(x).unwrap();
        let y = u32::try_from(y).unwrap();
        let cell = Rect::new(
            rect.x + x * cell_width,
            rect.y + y * cell_height,
            cell_width,
            cell_height,
        );
        fill_rect(image, cell, BLOCK);
    }
}

/// Paints one-pixel black and white vertical stripes, which no block
/// rendering produces.
pub(crate) fn paint_static(image: &mut RgbImage, rect: Rect) {
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            let color = if x % 2 == 0 { Rgb::WHITE } else { Rgb::BLACK };
            image.put_pixel(x, y, image::Rgb([color.r, color.g, color.b]));
        }
    }
}

fn paint_grid<const W: usize, const H: usize>(
    image: &mut RgbImage,
    rect: Rect,
    grid: &crate::BinaryGrid<W, H>,
    color: Rgb,
) {
    let cell_width = rect.width / u32::try_from(W).unwrap();
    let cell_height = rect.height / u32::try_from(H).unwrap();
    for (x, y) in crate::BinaryGrid::<W, H>::positions() {
        if grid.get(x, y) {
            let x = u32::try_from(x).unwrap();
            let y = u32::try_from(y).unwrap();
            let cell = Rect::new(
                rect.x + x * cell_width,
                rect.y + y * cell_height,
                cell_width,
                cell_height,
            );
            fill_rect(image, cell, color);
        }
    }
}

pub(crate) fn paint_next(image: &mut RgbImage, rect: Rect, grid: &NextGrid) {
    paint_grid(image, rect, grid, BLOCK);
}

pub(crate) fn paint_digits(image: &mut RgbImage, rect: Rect, reader: &BitmapDigits, digits: &[u8]) {
    let cells = GridGeometry::split_columns(rect, digits.len());
    for (cell, &digit) in cells.zip(digits) {
        paint_grid(image, cell, reader.glyph(digit), GLYPH);
    }
}

pub(crate) fn next_grid_of(kind: PieceKind) -> NextGrid {
    NextClassifier::default()
        .templates()
        .iter()
        .find(|t| t.kind == kind)
        .unwrap()
        .grid
}

/// Describes one synthetic capture of the game screen.
#[derive(Debug, Clone, Default)]
pub(crate) struct Scene {
    /// `None` renders static where the board should be.
    pub board: Option<Board>,
    pub next: Option<PieceKind>,
    pub level: Option<u8>,
}

impl Scene {
    pub(crate) fn board(board: Board) -> Self {
        Self {
            board: Some(board),
            ..Self::default()
        }
    }

    pub(crate) fn with_next(mut self, kind: PieceKind) -> Self {
        self.next = Some(kind);
        self
    }

    pub(crate) fn with_level(mut self, level: u8) -> Self {
        self.level = Some(level);
        self
    }

    pub(crate) fn render(&self, reader: &BitmapDigits) -> RgbImage {
        let calibration = calibration();
        let mut image = RgbImage::new(FRAME_WIDTH, FRAME_HEIGHT);
        match &self.board {
            Some(board) => paint_board(&mut image, calibration.board, board),
            None => paint_static(&mut image, calibration.board),
        }
        if let Some(kind) = self.next {
            paint_next(&mut image, calibration.next, &next_grid_of(kind));
        }
        if let Some(level) = self.level {
            paint_digits(&mut image, calibration.level, reader, &[level / 10, level % 10]);
        }
        image
    }
}

/// Wraps a frame and counts how many samples are taken from it.
#[derive(Debug)]
pub(crate) struct CountingFrame<'a> {
    inner: &'a RgbImage,
    samples: Cell<usize>,
}

impl<'a> CountingFrame<'a> {
    pub(crate) fn new(inner: &'a RgbImage) -> Self {
        Self {
            inner,
            samples: Cell::new(0),
        }
    }

    pub(crate) fn samples(&self) -> usize {
        self.samples.get()
    }
}

impl Frame for CountingFrame<'_> {
    fn pixel_at(&self, point: Point) -> Option<Rgb> {
        self.samples.set(self.samples.get() + 1);
        self.inner.pixel_at(point)
    }
}
