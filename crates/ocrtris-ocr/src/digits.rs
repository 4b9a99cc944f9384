use std::fmt;

use tracing::trace;

use crate::{
    SampleError,
    calibration::Rect,
    frame::Frame,
    geometry::GridGeometry,
    grid::{DigitGrid, closest},
    recognition::Recognition,
};

/// Reads a number from a calibrated screen region.
///
/// Implementations may fail to read: that is `Ok(Recognition::Unrecognized)`.
/// Only a sample outside the frame is an error.
pub trait DigitClassifier: fmt::Debug {
    fn read(&self, frame: &dyn Frame, region: Rect) -> Result<Recognition<u32>, SampleError>;
}

/// A digit classifier that never reads anything.
///
/// For setups without a usable level display. Samples nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDigits;

impl DigitClassifier for NoDigits {
    fn read(&self, _frame: &dyn Frame, _region: Rect) -> Result<Recognition<u32>, SampleError> {
        Ok(Recognition::Unrecognized)
    }
}

const DIGIT_FONT: [[&str; 7]; 10] = [
    [".XXX.", "X...X", "X..XX", "X.X.X", "XX..X", "X...X", ".XXX."],
    ["..X..", ".XX..", "..X..", "..X..", "..X..", "..X..", ".XXX."],
    [".XXX.", "X...X", "....X", "...X.", "..X..", ".X...", "XXXXX"],
    ["XXXXX", "...X.", "..X..", "...X.", "....X", "X...X", ".XXX."],
    ["...X.", "..XX.", ".X.X.", "X..X.", "XXXXX", "...X.", "...X."],
    ["XXXXX", "X....", "XXXX.", "....X", "....X", "X...X", ".XXX."],
    ["..XX.", ".X...", "X....", "XXXX.", "X...X", "X...X", ".XXX."],
    ["XXXXX", "....X", "...X.", "..X..", ".X...", ".X...", ".X..."],
    [".XXX.", "X...X", "X...X", ".XXX.", "X...X", "X...X", ".XXX."],
    [".XXX.", "X...X", "X...X", ".XXXX", "....X", "...X.", ".XX.."],
];

/// Template-matching reader for fixed-width digit strings.
///
/// The region is split into `digits` equally wide character cells. Each cell
/// is sampled on a 5×7 grid, thresholded by brightness and matched against a
/// built-in font. A single unreadable character makes the whole number
/// unrecognized.
#[derive(Debug, Clone)]
pub struct BitmapDigits {
    glyphs: [DigitGrid; 10],
    digits: usize,
    brightness_threshold: f64,
    max_distance: usize,
}

impl BitmapDigits {
    #[must_use]
    pub fn new(digits: usize, brightness_threshold: f64, max_distance: usize) -> Self {
        Self {
            glyphs: DIGIT_FONT.map(DigitGrid::from_art),
            digits,
            brightness_threshold,
            max_distance,
        }
    }

    #[must_use]
    pub fn glyph(&self, digit: u8) -> &DigitGrid {
        &self.glyphs[usize::from(digit)]
    }

    fn sample_glyph(&self, frame: &dyn Frame, cell: Rect) -> Result<DigitGrid, SampleError> {
        let geometry = GridGeometry::new(cell, DigitGrid::WIDTH, DigitGrid::HEIGHT);
        let mut grid = DigitGrid::DARK;
        for (x, y) in DigitGrid::positions() {
            let point = geometry.point(x, y);
            let pixel = frame.pixel_at(point).ok_or(SampleError { point })?;
            grid.set(x, y, pixel.average() > self.brightness_threshold);
        }
        Ok(grid)
    }

    fn classify_glyph(&self, grid: &DigitGrid) -> Option<u32> {
        let (digit, distance) = closest(grid, (0..).zip(&self.glyphs))?;
        (distance <= self.max_distance).then_some(digit)
    }
}

impl DigitClassifier for BitmapDigits {
    fn read(&self, frame: &dyn Frame, region: Rect) -> Result<Recognition<u32>, SampleError> {
        // `None` once a glyph is unreadable or the number overflows
        let mut value = Some(0_u32);
        for cell in GridGeometry::split_columns(region, self.digits) {
            // Sample every cell so an out-of-frame region always surfaces
            let grid = self.sample_glyph(frame, cell)?;
            let Some(digit) = self.classify_glyph(&grid) else {
                trace!(?grid, "unreadable digit");
                value = None;
                continue;
            };
            value = value.and_then(|v| v.checked_mul(10)?.checked_add(digit));
        }
        Ok(value.into())
    }
}
