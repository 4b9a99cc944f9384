use serde::{Deserialize, Serialize};

use crate::frame::Point;

/// Axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    #[must_use]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the pixel at fractional grid position `(fx, fy)`, where the
    /// rectangle is divided into `cols` × `rows` equal cells and `(1.0, 1.0)`
    /// is the bottom-right corner of cell `(0, 0)`.
    #[must_use]
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn grid_point(&self, cols: usize, rows: usize, fx: f64, fy: f64) -> Point {
        let cell_width = f64::from(self.width) / cols as f64;
        let cell_height = f64::from(self.height) / rows as f64;
        let px = f64::from(self.x) + fx * cell_width;
        let py = f64::from(self.y) + fy * cell_height;
        Point::new(px.floor().max(0.0) as u32, py.floor().max(0.0) as u32)
    }
}

/// Where the game's regions lie on screen for one capture setup.
///
/// Produced by a separate calibration step and shared read-only by every
/// frame of a session. Usually loaded from JSON:
///
/// ```json
/// {
///   "board": { "x": 96, "y": 40, "width": 80, "height": 160 },
///   "next": { "x": 192, "y": 112, "width": 32, "height": 16 },
///   "level": { "x": 208, "y": 160, "width": 16, "height": 8 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Calibration {
    /// The 10×20 playfield.
    pub board: Rect,
    /// The next-piece preview box.
    pub next: Rect,
    /// The level digits.
    pub level: Rect,
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CalibrationError {
    #[display("{name} region is empty")]
    EmptyRegion { name: &'static str },
    #[display("{name} region must be at least {min_width}x{min_height} pixels")]
    TooSmall {
        name: &'static str,
        min_width: u32,
        min_height: u32,
    },
}

impl Calibration {
    /// Checks that every region can hold the sample grid laid over it.
    pub fn validate(&self, next_cols: u32, next_rows: u32) -> Result<(), CalibrationError> {
        check_region("board", self.board, 10, 20)?;
        check_region("next", self.next, next_cols, next_rows)?;
        check_region("level", self.level, 1, 1)?;
        Ok(())
    }
}

fn check_region(
    name: &'static str,
    rect: Rect,
    min_width: u32,
    min_height: u32,
) -> Result<(), CalibrationError> {
    if rect.width == 0 || rect.height == 0 {
        return Err(CalibrationError::EmptyRegion { name });
    }
    if rect.width < min_width || rect.height < min_height {
        return Err(CalibrationError::TooSmall {
            name,
            min_width,
            min_height,
        });
    }
    Ok(())
}
