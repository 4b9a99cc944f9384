//! Recognition of a falling-block game from captured video frames.
//!
//! The crate is split along the path a frame takes:
//!
//! - [`Frame`] / [`FrameSource`] - decoded captures and where they come from
//! - [`Calibration`] and the sampling geometry in [`geometry`] - where the
//!   board, next box and level digits are on screen
//! - [`OcrFrame`] - lazily extracted, cached features of one frame
//! - [`NextClassifier`] and [`DigitClassifier`] - template recognizers
//! - [`OcrStateMachine`] - game lifecycle tracking over a frame sequence
//!
//! # Example
//!
//! ```
//! use ocrtris_ocr::{Calibration, NoDigits, OcrContext, OcrStateMachine, Rect, TrackerConfig};
//!
//! let calibration = Calibration {
//!     board: Rect::new(96, 40, 80, 160),
//!     next: Rect::new(192, 112, 32, 16),
//!     level: Rect::new(208, 160, 16, 8),
//! };
//! let config = TrackerConfig::default();
//! let context = OcrContext::new(calibration, &config, Box::new(NoDigits)).unwrap();
//!
//! let frame = image::RgbImage::new(256, 224);
//! let mut machine = OcrStateMachine::new(&config);
//! machine.advance(&mut context.frame(&frame)).unwrap();
//!
//! // A black screen shows no next piece, so it is not a game screen
//! assert!(machine.state_id().is_before_game());
//! ```

pub use self::{
    calibration::*, config::*, digits::*, extractor::*, frame::*, grid::*, next::*,
    recognition::*, state::*,
};

pub mod geometry;

mod calibration;
mod config;
mod digits;
mod extractor;
mod frame;
mod grid;
mod next;
mod recognition;
mod state;

#[cfg(test)]
mod test_support;

/// A requested sample point lies outside the frame.
///
/// Fatal to the feature being computed on that frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("pixel {point} is outside the frame")]
pub struct SampleError {
    pub point: Point,
}
