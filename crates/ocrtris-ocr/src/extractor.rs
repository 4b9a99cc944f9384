use ocrtris_engine::{Board, CellColor, PieceKind, PlacedPiece};
use tracing::trace;

use crate::{
    SampleError,
    calibration::{Calibration, CalibrationError},
    config::TrackerConfig,
    digits::DigitClassifier,
    frame::{Frame, Point, Rgb},
    geometry::{BoardGeometry, GridGeometry},
    grid::NextGrid,
    next::NextClassifier,
    recognition::Recognition,
};

/// Read-only recognition setup shared by every frame of a session.
#[derive(Debug)]
pub struct OcrContext {
    calibration: Calibration,
    board: BoardGeometry,
    next: GridGeometry,
    next_classifier: NextClassifier,
    digits: Box<dyn DigitClassifier>,
    shine_threshold: f64,
    next_brightness_threshold: f64,
}

impl OcrContext {
    pub fn new(
        calibration: Calibration,
        config: &TrackerConfig,
        digits: Box<dyn DigitClassifier>,
    ) -> Result<Self, CalibrationError> {
        calibration.validate(
            u32::try_from(NextGrid::WIDTH).unwrap_or(u32::MAX),
            u32::try_from(NextGrid::HEIGHT).unwrap_or(u32::MAX),
        )?;
        Ok(Self {
            board: BoardGeometry::new(calibration.board),
            next: GridGeometry::new(calibration.next, NextGrid::WIDTH, NextGrid::HEIGHT),
            next_classifier: NextClassifier::new(config.max_next_distance),
            digits,
            shine_threshold: config.shine_threshold,
            next_brightness_threshold: config.next_brightness_threshold,
            calibration,
        })
    }

    /// Pairs a captured frame with this context for feature extraction.
    #[must_use]
    pub fn frame<'a>(&'a self, frame: &'a dyn Frame) -> OcrFrame<'a> {
        OcrFrame::new(frame, self)
    }
}

/// Features of one frame, each computed on first request and cached.
#[derive(Debug, Default)]
struct FeatureCache {
    binary_board: Option<Board>,
    board_noise: Option<f64>,
    next_grid: Option<NextGrid>,
    next_piece: Option<Recognition<PieceKind>>,
    level: Option<Recognition<u32>>,
    board_only_piece: Option<Recognition<PlacedPiece>>,
}

/// One captured frame and the features extracted from it so far.
///
/// Every feature has a computing accessor and a `cached_*` accessor. The
/// computing accessor samples the frame the first time only; later calls
/// return the cached value. The `cached_*` accessor never samples and tells
/// the three outcomes apart:
///
/// - `None` - not computed yet
/// - `Some(Recognition::Unrecognized)` - computed, but nothing was recognized
/// - `Some(Recognition::Recognized(value))` - computed value
///
/// A [`SampleError`] leaves the failed feature uncached.
pub struct OcrFrame<'a> {
    frame: &'a dyn Frame,
    context: &'a OcrContext,
    cache: FeatureCache,
}

impl std::fmt::Debug for OcrFrame<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OcrFrame")
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}

impl<'a> OcrFrame<'a> {
    #[must_use]
    pub fn new(frame: &'a dyn Frame, context: &'a OcrContext) -> Self {
        Self {
            frame,
            context,
            cache: FeatureCache::default(),
        }
    }

    fn sample(&self, point: Point) -> Result<Rgb, SampleError> {
        self.frame.pixel_at(point).ok_or(SampleError { point })
    }

    /// Board occupancy by block-shine brightness, without color classes.
    ///
    /// Every occupied cell is [`CellColor::Primary`].
    pub fn binary_board(&mut self) -> Result<&Board, SampleError> {
        let board = match self.cache.binary_board.take() {
            Some(board) => board,
            None => self.extract_binary_board()?,
        };
        Ok(self.cache.binary_board.insert(board))
    }

    fn extract_binary_board(&self) -> Result<Board, SampleError> {
        let mut board = Board::EMPTY;
        for (x, y) in Board::positions() {
            let shine = self.sample(self.context.board.block_shine(x, y))?;
            if shine.average() > self.context.shine_threshold {
                board.set_at(x, y, CellColor::Primary);
            }
        }
        trace!(count = board.count(), "extracted binary board");
        Ok(board)
    }

    #[must_use]
    pub fn cached_binary_board(&self) -> Option<&Board> {
        self.cache.binary_board.as_ref()
    }

    /// Mean color distance between the two mino points of every cell.
    ///
    /// Low for a genuinely rendered board, where each cell is drawn in one
    /// color, and high for anything else.
    pub fn board_noise(&mut self) -> Result<f64, SampleError> {
        if let Some(noise) = self.cache.board_noise {
            return Ok(noise);
        }
        let mut total = 0.0;
        for (x, y) in Board::positions() {
            let [a, b] = self.context.board.mino_points(x, y);
            total += self.sample(a)?.distance(self.sample(b)?);
        }
        #[expect(clippy::cast_precision_loss)]
        let noise = total / Board::CELLS as f64;
        trace!(noise, "computed board noise");
        self.cache.board_noise = Some(noise);
        Ok(noise)
    }

    #[must_use]
    pub fn cached_board_noise(&self) -> Option<f64> {
        self.cache.board_noise
    }

    /// Bright/dark samples of the next-piece box.
    pub fn next_grid(&mut self) -> Result<&NextGrid, SampleError> {
        let grid = match self.cache.next_grid.take() {
            Some(grid) => grid,
            None => self.extract_next_grid()?,
        };
        Ok(self.cache.next_grid.insert(grid))
    }

    fn extract_next_grid(&self) -> Result<NextGrid, SampleError> {
        let mut grid = NextGrid::DARK;
        for (x, y) in NextGrid::positions() {
            let pixel = self.sample(self.context.next.point(x, y))?;
            grid.set(x, y, pixel.average() > self.context.next_brightness_threshold);
        }
        Ok(grid)
    }

    #[must_use]
    pub fn cached_next_grid(&self) -> Option<&NextGrid> {
        self.cache.next_grid.as_ref()
    }

    /// Piece shown in the next box.
    pub fn next_piece(&mut self) -> Result<Recognition<PieceKind>, SampleError> {
        if let Some(piece) = self.cache.next_piece {
            return Ok(piece);
        }
        let grid = *self.next_grid()?;
        let piece = self.context.next_classifier.classify(&grid);
        trace!(?piece, "classified next piece");
        self.cache.next_piece = Some(piece);
        Ok(piece)
    }

    #[must_use]
    pub fn cached_next_piece(&self) -> Option<Recognition<PieceKind>> {
        self.cache.next_piece
    }

    /// Level as read by the session's digit classifier.
    pub fn level(&mut self) -> Result<Recognition<u32>, SampleError> {
        if let Some(level) = self.cache.level {
            return Ok(level);
        }
        let level = self
            .context
            .digits
            .read(self.frame, self.context.calibration.level)?;
        trace!(?level, "read level");
        self.cache.level = Some(level);
        Ok(level)
    }

    #[must_use]
    pub fn cached_level(&self) -> Option<Recognition<u32>> {
        self.cache.level
    }

    /// The single piece making up the whole board, if there is one.
    pub fn board_only_piece(&mut self) -> Result<Recognition<PlacedPiece>, SampleError> {
        if let Some(piece) = self.cache.board_only_piece {
            return Ok(piece);
        }
        let piece = Recognition::from(PlacedPiece::isolate(self.binary_board()?));
        self.cache.board_only_piece = Some(piece);
        Ok(piece)
    }

    #[must_use]
    pub fn cached_board_only_piece(&self) -> Option<Recognition<PlacedPiece>> {
        self.cache.board_only_piece
    }
}
