use ocrtris_engine::GameRecord;
use tracing::debug;

use crate::{SampleError, config::TrackerConfig, extractor::OcrFrame, recognition::Recognition};

use super::{OcrState, OcrStateId};

/// Waits for the first frame of a game.
///
/// A game has started once the board is trustworthy, either empty or
/// holding nothing but the first piece, and the next box shows a piece. A
/// blank capture passes the noise check with an empty board; the next box
/// is what tells it apart from a real game screen.
#[derive(Debug)]
pub(super) struct BeforeGameState {
    max_board_noise: f64,
}

impl BeforeGameState {
    pub(super) fn new(config: &TrackerConfig) -> Self {
        Self {
            max_board_noise: config.max_board_noise,
        }
    }
}

impl OcrState for BeforeGameState {
    fn id(&self) -> OcrStateId {
        OcrStateId::BeforeGame
    }

    fn advance_frame(
        &mut self,
        record: &mut GameRecord,
        frame: &mut OcrFrame<'_>,
    ) -> Result<Option<OcrStateId>, SampleError> {
        if frame.board_noise()? > self.max_board_noise {
            return Ok(None);
        }
        let board = frame.binary_board()?.clone();
        let first_piece = frame.board_only_piece()?;
        if !board.is_empty() && first_piece.is_unrecognized() {
            return Ok(None);
        }
        let Recognition::Recognized(next) = frame.next_piece()? else {
            return Ok(None);
        };
        let level = frame.level()?;

        if let Recognition::Recognized(piece) = first_piece {
            record.set_first_piece(piece.kind());
        }
        record.push_piece(next);
        if let Recognition::Recognized(level) = level {
            record.set_level(level);
        }
        record.set_board(board);
        debug!(?first_piece, ?next, ?level, "game started");
        Ok(Some(OcrStateId::InGame))
    }
}
