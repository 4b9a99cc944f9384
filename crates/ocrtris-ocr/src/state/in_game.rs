use ocrtris_engine::GameRecord;
use tracing::debug;

use crate::{SampleError, config::TrackerConfig, extractor::OcrFrame, recognition::Recognition};

use super::{MAX_LINE_CLEAR, OcrState, OcrStateId};

/// Tracks a game in progress.
///
/// Each trustworthy frame replaces the recorded board. Full rows appearing on
/// a board that had none count as one line clear; the rows stay on screen for
/// a few frames and are only counted on the first. More full rows than one
/// placement can clear is the top-out curtain and ends the game.
///
/// A frame is only trusted when the board is low-noise and the next box
/// shows a piece; anything else is handed to limbo with the record intact.
#[derive(Debug)]
pub(super) struct InGameState {
    max_board_noise: f64,
}

impl InGameState {
    pub(super) fn new(config: &TrackerConfig) -> Self {
        Self {
            max_board_noise: config.max_board_noise,
        }
    }
}

impl OcrState for InGameState {
    fn id(&self) -> OcrStateId {
        OcrStateId::InGame
    }

    fn advance_frame(
        &mut self,
        record: &mut GameRecord,
        frame: &mut OcrFrame<'_>,
    ) -> Result<Option<OcrStateId>, SampleError> {
        let noise = frame.board_noise()?;
        if noise > self.max_board_noise {
            debug!(noise, "board became unreliable");
            return Ok(Some(OcrStateId::GameLimbo));
        }
        let board = frame.binary_board()?.clone();
        if board.full_rows() > MAX_LINE_CLEAR {
            debug!(full_rows = board.full_rows(), "top-out detected");
            return Ok(Some(OcrStateId::GameEnd));
        }
        let Recognition::Recognized(next) = frame.next_piece()? else {
            debug!("next piece hidden");
            return Ok(Some(OcrStateId::GameLimbo));
        };
        let level = frame.level()?;

        if let Recognition::Recognized(level) = level {
            record.set_level(level);
        }
        if record.board().full_rows() == 0 {
            let mut settled = board.clone();
            let cleared = settled.clear_lines();
            if cleared > 0 {
                record.record_line_clear(cleared);
                debug!(cleared, total = record.lines(), score = record.score(), "line clear");
            }
        }
        if record.piece_history().last() != Some(&next) {
            record.push_piece(next);
        }
        record.set_board(board);
        Ok(None)
    }
}
