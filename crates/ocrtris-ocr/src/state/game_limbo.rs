use ocrtris_engine::{Board, GameRecord, PlacedPiece};
use tracing::debug;

use crate::{SampleError, config::TrackerConfig, extractor::OcrFrame};

use super::{MAX_LINE_CLEAR, OcrState, OcrStateId};

/// Cells that may vanish from the stack between two observations: one line
/// clear plus the piece that was still falling.
const MAX_VANISHED_CELLS: usize = MAX_LINE_CLEAR * Board::WIDTH + 4;

/// The board stopped looking trustworthy mid-game.
///
/// Pause screens and capture glitches land here. A frame counts as a
/// readable game screen when the board is low-noise and the next box shows
/// a piece. What such a frame shows decides where to go: the recorded game
/// carries on, or a different board (a fresh start, or a stack that lost
/// more than a line clear can remove) means the game is over. More than
/// `limbo_tolerance` unreadable frames in a row also end it. The record is
/// left alone.
#[derive(Debug)]
pub(super) struct GameLimboState {
    max_board_noise: f64,
    tolerance: usize,
    frames: usize,
}

impl GameLimboState {
    pub(super) fn new(config: &TrackerConfig) -> Self {
        Self {
            max_board_noise: config.max_board_noise,
            tolerance: config.limbo_tolerance,
            frames: 0,
        }
    }
}

impl OcrState for GameLimboState {
    fn id(&self) -> OcrStateId {
        OcrStateId::GameLimbo
    }

    fn advance_frame(
        &mut self,
        record: &mut GameRecord,
        frame: &mut OcrFrame<'_>,
    ) -> Result<Option<OcrStateId>, SampleError> {
        if frame.board_noise()? <= self.max_board_noise && frame.next_piece()?.is_recognized() {
            let observed = frame.binary_board()?;
            if continues_game(record.board(), observed) {
                debug!(frames = self.frames, "game screen visible again");
                return Ok(Some(OcrStateId::InGame));
            }
            debug!(
                recorded = record.board().count(),
                observed = observed.count(),
                "a different board reappeared"
            );
            return Ok(Some(OcrStateId::GameEnd));
        }

        self.frames += 1;
        if self.frames > self.tolerance {
            debug!(frames = self.frames, "board lost for too long");
            return Ok(Some(OcrStateId::GameEnd));
        }
        Ok(None)
    }
}

/// Whether `observed` can be the recorded game some frames later.
///
/// Cells only leave the stack through line clears, so a board with far
/// fewer cells is another game. So is an empty board or a lone piece where
/// a stack used to be; only a perfect clear would produce that in the same
/// game, and it is treated as a new game.
fn continues_game(recorded: &Board, observed: &Board) -> bool {
    let recorded = settled_count(recorded);
    if observed.is_empty() || PlacedPiece::isolate(observed).is_some() {
        return recorded <= 4;
    }
    settled_count(observed) + MAX_VANISHED_CELLS >= recorded
}

/// Occupied cells once the full rows on screen are cleared.
fn settled_count(board: &Board) -> usize {
    let mut settled = board.clone();
    settled.clear_lines();
    settled.count()
}

#[cfg(test)]
mod tests {
    use ocrtris_engine::CellColor;

    use super::*;

    fn stack(rows: std::ops::Range<usize>) -> Board {
        let mut board = Board::EMPTY;
        for y in rows {
            for x in 0..Board::WIDTH - 1 {
                board.set_at(x, y, CellColor::Primary);
            }
        }
        board
    }

    #[test]
    fn test_unchanged_stack_continues() {
        let board = stack(15..20);
        assert!(continues_game(&board, &board));
    }

    #[test]
    fn test_new_game_after_empty_start_continues() {
        let mut piece = Board::EMPTY;
        for (x, y) in [(4, 0), (5, 0), (4, 1), (5, 1)] {
            piece.set_at(x, y, CellColor::Primary);
        }
        assert!(continues_game(&Board::EMPTY, &Board::EMPTY));
        assert!(continues_game(&piece, &Board::EMPTY));
        assert!(continues_game(&Board::EMPTY, &piece));
    }

    #[test]
    fn test_line_clear_explains_fewer_cells() {
        let recorded = stack(10..20);
        // Four rows cleared while the capture was unreadable
        assert!(continues_game(&recorded, &stack(14..20)));

        // The same four rows still flashing full on screen
        let mut flashing = stack(10..20);
        for y in 16..20 {
            for x in 0..Board::WIDTH {
                flashing.set_at(x, y, CellColor::Primary);
            }
        }
        assert!(continues_game(&recorded, &flashing));
    }

    #[test]
    fn test_far_fewer_cells_is_another_game() {
        assert!(!continues_game(&stack(10..20), &stack(18..20)));
    }

    #[test]
    fn test_fresh_board_after_stack_is_another_game() {
        let recorded = stack(15..20);
        assert!(!continues_game(&recorded, &Board::EMPTY));

        let mut piece = Board::EMPTY;
        for (x, y) in [(3, 0), (4, 0), (5, 0), (4, 1)] {
            piece.set_at(x, y, CellColor::Primary);
        }
        assert!(!continues_game(&recorded, &piece));
    }
}
