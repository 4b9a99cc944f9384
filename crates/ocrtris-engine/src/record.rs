//! Game data accumulated while a game is being tracked.

use serde::{Deserialize, Serialize};

use crate::core::{Board, PieceKind};

/// Base points for clearing 0-4 lines at once, multiplied by `level + 1`.
const SCORE_TABLE: [usize; 5] = [0, 40, 100, 300, 1200];

/// Authoritative record of one tracked game.
///
/// Built up frame by frame while the game is observed and handed to the
/// consumer once tracking reaches the end of the game.
///
/// # Scoring
///
/// Line clears score `SCORE_TABLE[lines] * (level + 1)` with the level known
/// at the moment of the clear. An unknown level scores as level 0.
///
/// # Example
///
/// ```
/// use ocrtris_engine::GameRecord;
///
/// let mut record = GameRecord::new();
/// record.set_level(18);
/// record.record_line_clear(4);
///
/// assert_eq!(record.score(), 1200 * 19);
/// assert_eq!(record.lines(), 4);
/// assert_eq!(record.line_clear_counter()[4], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRecord {
    board: Board,
    score: usize,
    level: Option<u32>,
    lines: usize,
    line_clear_counter: [usize; 5],
    first_piece: Option<PieceKind>,
    piece_history: Vec<PieceKind>,
}

impl Default for GameRecord {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRecord {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            board: Board::EMPTY,
            score: 0,
            level: None,
            lines: 0,
            line_clear_counter: [0; 5],
            first_piece: None,
            piece_history: Vec::new(),
        }
    }

    /// Board as of the last trusted observation, with line clears applied.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn set_board(&mut self, board: Board) {
        self.board = board;
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.score
    }

    /// Returns the last level read from the screen, if any reading succeeded.
    #[must_use]
    pub const fn level(&self) -> Option<u32> {
        self.level
    }

    pub fn set_level(&mut self, level: u32) {
        self.level = Some(level);
    }

    #[must_use]
    pub const fn lines(&self) -> usize {
        self.lines
    }

    /// Returns a histogram of line clears by count.
    ///
    /// Index `n` counts the clears of exactly `n` lines; index 0 is unused.
    #[must_use]
    pub const fn line_clear_counter(&self) -> &[usize; 5] {
        &self.line_clear_counter
    }

    #[must_use]
    pub const fn first_piece(&self) -> Option<PieceKind> {
        self.first_piece
    }

    pub fn set_first_piece(&mut self, kind: PieceKind) {
        self.first_piece = Some(kind);
    }

    /// Pieces seen in the next box, in the order they appeared.
    #[must_use]
    pub fn piece_history(&self) -> &[PieceKind] {
        &self.piece_history
    }

    pub fn push_piece(&mut self, kind: PieceKind) {
        self.piece_history.push(kind);
    }

    /// Adds one line clear event of `lines` rows to the totals and score.
    ///
    /// # Panics
    ///
    /// Panics if `lines` is greater than 4.
    pub fn record_line_clear(&mut self, lines: usize) {
        assert!(lines < SCORE_TABLE.len(), "cannot clear {lines} lines at once");
        let multiplier = self.level.map_or(1, |level| level as usize + 1);
        self.lines += lines;
        self.line_clear_counter[lines] += 1;
        self.score += SCORE_TABLE[lines] * multiplier;
    }
}
