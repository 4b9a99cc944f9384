pub use self::{board::*, isolate::*, piece::*};

pub(crate) mod board;
pub(crate) mod isolate;
pub(crate) mod piece;

/// Number of columns on the board.
pub const BOARD_WIDTH: usize = 10;
/// Number of rows on the board.
pub const BOARD_HEIGHT: usize = 20;
