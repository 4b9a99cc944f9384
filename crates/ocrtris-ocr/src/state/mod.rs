//! Game lifecycle tracking.
//!
//! The tracker is always in exactly one lifecycle state:
//!
//! - [`OcrStateId::BeforeGame`] - waiting for a trustworthy, freshly started board
//! - [`OcrStateId::InGame`] - accumulating board, level, line clears and pieces
//! - [`OcrStateId::GameLimbo`] - the board is temporarily untrustworthy
//! - [`OcrStateId::GameEnd`] - terminal, the record is final
//!
//! Each state declares the states it may move to, and
//! [`OcrStateMachine`] rejects anything else.
//!
//! # State Flow
//!
//! ```text
//! BeforeGame ──> InGame <──> GameLimbo
//!                  │            │
//!                  └──> GameEnd <┘
//! ```

use std::fmt;

use ocrtris_engine::GameRecord;

pub use self::machine::*;

use crate::{SampleError, config::TrackerConfig, extractor::OcrFrame};

mod before_game;
mod game_end;
mod game_limbo;
mod in_game;
mod machine;

/// Most lines a single placement can clear.
const MAX_LINE_CLEAR: usize = 4;

/// Identifies a lifecycle state.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    derive_more::Display,
    derive_more::IsVariant,
    serde::Serialize,
)]
pub enum OcrStateId {
    BeforeGame,
    InGame,
    GameLimbo,
    GameEnd,
}

impl OcrStateId {
    /// The states this state may transition into.
    #[must_use]
    pub const fn successors(self) -> &'static [OcrStateId] {
        match self {
            OcrStateId::BeforeGame => &[OcrStateId::InGame],
            OcrStateId::InGame => &[OcrStateId::GameLimbo, OcrStateId::GameEnd],
            OcrStateId::GameLimbo => &[OcrStateId::InGame, OcrStateId::GameEnd],
            OcrStateId::GameEnd => &[],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: OcrStateId) -> bool {
        self.successors().contains(&next)
    }

    /// A terminal state has no successors; the tracker stops advancing there.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.successors().is_empty()
    }
}

/// A lifecycle state requested a successor it did not declare.
///
/// This is a bug in the state, not a property of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("illegal transition from {from} to {to}")]
pub struct IllegalTransition {
    pub from: OcrStateId,
    pub to: OcrStateId,
}

/// Per-frame behaviour of one lifecycle state.
///
/// `advance_frame` may read any feature of `frame` and update `record`, and
/// returns the state to move to, if any. Implementations read every feature
/// they need before touching `record`, so a [`SampleError`] leaves the
/// record as it was.
pub trait OcrState: fmt::Debug {
    fn id(&self) -> OcrStateId;

    fn advance_frame(
        &mut self,
        record: &mut GameRecord,
        frame: &mut OcrFrame<'_>,
    ) -> Result<Option<OcrStateId>, SampleError>;
}

/// Builds the state object for `id`.
pub(crate) fn create_state(id: OcrStateId, config: &TrackerConfig) -> Box<dyn OcrState> {
    match id {
        OcrStateId::BeforeGame => Box::new(before_game::BeforeGameState::new(config)),
        OcrStateId::InGame => Box::new(in_game::InGameState::new(config)),
        OcrStateId::GameLimbo => Box::new(game_limbo::GameLimboState::new(config)),
        OcrStateId::GameEnd => Box::new(game_end::GameEndState),
    }
}
