use ocrtris_engine::GameRecord;
use tracing::debug;

use crate::{SampleError, config::TrackerConfig, extractor::OcrFrame};

use super::{IllegalTransition, OcrState, OcrStateId, create_state};

type StateFactory = fn(OcrStateId, &TrackerConfig) -> Box<dyn OcrState>;

/// Drives the lifecycle states over a stream of frames.
///
/// Frames must be fed in capture order. Once the terminal state is reached
/// further frames are ignored and [`OcrStateMachine::into_record`] yields the
/// final record.
///
/// # Panics
///
/// [`OcrStateMachine::advance`] panics with an [`IllegalTransition`] if a
/// state requests a successor it did not declare.
#[derive(Debug)]
pub struct OcrStateMachine {
    state: Box<dyn OcrState>,
    record: GameRecord,
    config: TrackerConfig,
    factory: StateFactory,
    frames: u64,
}

impl OcrStateMachine {
    #[must_use]
    pub fn new(config: &TrackerConfig) -> Self {
        Self::with_factory(config, create_state)
    }

    fn with_factory(config: &TrackerConfig, factory: StateFactory) -> Self {
        Self {
            state: factory(OcrStateId::BeforeGame, config),
            record: GameRecord::new(),
            config: config.clone(),
            factory,
            frames: 0,
        }
    }

    #[must_use]
    pub fn state_id(&self) -> OcrStateId {
        self.state.id()
    }

    #[must_use]
    pub fn record(&self) -> &GameRecord {
        &self.record
    }

    #[must_use]
    pub fn into_record(self) -> GameRecord {
        self.record
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state_id().is_terminal()
    }

    /// Number of frames handed to a state so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Feeds the next frame to the current state and applies its transition.
    ///
    /// Returns the state after the frame. On a [`SampleError`] the frame is
    /// abandoned: the record and the current state are unchanged and the
    /// caller decides whether to continue with the next frame.
    pub fn advance(&mut self, frame: &mut OcrFrame<'_>) -> Result<OcrStateId, SampleError> {
        let from = self.state.id();
        if from.is_terminal() {
            return Ok(from);
        }
        self.frames += 1;

        let Some(to) = self.state.advance_frame(&mut self.record, frame)? else {
            return Ok(from);
        };
        if !from.can_transition_to(to) {
            panic!("{}", IllegalTransition { from, to });
        }
        debug!(%from, %to, frame = self.frames, "state transition");
        self.state = (self.factory)(to, &self.config);
        Ok(to)
    }
}
