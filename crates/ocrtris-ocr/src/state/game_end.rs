use ocrtris_engine::GameRecord;

use crate::{SampleError, extractor::OcrFrame};

use super::{OcrState, OcrStateId};

/// The game is over and its record is final.
#[derive(Debug)]
pub(super) struct GameEndState;

impl OcrState for GameEndState {
    fn id(&self) -> OcrStateId {
        OcrStateId::GameEnd
    }

    fn advance_frame(
        &mut self,
        _record: &mut GameRecord,
        _frame: &mut OcrFrame<'_>,
    ) -> Result<Option<OcrStateId>, SampleError> {
        Ok(None)
    }
}
