use std::path::PathBuf;

use ocrtris_engine::GameRecord;
use ocrtris_ocr::{FrameSource as _, OcrStateId, OcrStateMachine};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    source::ImageDirSource,
    util::{OcrArg, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TrackArg {
    #[clap(flatten)]
    ocr: OcrArg,
    /// Directory of captured frames, read in file name order
    #[arg(long)]
    frames: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct TrackReport {
    state: OcrStateId,
    frames_read: u64,
    frames_skipped: u64,
    record: GameRecord,
}

pub(crate) fn run(arg: &TrackArg) -> anyhow::Result<()> {
    let config = arg.ocr.load_config()?;
    let context = arg.ocr.load_context(&config)?;
    let mut source = ImageDirSource::open(&arg.frames)?;
    info!(frames = source.len(), dir = %arg.frames.display(), "tracking game");

    let mut machine = OcrStateMachine::new(&config);
    let mut frames_read = 0;
    let mut frames_skipped = 0;
    while !machine.is_finished() {
        let Some(image) = source.next_frame()? else {
            break;
        };
        frames_read += 1;
        // An unreadable frame is dropped; the game carries on with the next one
        if let Err(err) = machine.advance(&mut context.frame(&image)) {
            frames_skipped += 1;
            warn!(frame = frames_read, %err, "skipping frame");
        }
    }

    let state = machine.state_id();
    if !state.is_terminal() {
        warn!(%state, "frames ran out before the game ended");
    }
    let record = machine.into_record();
    info!(
        %state,
        frames_read,
        frames_skipped,
        score = record.score(),
        lines = record.lines(),
        "tracking finished"
    );

    let report = TrackReport {
        state,
        frames_read,
        frames_skipped,
        record,
    };
    Output::save_json(&report, arg.output.clone())
}
