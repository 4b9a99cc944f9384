use std::path::PathBuf;

use anyhow::Context as _;
use ocrtris_engine::{Board, PieceKind, PlacedPiece};
use ocrtris_ocr::{NextGrid, OcrFrame, SampleError};
use serde::Serialize;

use crate::util::{self, OcrArg, Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct InspectArg {
    #[clap(flatten)]
    ocr: OcrArg,
    /// Captured frame to inspect
    frame: PathBuf,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Every feature of one frame, with `null` for unrecognized values.
#[derive(Debug, Serialize)]
struct FrameFeatures {
    board_noise: f64,
    board: Board,
    board_only_piece: Option<PlacedPiece>,
    next_grid: Vec<String>,
    next_piece: Option<PieceKind>,
    level: Option<u32>,
}

impl FrameFeatures {
    fn extract(frame: &mut OcrFrame<'_>) -> Result<Self, SampleError> {
        Ok(Self {
            board_noise: frame.board_noise()?,
            board: frame.binary_board()?.clone(),
            board_only_piece: frame.board_only_piece()?.recognized(),
            next_grid: grid_rows(frame.next_grid()?),
            next_piece: frame.next_piece()?.recognized(),
            level: frame.level()?.recognized(),
        })
    }
}

fn grid_rows(grid: &NextGrid) -> Vec<String> {
    (0..NextGrid::HEIGHT)
        .map(|y| {
            (0..NextGrid::WIDTH)
                .map(|x| if grid.get(x, y) { 'X' } else { '.' })
                .collect()
        })
        .collect()
}

pub(crate) fn run(arg: &InspectArg) -> anyhow::Result<()> {
    let config = arg.ocr.load_config()?;
    let context = arg.ocr.load_context(&config)?;
    let image = util::open_image(&arg.frame)?;

    let features = FrameFeatures::extract(&mut context.frame(&image))
        .with_context(|| format!("Failed to read frame: {}", arg.frame.display()))?;
    Output::save_json(&features, arg.output.clone())
}
