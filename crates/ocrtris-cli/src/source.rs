use std::{
    fs,
    path::{Path, PathBuf},
    vec,
};

use anyhow::Context;
use image::RgbImage;
use ocrtris_ocr::FrameSource;
use tracing::trace;

use crate::util;

const IMAGE_EXTENSIONS: [&str; 2] = ["png", "bmp"];

/// Frames stored as numbered image files in one directory.
///
/// Files are read in file name order, so captures should be named with
/// zero-padded frame numbers.
#[derive(Debug)]
pub(crate) struct ImageDirSource {
    paths: vec::IntoIter<PathBuf>,
}

impl ImageDirSource {
    pub(crate) fn open(dir: &Path) -> anyhow::Result<Self> {
        let entries = fs::read_dir(dir)
            .with_context(|| format!("Failed to read frame directory: {}", dir.display()))?;
        let mut paths = vec![];
        for entry in entries {
            let path = entry
                .with_context(|| format!("Failed to read frame directory: {}", dir.display()))?
                .path();
            if is_image(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(Self {
            paths: paths.into_iter(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.paths.len()
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| ext.eq_ignore_ascii_case(known))
        })
}

impl FrameSource for ImageDirSource {
    type Frame = RgbImage;
    type Error = anyhow::Error;

    fn next_frame(&mut self) -> Result<Option<RgbImage>, anyhow::Error> {
        let Some(path) = self.paths.next() else {
            return Ok(None);
        };
        trace!(path = %path.display(), "loading frame");
        util::open_image(&path).map(Some)
    }
}
