use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context;
use ocrtris_ocr::{BitmapDigits, Calibration, DigitClassifier, NoDigits, OcrContext, TrackerConfig};

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

pub fn read_json_file<T, P>(file_kind: &str, path: P) -> anyhow::Result<T>
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} file: {}", file_kind, path.display()))?;

    let reader = io::BufReader::new(file);
    let value = serde_json::from_reader(reader).with_context(|| {
        format!(
            "Failed to parse {} JSON file: {}",
            file_kind,
            path.display()
        )
    })?;

    Ok(value)
}

/// Options shared by every command that reads frames.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct OcrArg {
    /// Calibration JSON file with the board, next and level rectangles
    #[arg(long)]
    calibration: PathBuf,
    /// Tracker config JSON file; omitted values keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Do not read the level display
    #[arg(long)]
    no_level: bool,
}

impl OcrArg {
    pub(crate) fn load_config(&self) -> anyhow::Result<TrackerConfig> {
        match &self.config {
            Some(path) => read_json_file("tracker config", path),
            None => Ok(TrackerConfig::default()),
        }
    }

    pub(crate) fn load_context(&self, config: &TrackerConfig) -> anyhow::Result<OcrContext> {
        let calibration: Calibration = read_json_file("calibration", &self.calibration)?;
        let digits: Box<dyn DigitClassifier> = if self.no_level {
            Box::new(NoDigits)
        } else {
            Box::new(BitmapDigits::new(
                config.level_digits,
                config.digit_brightness_threshold,
                config.max_digit_distance,
            ))
        };
        OcrContext::new(calibration, config, digits).with_context(|| {
            format!("Invalid calibration file: {}", self.calibration.display())
        })
    }
}

pub(crate) fn open_image(path: &Path) -> anyhow::Result<image::RgbImage> {
    let image = image::open(path)
        .with_context(|| format!("Failed to decode image: {}", path.display()))?;
    Ok(image.to_rgb8())
}
