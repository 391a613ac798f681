// pixconv/src/core/mod.rs
pub mod processor;

use image::ImageFormat;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Encodings the converter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
    WebP,
    Gif,
    Bmp,
    Tiff,
}

impl OutputFormat {
    /// Resolves a lower-cased format name such as `png` or `jpg`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "webp" => Some(Self::WebP),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            "tif" | "tiff" => Some(Self::Tiff),
            _ => None,
        }
    }

    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Png => ImageFormat::Png,
            Self::Jpeg => ImageFormat::Jpeg,
            Self::WebP => ImageFormat::WebP,
            Self::Gif => ImageFormat::Gif,
            Self::Bmp => ImageFormat::Bmp,
            Self::Tiff => ImageFormat::Tiff,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConvertConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Target format name, lower-cased. Also used verbatim as the output extension.
    pub format: String,
    pub quality: u8,
    /// Edge length of the square output; 0 means the source's larger dimension.
    pub size: u32,
    /// Accepted for compatibility, not applied to the pixel data.
    pub mode: String,
    pub recursive: bool,
    pub overwrite: bool,
    pub optimize_png: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            format: "png".to_string(),
            quality: 100,
            size: 0,
            mode: "RGB".to_string(),
            recursive: false,
            overwrite: false,
            optimize_png: false,
        }
    }
}

impl ConvertConfig {
    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::from_name(&self.format)
            .ok_or_else(|| ConvertError::UnsupportedFormat(self.format.clone()))
    }

    /// Fatal checks that stop the batch before any file is touched.
    pub fn validate(&self) -> Result<OutputFormat> {
        if !self.input_dir.is_dir() {
            return Err(ConvertError::InputDirMissing(self.input_dir.clone()));
        }

        self.output_format()
    }
}

/// One file's worth of work, built from an enumerated input path.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub target_format: OutputFormat,
    pub quality: u8,
    pub target_size: u32,
    pub overwrite: bool,
}

impl ConversionJob {
    pub fn new(input_path: &Path, config: &ConvertConfig, format: OutputFormat) -> Result<Self> {
        let output_path = crate::utils::map_output_path(
            input_path,
            &config.input_dir,
            &config.output_dir,
            &config.format,
        )?;

        Ok(Self {
            input_path: input_path.to_path_buf(),
            output_path,
            target_format: format,
            quality: config.quality,
            target_size: config.size,
            overwrite: config.overwrite,
        })
    }

    /// True when the job must not touch an existing output file.
    pub fn should_skip(&self) -> bool {
        !self.overwrite && self.output_path.exists()
    }
}

#[derive(Debug)]
pub enum ConversionStatus {
    Converted { size: u32 },
    Skipped,
    Failed(ConvertError),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, status: &ConversionStatus) {
        match status {
            ConversionStatus::Converted { .. } => self.converted += 1,
            ConversionStatus::Skipped => self.skipped += 1,
            ConversionStatus::Failed(_) => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.converted + self.skipped + self.failed
    }
}

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Input directory does not exist: {}", .0.display())]
    InputDirMissing(PathBuf),

    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Processing error: {0}")]
    ProcessingError(String),

    #[error("Memory limit exceeded: {0}")]
    MemoryLimitExceeded(String),
}

impl ConvertError {
    /// Errors that abort the whole batch rather than a single file.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InputDirMissing(_) | Self::UnsupportedFormat(_))
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_names_resolve() {
        assert_eq!(OutputFormat::from_name("png"), Some(OutputFormat::Png));
        assert_eq!(OutputFormat::from_name("jpg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("jpeg"), Some(OutputFormat::Jpeg));
        assert_eq!(OutputFormat::from_name("tif"), Some(OutputFormat::Tiff));
        assert_eq!(OutputFormat::from_name("bmp2"), None);
        assert_eq!(OutputFormat::from_name("PNG"), None);
    }

    #[test]
    fn missing_input_dir_is_precondition() {
        let config = ConvertConfig {
            input_dir: PathBuf::from("/definitely/not/here"),
            ..Default::default()
        };

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConvertError::InputDirMissing(_)));
        assert!(err.is_precondition());
    }

    #[test]
    fn summary_counts_each_status() {
        let mut summary = BatchSummary::default();
        summary.record(&ConversionStatus::Converted { size: 4 });
        summary.record(&ConversionStatus::Skipped);
        summary.record(&ConversionStatus::Failed(ConvertError::ProcessingError(
            "boom".to_string(),
        )));

        assert_eq!(summary.converted, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 3);
    }
}
