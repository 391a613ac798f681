// pixconv/src/core/processor.rs
use super::{ConversionJob, ConversionStatus, ConvertError, Result};
use crate::processors::{Compressor, Loader, Resizer};
use image::DynamicImage;

/// Largest pixel buffer a single resize may allocate.
pub const MAX_OUTPUT_BYTES: u64 = 1 << 30;

/// Decodes, squares and re-encodes one image per job.
pub struct ImageConverter {
    loader: Loader,
    resizer: Resizer,
    optimize_png: bool,
    max_output_bytes: u64,
}

impl ImageConverter {
    pub fn new(optimize_png: bool) -> Self {
        Self {
            loader: Loader::new(),
            resizer: Resizer::new(),
            optimize_png,
            max_output_bytes: MAX_OUTPUT_BYTES,
        }
    }

    pub fn with_max_output_bytes(mut self, max_output_bytes: u64) -> Self {
        self.max_output_bytes = max_output_bytes;
        self
    }

    /// Runs one job to a terminal status. Failures are returned, never propagated.
    pub fn convert(&self, job: &ConversionJob) -> ConversionStatus {
        if job.should_skip() {
            log::debug!("Output exists, skipping: {}", job.output_path.display());
            return ConversionStatus::Skipped;
        }

        match self.convert_inner(job) {
            Ok(size) => ConversionStatus::Converted { size },
            Err(e) => {
                log::debug!("Conversion failed for {}: {}", job.input_path.display(), e);
                ConversionStatus::Failed(e)
            }
        }
    }

    /// Edge length for this job; 0 resolves to the source's larger dimension.
    pub fn resolve_size(&self, job: &ConversionJob) -> Result<u32> {
        if job.target_size > 0 {
            return Ok(job.target_size);
        }

        let (width, height) = self.loader.dimensions(&job.input_path)?;
        Ok(width.max(height))
    }

    fn convert_inner(&self, job: &ConversionJob) -> Result<u32> {
        let size = self.resolve_size(job)?;

        let image = self.loader.load(&job.input_path)?;
        self.check_output_buffer(&image, size)?;
        let image = self.resizer.resize_square(image, size);

        if let Some(parent) = job.output_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Compressor::new(job.quality)
            .with_png_optimization(self.optimize_png)
            .save(&image, &job.output_path, job.target_format)?;

        Ok(size)
    }

    /// Rejects sizes whose resize buffers would exceed the limit. The filter pass keeps a
    /// `source width x size` buffer of f32 RGBA, and encoders may widen to 4 channels.
    fn check_output_buffer(&self, image: &DynamicImage, size: u32) -> Result<()> {
        let bytes_per_pixel = u64::from(image.color().bytes_per_pixel().max(4));
        let output = u64::from(size)
            .saturating_mul(u64::from(size))
            .saturating_mul(bytes_per_pixel);
        let intermediate = u64::from(image.width())
            .saturating_mul(u64::from(size))
            .saturating_mul(16);
        let needed = output.max(intermediate);

        if needed > self.max_output_bytes {
            return Err(ConvertError::MemoryLimitExceeded(format!(
                "{}x{} output needs {} bytes, limit is {}",
                size, size, needed, self.max_output_bytes
            )));
        }

        Ok(())
    }
}

impl Default for ImageConverter {
    fn default() -> Self {
        Self::new(false)
    }
}
