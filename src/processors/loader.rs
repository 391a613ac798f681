// pixconv/src/processors/loader.rs
use crate::core::{ConvertError, Result};
use image::{DynamicImage, GenericImageView, ImageReader};
use std::path::Path;

#[derive(Clone, Default)]
pub struct Loader;

impl Loader {
    pub fn new() -> Self {
        Self
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| {
                ConvertError::ProcessingError(format!(
                    "Failed to decode {}: {}",
                    path.display(),
                    e
                ))
            })?;

        let (width, height) = image.dimensions();
        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    /// Reads only the header to get the pixel dimensions.
    pub fn dimensions(&self, path: &Path) -> Result<(u32, u32)> {
        let dimensions = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()?;

        Ok(dimensions)
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        let metadata = path.metadata()?;
        if metadata.len() == 0 {
            return Err(ConvertError::ProcessingError(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}
