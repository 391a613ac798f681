// pixconv/src/processors/resizer.rs
use image::{imageops::FilterType, DynamicImage};

/// Scales images to a square edge length. Aspect ratio is not preserved.
pub struct Resizer {
    filter: FilterType,
}

impl Resizer {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Lanczos3,
        }
    }

    pub fn resize_square(&self, image: DynamicImage, size: u32) -> DynamicImage {
        if image.width() == size && image.height() == size {
            log::debug!("Image already {}x{}, skipping resize", size, size);
            return image;
        }

        log::debug!(
            "Resizing image from {}x{} to {}x{}",
            image.width(),
            image.height(),
            size,
            size
        );

        image.resize_exact(size, size, self.filter)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}
