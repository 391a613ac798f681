// pixconv/src/processors/compressor.rs
use crate::core::{ConvertError, OutputFormat, Result};
use crate::utils::format_file_size;
use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use oxipng::{optimize_from_memory, Options};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

pub struct Compressor {
    quality: u8,
    optimize_png: bool,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.min(100),
            optimize_png: false,
        }
    }

    pub fn with_png_optimization(mut self, optimize: bool) -> Self {
        self.optimize_png = optimize;
        self
    }

    pub fn save(&self, image: &DynamicImage, path: &Path, format: OutputFormat) -> Result<()> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let bytes = self.compress_to_bytes(image, format)?;

        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(&bytes)?;
        writer.flush()?;

        log::debug!(
            "Saved image: {} ({})",
            path.display(),
            format_file_size(bytes.len() as u64)
        );
        Ok(())
    }

    /// Encodes fully in memory so a failed encode never leaves a truncated file behind.
    pub fn compress_to_bytes(&self, image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel and no 16-bit mode.
                let rgb = DynamicImage::ImageRgb8(image.to_rgb8());
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality.max(1));
                rgb.write_with_encoder(encoder)?;
            }
            OutputFormat::Png => {
                to_integer(image).write_to(&mut buffer, format.image_format())?;
                if self.optimize_png {
                    return self.optimize_png_bytes(&buffer.into_inner());
                }
            }
            OutputFormat::Tiff => {
                // No gray+alpha layout in the TIFF encoder.
                let image = match image.color() {
                    ColorType::La8 => Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8())),
                    ColorType::La16 => Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16())),
                    _ => to_integer(image),
                };
                image.write_to(&mut buffer, format.image_format())?;
            }
            OutputFormat::Gif => {
                let rgba = DynamicImage::ImageRgba8(image.to_rgba8());
                rgba.write_to(&mut buffer, format.image_format())?;
            }
            OutputFormat::WebP | OutputFormat::Bmp => {
                to_8bit(image).write_to(&mut buffer, format.image_format())?;
            }
        }

        Ok(buffer.into_inner())
    }

    fn optimize_png_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        optimize_from_memory(data, &Options::default())
            .map_err(|e| ConvertError::ProcessingError(format!("PNG optimization failed: {}", e)))
    }
}

/// Float pixels become 16-bit; PNG and TIFF have no float layout here.
fn to_integer(image: &DynamicImage) -> Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::Rgb32F => Cow::Owned(DynamicImage::ImageRgb16(image.to_rgb16())),
        ColorType::Rgba32F => Cow::Owned(DynamicImage::ImageRgba16(image.to_rgba16())),
        _ => Cow::Borrowed(image),
    }
}

/// These encoders only take 8-bit channels.
fn to_8bit(image: &DynamicImage) -> DynamicImage {
    match image.color() {
        ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => image.clone(),
        color if color.has_alpha() => DynamicImage::ImageRgba8(image.to_rgba8()),
        _ => DynamicImage::ImageRgb8(image.to_rgb8()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(4, 4, Rgba([200, 40, 10, 128])))
    }

    #[test]
    fn jpeg_accepts_alpha_input() {
        let bytes = Compressor::new(80)
            .compress_to_bytes(&sample(), OutputFormat::Jpeg)
            .unwrap();

        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn jpeg_quality_zero_still_encodes() {
        let bytes = Compressor::new(0)
            .compress_to_bytes(&sample(), OutputFormat::Jpeg)
            .unwrap();

        assert!(!bytes.is_empty());
    }

    #[test]
    fn optimized_png_is_still_png() {
        let bytes = Compressor::new(100)
            .with_png_optimization(true)
            .compress_to_bytes(&sample(), OutputFormat::Png)
            .unwrap();

        assert_eq!(&bytes[1..4], b"PNG");
    }

    #[test]
    fn gray_alpha_encodes_as_tiff() {
        let gray = image::GrayAlphaImage::from_pixel(5, 3, image::LumaA([90, 200]));
        let bytes = Compressor::new(100)
            .compress_to_bytes(&DynamicImage::ImageLumaA8(gray), OutputFormat::Tiff)
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
        assert_eq!(decoded.color(), ColorType::Rgba8);
    }

    #[test]
    fn float_input_encodes_as_sixteen_bit_png() {
        let float = image::Rgb32FImage::from_pixel(4, 2, image::Rgb([0.25, 0.5, 1.0]));
        let bytes = Compressor::new(100)
            .compress_to_bytes(&DynamicImage::ImageRgb32F(float), OutputFormat::Png)
            .unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb16);
        assert_eq!((decoded.width(), decoded.height()), (4, 2));
    }

    #[test]
    fn float_alpha_input_encodes_as_tiff() {
        let float = image::Rgba32FImage::from_pixel(2, 2, image::Rgba([1.0, 0.0, 0.5, 0.75]));
        let bytes = Compressor::new(100)
            .compress_to_bytes(&DynamicImage::ImageRgba32F(float), OutputFormat::Tiff)
            .unwrap();

        assert!(image::load_from_memory(&bytes).is_ok());
    }

    #[test]
    fn sixteen_bit_input_is_narrowed_for_bmp() {
        let wide: ImageBuffer<image::Rgb<u16>, Vec<u16>> =
            ImageBuffer::from_pixel(3, 3, image::Rgb([65535, 0, 1000]));
        let image = DynamicImage::ImageRgb16(wide);

        let bytes = Compressor::new(100)
            .compress_to_bytes(&image, OutputFormat::Bmp)
            .unwrap();

        assert_eq!(&bytes[..2], b"BM");
    }
}
