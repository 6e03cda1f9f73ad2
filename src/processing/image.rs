use std::io::Cursor;

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat};
use imageproc::contrast::equalize_histogram;

use crate::utils::CardAuthError;

/// Default bound on the processed image width. Card photos from phones are
/// routinely 3000+ pixels wide; recognition gains nothing past this.
pub const DEFAULT_MAX_WIDTH: u32 = 1200;

/// ImagePreprocessor normalizes an uploaded card photo into a canonical
/// form for text recognition: size-bounded, grayscale, histogram-equalized,
/// sharpened, PNG-encoded.
pub struct ImagePreprocessor;

impl ImagePreprocessor {
    /// Preprocess raw upload bytes for OCR. The original bytes are left
    /// untouched; on any decode or encode failure no partial output is
    /// produced.
    pub fn preprocess(image_bytes: &[u8], max_width: u32) -> Result<Vec<u8>, CardAuthError> {
        let image = image::load_from_memory(image_bytes)
            .map_err(|e| CardAuthError::ImageProcessing(format!("failed to load image: {}", e)))?;

        let (width, height) = (image.width(), image.height());
        log::debug!("card image loaded: {}x{}", width, height);

        // Shrink to the width bound, never upscale. Bounding the height by
        // its own value leaves the width constraint in charge.
        let image = if width > max_width {
            image.resize(max_width, height, FilterType::Lanczos3)
        } else {
            image
        };

        let grayscale = image.to_luma8();
        let equalized = equalize_histogram(&grayscale);
        let sharpened = imageops::unsharpen(&equalized, 1.2, 4);

        let processed = DynamicImage::ImageLuma8(sharpened);
        let mut buffer = Vec::new();
        processed
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| {
                CardAuthError::ImageProcessing(format!("failed to encode processed image: {}", e))
            })?;

        log::debug!(
            "preprocessing complete: {}x{} -> {} bytes",
            processed.width(),
            processed.height(),
            buffer.len()
        );
        Ok(buffer)
    }
}
