use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Invert intensities, turning light-on-dark captures into dark-on-light
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let inverted = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        Luma([255 - gray.get_pixel(x, y).0[0]])
    });
    Ok(DynamicImage::ImageLuma8(inverted))
}
