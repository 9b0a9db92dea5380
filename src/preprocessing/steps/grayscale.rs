use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Convert image to grayscale using BT.601 luma weights
/// Integer arithmetic keeps repeated application exact
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let rgb = image.to_rgb8();
    let gray = GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([luma(r, g, b)])
    });
    Ok(DynamicImage::ImageLuma8(gray))
}

/// Perceptual intensity: 0.299 R + 0.587 G + 0.114 B, in thousandths
fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
}
