use crate::error::OcrError;
use image::DynamicImage;
use imageproc::filter::filter3x3;

/// Sharpen edges with a 3x3 Laplacian kernel, making strokes more distinct
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();

    // Center 5, orthogonal neighbors -1; results clamp to [0, 255]
    let kernel: [f32; 9] = [0.0, -1.0, 0.0, -1.0, 5.0, -1.0, 0.0, -1.0, 0.0];

    let sharpened = filter3x3(&gray, &kernel);
    Ok(DynamicImage::ImageLuma8(sharpened))
}
