use crate::error::OcrError;
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Scale down any image wider than `max_width`, preserving aspect ratio
/// Identity for images already within bounds
pub fn cap_width(image: DynamicImage, max_width: u32) -> Result<DynamicImage, OcrError> {
    let (width, height) = image.dimensions();
    if width <= max_width {
        return Ok(image);
    }

    let scale = max_width as f32 / width as f32;
    let new_height = ((height as f32 * scale) as u32).max(1);

    Ok(image.resize_exact(max_width, new_height, FilterType::CatmullRom))
}

/// Upsample by a factor with smooth interpolation, enlarging small glyphs
/// to a size the recognizer resolves reliably
pub fn scale_up(image: DynamicImage, factor: f32) -> Result<DynamicImage, OcrError> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(OcrError::Configuration(format!(
            "scale factor must be positive and finite, got {}",
            factor
        )));
    }

    let (width, height) = image.dimensions();
    let new_width = ((width as f32 * factor) as u32).max(1);
    let new_height = ((height as f32 * factor) as u32).max(1);

    Ok(image.resize_exact(new_width, new_height, FilterType::CatmullRom))
}
