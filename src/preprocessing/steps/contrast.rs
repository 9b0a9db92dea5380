use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Adjust contrast around the intensity midpoint
/// Factor 1.0 is identity; above 1.0 increases contrast, below decreases
pub fn apply(image: DynamicImage, factor: f32) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let adjusted = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        let value = gray.get_pixel(x, y).0[0] as f32;
        let stretched = ((value - 128.0) * factor + 128.0) as i32;
        Luma([stretched.clamp(0, 255) as u8])
    });
    Ok(DynamicImage::ImageLuma8(adjusted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contrast_factor_one_is_identity() {
        let img = GrayImage::from_fn(16, 16, |x, y| Luma([(x * 16 + y) as u8]));

        let result = apply(DynamicImage::ImageLuma8(img.clone()), 1.0).unwrap();

        assert_eq!(result.to_luma8().as_raw(), img.as_raw());
    }

    #[test]
    fn test_contrast_spreads_around_midpoint() {
        let mut img = GrayImage::from_pixel(4, 1, Luma([128]));
        img.put_pixel(0, 0, Luma([100]));
        img.put_pixel(1, 0, Luma([156]));

        let result = apply(DynamicImage::ImageLuma8(img), 2.0).unwrap().to_luma8();

        // (100 - 128) * 2 + 128 = 72, (156 - 128) * 2 + 128 = 184
        assert_eq!(result.get_pixel(0, 0).0[0], 72);
        assert_eq!(result.get_pixel(1, 0).0[0], 184);
        // Midpoint is a fixed point at any factor
        assert_eq!(result.get_pixel(2, 0).0[0], 128);
    }

    #[test]
    fn test_contrast_clamps_extremes() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([255]));

        let result = apply(DynamicImage::ImageLuma8(img), 3.0).unwrap().to_luma8();

        assert_eq!(result.get_pixel(0, 0).0[0], 0);
        assert_eq!(result.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn test_contrast_below_one_compresses() {
        let mut img = GrayImage::new(2, 1);
        img.put_pixel(0, 0, Luma([0]));
        img.put_pixel(1, 0, Luma([255]));

        let result = apply(DynamicImage::ImageLuma8(img), 0.5).unwrap().to_luma8();

        // (0 - 128) * 0.5 + 128 = 64, (255 - 128) * 0.5 + 128 = 191
        assert_eq!(result.get_pixel(0, 0).0[0], 64);
        assert_eq!(result.get_pixel(1, 0).0[0], 191);
    }
}
