use crate::error::OcrError;
use image::{DynamicImage, Luma};

/// Smooth noise with a 3x3 box average over interior pixels
/// Border pixels pass through unchanged
pub fn apply(image: DynamicImage) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();

    // Nothing interior to average
    if width < 3 || height < 3 {
        return Ok(DynamicImage::ImageLuma8(gray));
    }

    let mut out = gray.clone();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sum = 0u32;
            for dy in -1i32..=1 {
                for dx in -1i32..=1 {
                    let px = (x as i32 + dx) as u32;
                    let py = (y as i32 + dy) as u32;
                    sum += gray.get_pixel(px, py).0[0] as u32;
                }
            }
            out.put_pixel(x, y, Luma([(sum / 9) as u8]));
        }
    }

    Ok(DynamicImage::ImageLuma8(out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_denoise_flattens_isolated_speckle() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([100]));
        img.put_pixel(4, 4, Luma([255]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap().to_luma8();

        // (8 * 100 + 255) / 9 = 117
        assert_eq!(result.get_pixel(4, 4).0[0], 117);
        // Far-away pixels stay at the background value
        assert_eq!(result.get_pixel(1, 1).0[0], 100);
    }

    #[test]
    fn test_denoise_leaves_border_unchanged() {
        let mut img = GrayImage::from_pixel(5, 5, Luma([100]));
        img.put_pixel(0, 0, Luma([255]));
        img.put_pixel(4, 2, Luma([0]));

        let result = apply(DynamicImage::ImageLuma8(img)).unwrap().to_luma8();

        assert_eq!(result.get_pixel(0, 0).0[0], 255);
        assert_eq!(result.get_pixel(4, 2).0[0], 0);
    }

    #[test]
    fn test_denoise_small_image_is_identity() {
        let img = GrayImage::from_fn(2, 2, |x, y| Luma([(x * 100 + y * 50) as u8]));

        let result = apply(DynamicImage::ImageLuma8(img.clone())).unwrap();

        assert_eq!(result.to_luma8().as_raw(), img.as_raw());
    }
}
