use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Black/white conversion against one global cutoff
pub fn apply(image: DynamicImage, threshold: u8) -> Result<DynamicImage, OcrError> {
    let gray = image.to_luma8();
    let binarized = GrayImage::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y).0[0] > threshold {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });
    Ok(DynamicImage::ImageLuma8(binarized))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binarize_splits_at_threshold() {
        let mut img = GrayImage::new(3, 1);
        img.put_pixel(0, 0, Luma([128]));
        img.put_pixel(1, 0, Luma([129]));
        img.put_pixel(2, 0, Luma([0]));

        let result = apply(DynamicImage::ImageLuma8(img), 128).unwrap().to_luma8();

        // Strictly-greater comparison: the threshold value itself goes black
        assert_eq!(result.get_pixel(0, 0).0[0], 0);
        assert_eq!(result.get_pixel(1, 0).0[0], 255);
        assert_eq!(result.get_pixel(2, 0).0[0], 0);
    }
}
