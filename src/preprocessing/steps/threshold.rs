use crate::error::OcrError;
use image::{DynamicImage, GrayImage, Luma};

/// Apply adaptive thresholding against the local-window mean
/// Handles uneven lighting better than a single global cutoff
pub fn apply(image: DynamicImage, window: u32) -> Result<DynamicImage, OcrError> {
    if window == 0 {
        return Err(OcrError::Configuration(
            "adaptive threshold window must be greater than 0".to_string(),
        ));
    }
    let gray = image.to_luma8();
    let binarized = adaptive_threshold(&gray, window);
    Ok(DynamicImage::ImageLuma8(binarized))
}

/// For each pixel: white if its intensity exceeds the mean over a
/// window x window neighborhood (edge-clamped), else black.
fn adaptive_threshold(img: &GrayImage, window: u32) -> GrayImage {
    let (width, height) = img.dimensions();
    let half = window as i32 / 2;

    // Integral image makes every window mean O(1)
    let integral = compute_integral_image(img);

    GrayImage::from_fn(width, height, |x, y| {
        let x1 = (x as i32 - half).max(0) as u32;
        let y1 = (y as i32 - half).max(0) as u32;
        let x2 = (x as i32 + half).min(width as i32 - 1) as u32;
        let y2 = (y as i32 + half).min(height as i32 - 1) as u32;

        let mean = window_mean(&integral, x1, y1, x2, y2);

        let pixel = img.get_pixel(x, y).0[0] as f64;
        if pixel > mean {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Summed-area table with a zero row/column of padding
fn compute_integral_image(img: &GrayImage) -> Vec<Vec<f64>> {
    let (width, height) = img.dimensions();
    let mut integral = vec![vec![0.0f64; width as usize + 1]; height as usize + 1];

    for y in 0..height as usize {
        for x in 0..width as usize {
            let val = img.get_pixel(x as u32, y as u32).0[0] as f64;
            integral[y + 1][x + 1] =
                val + integral[y][x + 1] + integral[y + 1][x] - integral[y][x];
        }
    }

    integral
}

fn window_mean(integral: &[Vec<f64>], x1: u32, y1: u32, x2: u32, y2: u32) -> f64 {
    let (x1, y1, x2, y2) = (x1 as usize, y1 as usize, x2 as usize + 1, y2 as usize + 1);
    let area = ((x2 - x1) * (y2 - y1)) as f64;
    let sum = integral[y2][x2] - integral[y1][x2] - integral[y2][x1] + integral[y1][x1];
    sum / area
}
