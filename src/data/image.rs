use anyhow::{Context, Result};
use image::RgbImage;

use super::model::{ImageArray, PixelBuffer};

// ---------------------------------------------------------------------------
// Image normalization: artifact pixels → 8-bit RGB
// ---------------------------------------------------------------------------

/// Convert an image array to 8-bit RGB.
///
/// Already-8-bit data passes through unchanged. Float data is min-max
/// rescaled to [0, 255] using the array's own observed range, preserving the
/// relative ordering of intensities. A constant float image (min == max)
/// maps to all zeros instead of dividing by zero.
pub fn normalize(image: &ImageArray) -> RgbImage {
    let raw: Vec<u8> = match &image.pixels {
        PixelBuffer::U8(data) => data.clone(),
        PixelBuffer::F32(data) => rescale_to_u8(data),
    };

    // Length invariant (w * h * 3) is enforced at load time.
    RgbImage::from_raw(image.width as u32, image.height as u32, raw)
        .expect("pixel buffer length matches image dimensions")
}

/// Min-max rescale float samples to the full u8 range.
fn rescale_to_u8(data: &[f32]) -> Vec<u8> {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &v in data {
        min = min.min(v);
        max = max.max(v);
    }
    let range = max - min;

    if !range.is_finite() || range <= f32::EPSILON {
        // Constant (or empty) image: defined all-zero output.
        return vec![0; data.len()];
    }

    data.iter()
        .map(|&v| (255.0 * (v - min) / range) as u8)
        .collect()
}

// ---------------------------------------------------------------------------
// PNG encoding for the hover panel
// ---------------------------------------------------------------------------

/// Encode an 8-bit RGB image as PNG bytes suitable for embedding in the UI.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encoding PNG")?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn u8_image(pixels: Vec<u8>, width: usize, height: usize) -> ImageArray {
        ImageArray {
            width,
            height,
            pixels: PixelBuffer::U8(pixels),
        }
    }

    fn f32_image(pixels: Vec<f32>, width: usize, height: usize) -> ImageArray {
        ImageArray {
            width,
            height,
            pixels: PixelBuffer::F32(pixels),
        }
    }

    #[test]
    fn u8_input_passes_through_unchanged() {
        let pixels: Vec<u8> = (0..12).map(|i| i * 20).collect();
        let img = normalize(&u8_image(pixels.clone(), 2, 2));
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(img.as_raw(), &pixels);
    }

    #[test]
    fn f32_input_rescales_into_full_range() {
        // Values far outside [0, 255]; min must land on 0, max on 255.
        let img = normalize(&f32_image(vec![-10.0, 0.0, 5.0, -10.0, 30.0, 12.5], 2, 1));
        let raw = img.as_raw();
        assert_eq!(raw[0], 0);
        assert_eq!(raw[4], 255);
        assert!(raw.iter().all(|&v| v <= 255));
    }

    #[test]
    fn f32_rescale_preserves_intensity_ordering() {
        let samples = vec![0.1_f32, 0.9, 0.4, 0.2, 0.9, 0.7];
        let img = normalize(&f32_image(samples.clone(), 2, 1));
        let raw = img.as_raw();
        for i in 0..samples.len() {
            for j in 0..samples.len() {
                if samples[i] < samples[j] {
                    assert!(raw[i] <= raw[j], "ordering broken at ({i}, {j})");
                }
            }
        }
    }

    #[test]
    fn constant_f32_image_becomes_all_zero() {
        let img = normalize(&f32_image(vec![3.5; 12], 2, 2));
        assert!(img.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn png_round_trip_is_lossless() {
        let pixels: Vec<u8> = (0..27).map(|i| (i * 9) as u8).collect();
        let img = normalize(&u8_image(pixels, 3, 3));

        let png = encode_png(&img).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), img.dimensions());
        assert_eq!(decoded.as_raw(), img.as_raw());
    }
}
