// THEORY:
// The `hsv` module is the ingestion boundary of the detection pipeline. A laser
// dot is easiest to isolate in HSV space: its hue is narrow, its saturation is
// high, and its value is near the sensor ceiling, while each of those three
// properties smears across all of R, G, and B. This module converts an RGB
// frame into three independent single-channel images, one per HSV component,
// which the rest of the pipeline thresholds and composites separately.
//
// Key architectural principles:
// 1.  **OpenCV 8-bit convention**: Hue is stored as degrees halved (0-179) so
//     that the well-known threshold constants for a red laser carry over
//     unchanged. Saturation and value occupy the full 0-255 range.
// 2.  **Per-frame ownership**: The channel images are freshly allocated for
//     each frame and handed to the caller. Nothing here is cached between
//     frames; the split is a pure function of the input frame.
// 3.  **Diagnostic re-merge**: `merge_channels` packs three single-channel
//     images back into one three-channel image. The pipeline uses it to expose
//     the post-threshold channels as a single false-color diagnostic view.

use image::{GrayImage, Luma, Rgb, RgbImage};

/// Converts one RGB pixel to HSV using the OpenCV 8-bit convention:
/// hue in 0-179 (degrees halved), saturation and value in 0-255.
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let value = rf.max(gf).max(bf);
    let minimum = rf.min(gf).min(bf);
    let chroma = value - minimum;

    let saturation = if value == 0.0 {
        0.0
    } else {
        255.0 * chroma / value
    };

    let hue_degrees = if chroma == 0.0 {
        0.0
    } else if value == rf {
        60.0 * (gf - bf) / chroma
    } else if value == gf {
        120.0 + 60.0 * (bf - rf) / chroma
    } else {
        240.0 + 60.0 * (rf - gf) / chroma
    };
    let hue_degrees = if hue_degrees < 0.0 {
        hue_degrees + 360.0
    } else {
        hue_degrees
    };

    let hue = ((hue_degrees / 2.0).round() as u16 % 180) as u8;
    (hue, saturation.round() as u8, value as u8)
}

/// Splits a frame into its hue, saturation, and value channel images.
pub fn split_channels(frame: &RgbImage) -> (GrayImage, GrayImage, GrayImage) {
    let (width, height) = frame.dimensions();
    let mut hue = GrayImage::new(width, height);
    let mut saturation = GrayImage::new(width, height);
    let mut value = GrayImage::new(width, height);

    for (x, y, pixel) in frame.enumerate_pixels() {
        let Rgb([r, g, b]) = *pixel;
        let (h, s, v) = rgb_to_hsv(r, g, b);
        hue.put_pixel(x, y, Luma([h]));
        saturation.put_pixel(x, y, Luma([s]));
        value.put_pixel(x, y, Luma([v]));
    }

    (hue, saturation, value)
}

/// Recombines three single-channel images into one three-channel image.
/// All inputs must share the same dimensions.
pub fn merge_channels(first: &GrayImage, second: &GrayImage, third: &GrayImage) -> RgbImage {
    debug_assert_eq!(first.dimensions(), second.dimensions());
    debug_assert_eq!(first.dimensions(), third.dimensions());

    RgbImage::from_fn(first.width(), first.height(), |x, y| {
        Rgb([
            first.get_pixel(x, y)[0],
            second.get_pixel(x, y)[0],
            third.get_pixel(x, y)[0],
        ])
    })
}
