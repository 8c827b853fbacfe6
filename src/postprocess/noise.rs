//! Per-pixel brightness noise.

use crate::rng::DrawRng;
use image::RgbImage;

/// Largest brightness offset a noisy pixel can receive, in either direction.
pub const NOISE_AMPLITUDE: i32 = 20;

/// Add brightness jitter to a random subset of pixels.
///
/// Pixels are visited column by column (x outer, y inner). Each visit draws
/// one float; when it falls below `intensity` a second draw picks an offset
/// in `[-20, 20]` that is added to R, G and B alike, clamped to `[0, 255]`.
///
/// `intensity` is clamped to `[0, 1]`. Every pixel consumes a draw even at
/// intensity 0, so the draw count depends only on the image size and the
/// pixels selected.
pub fn inject_noise(image: &mut RgbImage, intensity: f64, rng: &mut DrawRng) {
    let intensity = intensity.clamp(0.0, 1.0);
    let (width, height) = image.dimensions();

    for x in 0..width {
        for y in 0..height {
            if rng.draw_float() < intensity {
                let noise = rng.draw_int(-NOISE_AMPLITUDE, NOISE_AMPLITUDE);
                let px = image.get_pixel_mut(x, y);
                for channel in px.0.iter_mut() {
                    *channel = (*channel as i32 + noise).clamp(0, 255) as u8;
                }
            }
        }
    }
}
