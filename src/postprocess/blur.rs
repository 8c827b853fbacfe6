//! Gaussian blur.
//!
//! A true Gaussian convolution, applied separably: one horizontal pass and
//! one vertical pass with the same normalized 1D kernel. Edge pixels are
//! extended (clamped sampling), so borders don't darken.

use image::{Rgb, RgbImage};

/// Kernel half-width in standard deviations.
const KERNEL_SIGMAS: f32 = 3.0;

/// Blur an image with a Gaussian of standard deviation `sigma` pixels.
///
/// A non-positive or non-finite `sigma` returns an unmodified copy.
pub fn gaussian_blur(image: &RgbImage, sigma: f32) -> RgbImage {
    if !(sigma.is_finite() && sigma > 0.0) {
        return image.clone();
    }

    let kernel = generate_gaussian_kernel(sigma);
    let half = (kernel.len() / 2) as i32;
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    // Horizontal pass into a float buffer to avoid rounding twice
    let mut horizontal = vec![[0.0f32; 3]; (width * height) as usize];
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sx = (x as i32 + k as i32 - half).clamp(0, width as i32 - 1) as u32;
                let px = image.get_pixel(sx, y);
                for c in 0..3 {
                    acc[c] += px[c] as f32 * weight;
                }
            }
            horizontal[(y * width + x) as usize] = acc;
        }
    }

    let mut output = RgbImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let mut acc = [0.0f32; 3];
            for (k, weight) in kernel.iter().enumerate() {
                let sy = (y as i32 + k as i32 - half).clamp(0, height as i32 - 1) as u32;
                let px = horizontal[(sy * width + x) as usize];
                for c in 0..3 {
                    acc[c] += px[c] * weight;
                }
            }
            output.put_pixel(x, y, Rgb(acc.map(|v| v.round().clamp(0.0, 255.0) as u8)));
        }
    }

    output
}

/// Generate a normalized 1D Gaussian kernel of odd length.
fn generate_gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * KERNEL_SIGMAS).ceil().max(1.0) as i32;
    let sigma2 = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> =
        (-radius..=radius).map(|x| (-((x * x) as f32) / sigma2).exp()).collect();

    let sum: f32 = kernel.iter().sum();
    for w in &mut kernel {
        *w /= sum;
    }

    kernel
}
