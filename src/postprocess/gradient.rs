//! Vertical gradients and source-over compositing onto them.

use image::{Rgb, RgbImage, Rgba, RgbaImage};

/// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
///
/// Channels are rounded to the nearest integer.
pub fn lerp_color(from: Rgb<u8>, to: Rgb<u8>, t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 * (1.0 - t) + b as f64 * t).round() as u8;
    Rgb([mix(from[0], to[0]), mix(from[1], to[1]), mix(from[2], to[2])])
}

/// Full-size image whose rows run from `top` at y = 0 to `bottom` at the last row.
pub fn vertical_gradient(width: u32, height: u32, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
    let span = height.saturating_sub(1).max(1) as f64;
    let mut image = RgbImage::new(width, height);
    for (y, row) in image.enumerate_rows_mut() {
        let color = lerp_color(top, bottom, y as f64 / span);
        for (_, _, px) in row {
            *px = color;
        }
    }
    image
}

/// Composite an RGBA layer over a vertical gradient, returning opaque RGB.
///
/// Uses porter-duff "source over" with the layer's alpha; the gradient is
/// opaque so the output is too.
pub fn composite_gradient(layer: &RgbaImage, top: Rgb<u8>, bottom: Rgb<u8>) -> RgbImage {
    let (width, height) = layer.dimensions();
    let mut output = vertical_gradient(width, height, top, bottom);
    for (x, y, src) in layer.enumerate_pixels() {
        let dst = output.get_pixel_mut(x, y);
        *dst = source_over(src, dst);
    }
    output
}

/// Blend a source pixel over an opaque destination.
fn source_over(src: &Rgba<u8>, dst: &Rgb<u8>) -> Rgb<u8> {
    match src[3] {
        0 => *dst,
        255 => Rgb([src[0], src[1], src[2]]),
        a => {
            let alpha = a as f32 / 255.0;
            let blend = |s: u8, d: u8| {
                (s as f32 * alpha + d as f32 * (1.0 - alpha)).round().clamp(0.0, 255.0) as u8
            };
            Rgb([blend(src[0], dst[0]), blend(src[1], dst[1]), blend(src[2], dst[2])])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOP: Rgb<u8> = Rgb([70, 90, 120]);
    const BOTTOM: Rgb<u8> = Rgb([30, 50, 80]);

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_color(TOP, BOTTOM, 0.0), TOP);
        assert_eq!(lerp_color(TOP, BOTTOM, 1.0), BOTTOM);
        assert_eq!(lerp_color(TOP, BOTTOM, 0.5), Rgb([50, 70, 100]));
    }

    #[test]
    fn test_lerp_clamps_t() {
        assert_eq!(lerp_color(TOP, BOTTOM, -2.0), TOP);
        assert_eq!(lerp_color(TOP, BOTTOM, 7.0), BOTTOM);
    }

    #[test]
    fn test_gradient_endpoints() {
        let img = vertical_gradient(4, 512, TOP, BOTTOM);
        assert_eq!(*img.get_pixel(0, 0), TOP);
        assert_eq!(*img.get_pixel(3, 511), BOTTOM);
    }

    #[test]
    fn test_gradient_rows_are_uniform_and_monotonic() {
        let img = vertical_gradient(8, 64, TOP, BOTTOM);
        let mut last = 255u8;
        for y in 0..64 {
            let first = *img.get_pixel(0, y);
            for x in 1..8 {
                assert_eq!(*img.get_pixel(x, y), first);
            }
            assert!(first[0] <= last);
            last = first[0];
        }
    }

    #[test]
    fn test_gradient_single_row() {
        let img = vertical_gradient(3, 1, TOP, BOTTOM);
        assert_eq!(*img.get_pixel(0, 0), TOP);
    }

    #[test]
    fn test_composite_transparent_shows_gradient() {
        let layer = RgbaImage::new(4, 16);
        let out = composite_gradient(&layer, TOP, BOTTOM);
        assert_eq!(out, vertical_gradient(4, 16, TOP, BOTTOM));
    }

    #[test]
    fn test_composite_opaque_replaces_gradient() {
        let layer = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let out = composite_gradient(&layer, TOP, BOTTOM);
        assert!(out.pixels().all(|p| *p == Rgb([1, 2, 3])));
    }

    #[test]
    fn test_composite_half_alpha_blends() {
        let layer = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 128]));
        let out = composite_gradient(&layer, Rgb([0, 0, 0]), Rgb([0, 0, 0]));
        let v = out.get_pixel(0, 0)[0];
        assert!((127..=129).contains(&v));
    }
}
