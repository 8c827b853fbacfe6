//! Title and subtitle overlay.
//!
//! Text goes through the [`TextRenderer`] trait so a real font backend can be
//! plugged in. The crate ships [`BitmapFont`], a built-in 5x7 face scaled up
//! for the two sizes, which is also what callers fall back to.

use image::{Rgb, RgbImage};

/// Glyph cell size of the built-in face, before scaling.
const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
const GLYPH_SPACING: u32 = 1;

/// Distance between the bottom of the title and the bottom edge.
const TITLE_BOTTOM_MARGIN: i32 = 30;
const SUBTITLE_GAP: i32 = 5;

const SHADOW: Rgb<u8> = Rgb([0, 0, 0]);
const TITLE_COLOR: Rgb<u8> = Rgb([255, 255, 255]);
const SUBTITLE_COLOR: Rgb<u8> = Rgb([200, 200, 200]);

/// The two faces used by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Large,
    Small,
}

/// Something that can measure and draw a line of text onto an RGB image.
pub trait TextRenderer {
    /// Width and height of the rendered text's bounding box.
    fn measure(&self, text: &str, size: FontSize) -> (u32, u32);

    /// Draw text with its top-left corner at `origin`. Pixels outside the
    /// image are skipped.
    fn draw(&self, image: &mut RgbImage, origin: (i32, i32), text: &str, size: FontSize, color: Rgb<u8>);
}

/// Built-in uppercase bitmap face.
///
/// Lowercase letters render with their uppercase glyph; characters without a
/// glyph render as `?`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl BitmapFont {
    fn scale(size: FontSize) -> u32 {
        match size {
            FontSize::Large => 3,
            FontSize::Small => 2,
        }
    }
}

impl TextRenderer for BitmapFont {
    fn measure(&self, text: &str, size: FontSize) -> (u32, u32) {
        let scale = Self::scale(size);
        let count = text.chars().count() as u32;
        if count == 0 {
            return (0, 0);
        }
        let width = count * (GLYPH_WIDTH + GLYPH_SPACING) * scale - GLYPH_SPACING * scale;
        (width, GLYPH_HEIGHT * scale)
    }

    fn draw(&self, image: &mut RgbImage, origin: (i32, i32), text: &str, size: FontSize, color: Rgb<u8>) {
        let scale = Self::scale(size) as i32;
        let advance = (GLYPH_WIDTH + GLYPH_SPACING) as i32 * scale;
        let (width, height) = (image.width() as i32, image.height() as i32);

        for (i, ch) in text.chars().enumerate() {
            let rows = glyph(ch);
            let gx = origin.0 + i as i32 * advance;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH as i32 {
                    if bits & (1 << (GLYPH_WIDTH as i32 - 1 - col)) == 0 {
                        continue;
                    }
                    for sy in 0..scale {
                        for sx in 0..scale {
                            let x = gx + col * scale + sx;
                            let y = origin.1 + row as i32 * scale + sy;
                            if x >= 0 && y >= 0 && x < width && y < height {
                                image.put_pixel(x as u32, y as u32, color);
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Title-case a tag: the first letter of every alphabetic run is upper-cased,
/// the rest lower-cased.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}

/// Draw a bottom-centered title, plus an optional subtitle under it.
///
/// Each line gets a black drop shadow first (offset 2px for the title, 1px
/// for the subtitle), then the foreground pass.
pub fn overlay_title(
    image: &mut RgbImage,
    renderer: &dyn TextRenderer,
    title: &str,
    subtitle: Option<&str>,
) {
    let width = image.width() as i32;
    let height = image.height() as i32;

    let (title_w, title_h) = renderer.measure(title, FontSize::Large);
    let x = (width - title_w as i32) / 2;
    let y = height - title_h as i32 - TITLE_BOTTOM_MARGIN;

    renderer.draw(image, (x + 2, y + 2), title, FontSize::Large, SHADOW);
    renderer.draw(image, (x, y), title, FontSize::Large, TITLE_COLOR);

    if let Some(subtitle) = subtitle {
        let (sub_w, _) = renderer.measure(subtitle, FontSize::Small);
        let sx = (width - sub_w as i32) / 2;
        let sy = y + title_h as i32 + SUBTITLE_GAP;
        renderer.draw(image, (sx + 1, sy + 1), subtitle, FontSize::Small, SHADOW);
        renderer.draw(image, (sx, sy), subtitle, FontSize::Small, SUBTITLE_COLOR);
    }
}

/// Row bitmaps for a character, most significant of the low five bits on the left.
fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}
