//! Character concept art: a stylized figure with armor, a weapon and
//! scattered accent sparkles.
//!
//! Offsets are relative to the canvas center. Draws, in order:
//!
//! | # | Bucket | Used for |
//! |---|--------|----------|
//! | 1 | primary | body |
//! | 2 | primary | head |
//! | 3 | accent | both eyes |
//! | 4 | secondary | both shoulder pads and the belt |
//! | 5 | secondary | weapon |
//! | 6 | accent | staff crystal (staff only) |
//! | … | 15 × (x, y, accent, size) | decoration dots |

use super::offset;
use crate::draw::{BBox, DrawContext, Shape};
use crate::palettes::{Bucket, Palette};
use crate::rng::DrawRng;
use image::Rgb;

const BODY: BBox = [-25, -40, 25, 40];
const HEAD: BBox = [-20, -80, 20, -40];
const LEFT_EYE: BBox = [-8, -65, -2, -55];
const RIGHT_EYE: BBox = [2, -65, 8, -55];
const LEFT_SHOULDER: BBox = [-35, -30, -15, -10];
const RIGHT_SHOULDER: BBox = [15, -30, 35, -10];
const BELT: BBox = [-20, 10, 20, 20];

const STAFF_SHAFT: BBox = [-2, -100, 2, 50];
const STAFF_CRYSTAL: BBox = [-8, -110, 8, -90];
const SWORD_BLADE: BBox = [-3, -90, 3, 30];
const SWORD_CROSSGUARD: BBox = [-15, 25, 15, 35];

const DECORATION_COUNT: usize = 15;

/// Weapon carried by a character, picked from the style tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacterWeapon {
    Staff,
    Sword,
}

impl CharacterWeapon {
    /// Spellcasters ("wizard", "mage") carry a staff; everyone else a sword.
    pub fn for_style(style: &str) -> CharacterWeapon {
        let style = style.to_lowercase();
        if style.contains("wizard") || style.contains("mage") {
            CharacterWeapon::Staff
        } else {
            CharacterWeapon::Sword
        }
    }
}

/// Draw a character described by `style` onto the canvas.
pub fn render_character(ctx: &mut DrawContext, palette: &Palette, style: &str, rng: &mut DrawRng) {
    let center = ctx.center();

    let body_color = rng.draw_color(palette, Bucket::Primary);
    ctx.ellipse(offset(center, BODY), body_color);

    let head_color = rng.draw_color(palette, Bucket::Primary);
    ctx.ellipse(offset(center, HEAD), head_color);

    let eye_color = rng.draw_color(palette, Bucket::Accent);
    let armor_color = rng.draw_color(palette, Bucket::Secondary);
    for shape in &trim(center, eye_color, armor_color) {
        ctx.paint(shape);
    }

    let weapon_color = rng.draw_color(palette, Bucket::Secondary);
    match CharacterWeapon::for_style(style) {
        CharacterWeapon::Staff => {
            ctx.rectangle(offset(center, STAFF_SHAFT), weapon_color);
            let crystal_color = rng.draw_color(palette, Bucket::Accent);
            ctx.ellipse(offset(center, STAFF_CRYSTAL), crystal_color);
        }
        CharacterWeapon::Sword => {
            ctx.rectangle(offset(center, SWORD_BLADE), weapon_color);
            ctx.rectangle(offset(center, SWORD_CROSSGUARD), weapon_color);
        }
    }

    let (width, height) = (ctx.width() as i32, ctx.height() as i32);
    for _ in 0..DECORATION_COUNT {
        let x = rng.draw_int(0, width);
        let y = rng.draw_int(0, height);
        let color = rng.draw_color(palette, Bucket::Accent);
        let size = rng.draw_int(2, 6);
        ctx.ellipse([x, y, x + size, y + size], color);
    }
}

/// Eyes, shoulder pads and belt, in paint order.
fn trim(center: (i32, i32), eyes: Rgb<u8>, armor: Rgb<u8>) -> [Shape; 5] {
    [
        Shape::Ellipse { bbox: offset(center, LEFT_EYE), color: eyes },
        Shape::Ellipse { bbox: offset(center, RIGHT_EYE), color: eyes },
        Shape::Ellipse { bbox: offset(center, LEFT_SHOULDER), color: armor },
        Shape::Ellipse { bbox: offset(center, RIGHT_SHOULDER), color: armor },
        Shape::Rectangle { bbox: offset(center, BELT), color: armor },
    ]
}
