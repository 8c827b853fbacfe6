//! Weapon concept art.
//!
//! Every weapon part draws its own color. Handles and shafts use the darker
//! tail of the primary bucket. The assembly is followed by ten accent glow
//! dots within 50px of the center, each drawing `(x, y, size, color)`.

use super::offset;
use crate::draw::{BBox, DrawContext};
use crate::palettes::{Bucket, Palette};
use crate::rng::DrawRng;

const GLOW_COUNT: usize = 10;
const GLOW_SPREAD: i32 = 50;

/// Weapon kinds the renderer knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeaponKind {
    Sword,
    Axe,
    Bow,
    Staff,
    Dagger,
}

impl WeaponKind {
    /// Case-insensitive exact match; anything unrecognized is a dagger.
    pub fn classify(tag: &str) -> WeaponKind {
        match tag.to_lowercase().as_str() {
            "sword" => WeaponKind::Sword,
            "axe" => WeaponKind::Axe,
            "bow" => WeaponKind::Bow,
            "staff" => WeaponKind::Staff,
            _ => WeaponKind::Dagger,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::Sword => "sword",
            WeaponKind::Axe => "axe",
            WeaponKind::Bow => "bow",
            WeaponKind::Staff => "staff",
            WeaponKind::Dagger => "dagger",
        }
    }
}

/// Draw the weapon named by `tag` onto the canvas.
pub fn render_weapon(ctx: &mut DrawContext, palette: &Palette, tag: &str, rng: &mut DrawRng) {
    let kind = WeaponKind::classify(tag);
    match kind {
        WeaponKind::Sword => draw_sword(ctx, palette, rng),
        WeaponKind::Axe => draw_axe(ctx, palette, rng),
        WeaponKind::Bow => draw_bow(ctx, palette, rng),
        WeaponKind::Staff => draw_staff(ctx, palette, rng),
        WeaponKind::Dagger => draw_dagger(ctx, palette, rng),
    }
    draw_glow(ctx, palette, rng);
}

fn draw_sword(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let c = ctx.center();

    let blade = rng.draw_color(palette, Bucket::Primary);
    ctx.rectangle(offset(c, [-4, -80, 4, 20]), blade);

    let guard = rng.draw_color(palette, Bucket::Secondary);
    ctx.rectangle(offset(c, [-25, 15, 25, 25]), guard);

    let handle = rng.choose(palette.primary_tail());
    ctx.rectangle(offset(c, [-3, 25, 3, 60]), handle);

    let pommel = rng.draw_color(palette, Bucket::Accent);
    ctx.ellipse(offset(c, [-6, 55, 6, 65]), pommel);
}

fn draw_axe(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (cx, cy) = ctx.center();

    let handle = rng.choose(palette.primary_tail());
    ctx.rectangle(offset((cx, cy), [-3, 20, 3, 80]), handle);

    let blade = rng.draw_color(palette, Bucket::Secondary);
    let head = [(cx - 30, cy - 20), (cx + 30, cy - 20), (cx + 20, cy + 20), (cx - 20, cy + 20)];
    ctx.polygon(&head, blade);

    let edge = rng.draw_color(palette, Bucket::Accent);
    ctx.rectangle(offset((cx, cy), [-25, -15, 25, -5]), edge);
}

fn draw_bow(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (cx, cy) = ctx.center();

    // 21 strokes fanning from the left limb to a parabolic right edge
    let bow = rng.draw_color(palette, Bucket::Primary);
    for i in (-20..=20).step_by(2) {
        let y = cy + (i * i) / 100;
        ctx.line(&[(cx - 40, cy + i), (cx + 40, y)], bow, 3);
    }

    let string = rng.draw_color(palette, Bucket::Secondary);
    ctx.line(&[(cx - 35, cy), (cx + 35, cy)], string, 2);
}

fn draw_staff(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let c = ctx.center();

    let shaft = rng.choose(palette.primary_tail());
    ctx.rectangle(offset(c, [-4, -100, 4, 80]), shaft);

    let orb = rng.draw_color(palette, Bucket::Accent);
    ctx.ellipse(offset(c, [-15, -110, 15, -80]), orb);

    let ring = rng.draw_color(palette, Bucket::Secondary);
    for dy in [-40, -10, 20] {
        ctx.ellipse(offset(c, [-8, dy - 3, 8, dy + 3]), ring);
    }
}

fn draw_dagger(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let c = ctx.center();

    let blade = rng.draw_color(palette, Bucket::Primary);
    ctx.rectangle(offset(c, [-2, -60, 2, 20]), blade);

    let guard = rng.draw_color(palette, Bucket::Secondary);
    ctx.rectangle(offset(c, [-12, 15, 12, 25]), guard);

    let handle = rng.choose(palette.primary_tail());
    ctx.rectangle(offset(c, [-2, 25, 2, 50]), handle);
}

fn draw_glow(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (cx, cy) = ctx.center();
    for _ in 0..GLOW_COUNT {
        let x = rng.draw_int(cx - GLOW_SPREAD, cx + GLOW_SPREAD);
        let y = rng.draw_int(cy - GLOW_SPREAD, cy + GLOW_SPREAD);
        let size = rng.draw_int(1, 3);
        let color = rng.draw_color(palette, Bucket::Accent);
        let dot: BBox = [x, y, x + size, y + size];
        ctx.ellipse(dot, color);
    }
}
