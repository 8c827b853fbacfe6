//! Environment concept art: opaque landscape scenes.
//!
//! Scenes are drawn straight onto an opaque canvas; there is no separate
//! background pass. Positions use integer fractions of the canvas size.

use crate::draw::DrawContext;
use crate::palettes::{Bucket, Palette, Theme};
use crate::postprocess::lerp_color;
use crate::rng::DrawRng;
use image::Rgb;

const SKY: Rgb<u8> = Rgb([135, 206, 235]);
const SKY_HORIZON: Rgb<u8> = Rgb([70, 130, 180]);
const SNOW: Rgb<u8> = Rgb([255, 255, 255]);
const LIT_WINDOW: Rgb<u8> = Rgb([255, 255, 0]);

const TREE_COUNT: usize = 6;
const DUNE_BANDS: i32 = 4;
const DUNE_STEP: usize = 80;
const CACTUS_COUNT: usize = 4;
const STALACTITE_COUNT: usize = 8;
const CRYSTAL_COUNT: usize = 5;

/// Landscape kinds. Anything unrecognized is a cave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnvironmentKind {
    Forest,
    Mountain,
    Castle,
    Desert,
    Cave,
}

impl EnvironmentKind {
    /// Case-insensitive exact match.
    pub fn classify(tag: &str) -> EnvironmentKind {
        match tag.to_lowercase().as_str() {
            "forest" => EnvironmentKind::Forest,
            "mountain" => EnvironmentKind::Mountain,
            "castle" => EnvironmentKind::Castle,
            "desert" => EnvironmentKind::Desert,
            _ => EnvironmentKind::Cave,
        }
    }

    /// Palette theme used for each landscape.
    pub fn theme(&self) -> Theme {
        match self {
            EnvironmentKind::Forest | EnvironmentKind::Mountain => Theme::Elf,
            EnvironmentKind::Castle => Theme::Warrior,
            EnvironmentKind::Desert => Theme::Dwarf,
            EnvironmentKind::Cave => Theme::Rogue,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnvironmentKind::Forest => "forest",
            EnvironmentKind::Mountain => "mountain",
            EnvironmentKind::Castle => "castle",
            EnvironmentKind::Desert => "desert",
            EnvironmentKind::Cave => "cave",
        }
    }
}

/// Draw the landscape named by `tag` onto the canvas.
pub fn render_environment(ctx: &mut DrawContext, palette: &Palette, tag: &str, rng: &mut DrawRng) {
    match EnvironmentKind::classify(tag) {
        EnvironmentKind::Forest => draw_forest(ctx, palette, rng),
        EnvironmentKind::Mountain => draw_mountain(ctx, palette, rng),
        EnvironmentKind::Castle => draw_castle(ctx, palette, rng),
        EnvironmentKind::Desert => draw_desert(ctx, palette, rng),
        EnvironmentKind::Cave => draw_cave(ctx, palette, rng),
    }
}

fn draw_forest(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (w, h) = (ctx.width() as i32, ctx.height() as i32);
    let half = h / 2;

    // Sky: one scanline per row, fading toward the horizon
    for y in 0..half {
        let color = lerp_color(SKY, SKY_HORIZON, y as f64 / half as f64);
        ctx.line(&[(0, y), (w, y)], color, 1);
    }

    let ground = rng.draw_color(palette, Bucket::Primary);
    ctx.rectangle([0, half, w, h], ground);

    for _ in 0..TREE_COUNT {
        let x = rng.draw_int(50, w - 50);
        let trunk_height = rng.draw_int(60, 100);
        let trunk = rng.draw_color(palette, Bucket::Secondary);
        ctx.rectangle([x - 8, h - trunk_height, x + 8, h], trunk);
        let leaves = rng.choose(palette.primary_head());
        ctx.ellipse([x - 25, h - trunk_height - 50, x + 25, h - trunk_height], leaves);
    }
}

fn draw_mountain(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (w, h) = (ctx.width() as i32, ctx.height() as i32);

    ctx.rectangle([0, 0, w, h / 2], SKY);

    let rock = rng.draw_color(palette, Bucket::Primary);
    let ridges = [
        [(-50, h / 2), (w / 3, h / 3), (w / 2, h / 2)],
        [(w / 2, h / 2), (2 * w / 3, h / 4), (w + 50, h / 2)],
        [(2 * w / 3, h / 2), (w, h / 5), (w + 50, h / 2)],
    ];
    for ridge in &ridges {
        ctx.polygon(ridge, rock);
    }

    ctx.ellipse([w / 3 - 40, h / 3 - 15, w / 3 + 40, h / 3 + 15], SNOW);
    ctx.ellipse([2 * w / 3 - 35, h / 5 - 12, 2 * w / 3 + 35, h / 5 + 12], SNOW);
}

fn draw_castle(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (w, h) = (ctx.width() as i32, ctx.height() as i32);

    ctx.rectangle([0, 0, w, h], SKY);

    let wall = rng.draw_color(palette, Bucket::Primary);
    ctx.rectangle([w / 4, h / 2, 3 * w / 4, h], wall);

    let towers = [w / 4, w / 2, 3 * w / 4];
    for &pos in &towers {
        let body = rng.draw_color(palette, Bucket::Secondary);
        ctx.rectangle([pos - 25, h / 3, pos + 25, h], body);
        let roof = rng.draw_color(palette, Bucket::Accent);
        let trapezoid = [(pos - 30, h / 3), (pos + 30, h / 3), (pos + 20, h / 4), (pos - 20, h / 4)];
        ctx.polygon(&trapezoid, roof);
    }

    for &pos in &towers {
        for y in (h / 2..h - 40).step_by(50) {
            ctx.rectangle([pos - 10, y, pos + 10, y + 25], LIT_WINDOW);
        }
    }
}

fn draw_desert(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (w, h) = (ctx.width() as i32, ctx.height() as i32);

    ctx.rectangle([0, 0, w, h / 3], SKY);

    let sand = rng.draw_color(palette, Bucket::Primary);
    for band in 0..DUNE_BANDS {
        let baseline = h / 3 + band * 60;
        let points: Vec<(i32, i32)> = (0..w + 100)
            .step_by(DUNE_STEP)
            .map(|x| (x, baseline + rng.draw_int(-40, 40)))
            .collect();
        if points.len() > 2 {
            ctx.polygon(&points, sand);
        }
    }

    let cactus = rng.draw_color(palette, Bucket::Secondary);
    for _ in 0..CACTUS_COUNT {
        let x = rng.draw_int(100, w - 100);
        ctx.rectangle([x - 4, h - 80, x + 4, h - 30], cactus);
        ctx.rectangle([x - 12, h - 60, x - 4, h - 50], cactus);
        ctx.rectangle([x + 4, h - 65, x + 12, h - 55], cactus);
    }
}

fn draw_cave(ctx: &mut DrawContext, palette: &Palette, rng: &mut DrawRng) {
    let (w, h) = (ctx.width() as i32, ctx.height() as i32);

    let wall = rng.draw_color(palette, Bucket::Primary);
    ctx.rectangle([0, 0, w, h], wall);

    let rock = rng.draw_color(palette, Bucket::Secondary);
    for _ in 0..STALACTITE_COUNT {
        let x = rng.draw_int(50, w - 50);
        let length = rng.draw_int(30, 80);
        ctx.polygon(&[(x - 5, 0), (x + 5, 0), (x, length)], rock);
        ctx.polygon(&[(x - 5, h), (x + 5, h), (x, h - length)], rock);
    }

    let crystal = rng.draw_color(palette, Bucket::Accent);
    for _ in 0..CRYSTAL_COUNT {
        let x = rng.draw_int(100, w - 100);
        let y = rng.draw_int(100, h - 100);
        let size = rng.draw_int(10, 25);
        let diamond = [(x, y - size), (x + size / 2, y), (x, y + size), (x - size / 2, y)];
        ctx.polygon(&diamond, crystal);
    }
}
