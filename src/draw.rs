//! Drawing onto an owned RGBA canvas.
//!
//! `DrawContext` wraps a canvas and paints `Shape` instructions onto it.
//! Later paints overwrite earlier ones; there is no blending at this stage.

use crate::shapes::{rasterize_ellipse, rasterize_polygon, rasterize_rect, rasterize_thick_line};
use image::{Rgb, Rgba, RgbaImage};

/// Inclusive bounding box `[x0, y0, x1, y1]`.
pub type BBox = [i32; 4];

/// A drawing instruction. The character renderer paints its trim from a list of these.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Ellipse { bbox: BBox, color: Rgb<u8> },
    Rectangle { bbox: BBox, color: Rgb<u8> },
    Polygon { points: Vec<(i32, i32)>, color: Rgb<u8> },
    Line { points: Vec<(i32, i32)>, color: Rgb<u8>, width: u32 },
}

/// Rasterization context over a canvas it exclusively owns.
#[derive(Debug, Clone)]
pub struct DrawContext {
    canvas: RgbaImage,
}

impl DrawContext {
    /// Fully transparent canvas, for layers that get composited later.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self { canvas: RgbaImage::new(width, height) }
    }

    /// Opaque canvas filled with one color.
    pub fn filled(width: u32, height: u32, color: Rgb<u8>) -> Self {
        Self { canvas: RgbaImage::from_pixel(width, height, opaque(color)) }
    }

    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Canvas center, rounded down.
    pub fn center(&self) -> (i32, i32) {
        ((self.width() / 2) as i32, (self.height() / 2) as i32)
    }

    pub fn canvas(&self) -> &RgbaImage {
        &self.canvas
    }

    /// Hand the finished canvas to the next stage.
    pub fn into_canvas(self) -> RgbaImage {
        self.canvas
    }

    pub fn ellipse(&mut self, bbox: BBox, color: Rgb<u8>) {
        let px = opaque(color);
        let canvas = &mut self.canvas;
        rasterize_ellipse((bbox[0], bbox[1]), (bbox[2], bbox[3]), |x, y| put(canvas, x, y, px));
    }

    pub fn rectangle(&mut self, bbox: BBox, color: Rgb<u8>) {
        let px = opaque(color);
        let (w, h) = (self.width() as i32, self.height() as i32);
        // Clip up front; full-canvas fills are common
        let x0 = bbox[0].min(bbox[2]).max(0);
        let x1 = bbox[0].max(bbox[2]).min(w - 1);
        let y0 = bbox[1].min(bbox[3]).max(0);
        let y1 = bbox[1].max(bbox[3]).min(h - 1);
        if x0 > x1 || y0 > y1 {
            return;
        }
        let canvas = &mut self.canvas;
        rasterize_rect((x0, y0), (x1, y1), |x, y| put(canvas, x, y, px));
    }

    pub fn polygon(&mut self, points: &[(i32, i32)], color: Rgb<u8>) {
        let px = opaque(color);
        let canvas = &mut self.canvas;
        rasterize_polygon(points, |x, y| put(canvas, x, y, px));
    }

    pub fn line(&mut self, points: &[(i32, i32)], color: Rgb<u8>, width: u32) {
        let px = opaque(color);
        let canvas = &mut self.canvas;
        rasterize_thick_line(points, width, |x, y| put(canvas, x, y, px));
    }

    /// Paint one instruction.
    pub fn paint(&mut self, shape: &Shape) {
        match shape {
            Shape::Ellipse { bbox, color } => self.ellipse(*bbox, *color),
            Shape::Rectangle { bbox, color } => self.rectangle(*bbox, *color),
            Shape::Polygon { points, color } => self.polygon(points, *color),
            Shape::Line { points, color, width } => self.line(points, *color, *width),
        }
    }
}

fn opaque(color: Rgb<u8>) -> Rgba<u8> {
    Rgba([color[0], color[1], color[2], 255])
}

/// Write a pixel, ignoring coordinates outside the canvas.
fn put(canvas: &mut RgbaImage, x: i32, y: i32, px: Rgba<u8>) {
    if x >= 0 && y >= 0 && (x as u32) < canvas.width() && (y as u32) < canvas.height() {
        canvas.put_pixel(x as u32, y as u32, px);
    }
}
