//! Shape rasterization primitives.
//!
//! Each function walks the integer pixel coordinates covered by a shape and
//! hands them to a `plot` callback. Coordinates are not clipped here; the
//! caller decides what to do with pixels that fall outside its canvas.

/// Rasterize a line using Bresenham's line algorithm.
///
/// # Examples
///
/// ```
/// use conceptforge::shapes::rasterize_line;
///
/// let mut pixels = Vec::new();
/// rasterize_line((0, 0), (3, 3), |x, y| pixels.push((x, y)));
/// assert_eq!(pixels, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
/// ```
pub fn rasterize_line(p0: (i32, i32), p1: (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = p0;
    let (x1, y1) = p1;

    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x0, y0);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Rasterize a filled rectangle given two inclusive corners.
///
/// Corners may be given in any order.
///
/// # Examples
///
/// ```
/// use conceptforge::shapes::rasterize_rect;
///
/// let mut count = 0;
/// rasterize_rect((0, 0), (2, 1), |_, _| count += 1);
/// assert_eq!(count, 6);
/// ```
pub fn rasterize_rect(p0: (i32, i32), p1: (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let (x0, x1) = (p0.0.min(p1.0), p0.0.max(p1.0));
    let (y0, y1) = (p0.1.min(p1.1), p0.1.max(p1.1));

    for y in y0..=y1 {
        for x in x0..=x1 {
            plot(x, y);
        }
    }
}

/// Rasterize a filled ellipse inscribed in an inclusive bounding box.
///
/// A pixel is covered when its center lies inside the ellipse that exactly
/// fits the box `[x0, x1 + 1) x [y0, y1 + 1)`.
///
/// # Examples
///
/// ```
/// use conceptforge::shapes::rasterize_ellipse;
///
/// let mut pixels = Vec::new();
/// rasterize_ellipse((0, 0), (10, 10), |x, y| pixels.push((x, y)));
/// assert!(pixels.contains(&(5, 5)));
/// assert!(!pixels.contains(&(0, 0)));
/// ```
pub fn rasterize_ellipse(p0: (i32, i32), p1: (i32, i32), mut plot: impl FnMut(i32, i32)) {
    let (x0, x1) = (p0.0.min(p1.0), p0.0.max(p1.0));
    let (y0, y1) = (p0.1.min(p1.1), p0.1.max(p1.1));

    let cx = (x0 as f64 + x1 as f64 + 1.0) / 2.0;
    let cy = (y0 as f64 + y1 as f64 + 1.0) / 2.0;
    let rx = (x1 - x0 + 1) as f64 / 2.0;
    let ry = (y1 - y0 + 1) as f64 / 2.0;

    for y in y0..=y1 {
        let t = (y as f64 + 0.5 - cy) / ry;
        let k = 1.0 - t * t;
        if k < 0.0 {
            continue;
        }
        let half = rx * k.sqrt();
        let start = (cx - half - 0.5).ceil() as i32;
        let end = (cx + half - 0.5).floor() as i32;
        for x in start.max(x0)..=end.min(x1) {
            plot(x, y);
        }
    }
}

/// Rasterize a filled polygon using a scanline fill.
///
/// Interior spans follow the even-odd rule with half-open edges, and the
/// outline is traced with Bresenham lines so boundary pixels are always
/// covered. Fewer than three vertices degrade to the outline alone.
///
/// # Examples
///
/// ```
/// use conceptforge::shapes::rasterize_polygon;
///
/// let mut pixels = std::collections::HashSet::new();
/// rasterize_polygon(&[(0, 0), (3, 0), (3, 3), (0, 3)], |x, y| {
///     pixels.insert((x, y));
/// });
/// assert_eq!(pixels.len(), 16);
/// ```
pub fn rasterize_polygon(vertices: &[(i32, i32)], mut plot: impl FnMut(i32, i32)) {
    if vertices.is_empty() {
        return;
    }

    if vertices.len() >= 3 {
        let min_y = vertices.iter().map(|(_, y)| *y).min().unwrap_or(0);
        let max_y = vertices.iter().map(|(_, y)| *y).max().unwrap_or(0);
        let mut intersections: Vec<f64> = Vec::with_capacity(vertices.len());

        for y in min_y..=max_y {
            intersections.clear();

            for i in 0..vertices.len() {
                let j = (i + 1) % vertices.len();
                let (x1, y1) = vertices[i];
                let (x2, y2) = vertices[j];

                if y1 == y2 {
                    continue;
                }

                // Half-open so shared vertices are counted once
                let (y_min, y_max) = (y1.min(y2), y1.max(y2));
                if y >= y_min && y < y_max {
                    let t = (y - y1) as f64 / (y2 - y1) as f64;
                    intersections.push(x1 as f64 + t * (x2 - x1) as f64);
                }
            }

            intersections.sort_by(|a, b| a.total_cmp(b));

            for pair in intersections.chunks(2) {
                if let [start, end] = pair {
                    for x in start.ceil() as i32..=end.floor() as i32 {
                        plot(x, y);
                    }
                }
            }
        }
    }

    for i in 0..vertices.len() {
        let j = (i + 1) % vertices.len();
        rasterize_line(vertices[i], vertices[j], &mut plot);
    }
}

/// Rasterize a polyline with a square pen of the given width.
///
/// Width 1 is a plain Bresenham line; wider pens stamp a `width x width`
/// square centered on each line pixel.
pub fn rasterize_thick_line(points: &[(i32, i32)], width: u32, mut plot: impl FnMut(i32, i32)) {
    let width = width.max(1) as i32;
    let lo = -(width - 1) / 2;
    let hi = width / 2;

    let mut stamp = |x: i32, y: i32| {
        for dy in lo..=hi {
            for dx in lo..=hi {
                plot(x + dx, y + dy);
            }
        }
    };

    match points {
        [] => {}
        [only] => stamp(only.0, only.1),
        _ => {
            for segment in points.windows(2) {
                rasterize_line(segment[0], segment[1], &mut stamp);
            }
        }
    }
}
