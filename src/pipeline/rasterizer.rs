use glam::{IVec2, Vec2};

/// Clips the segment to the rectangle `[0, max.x] x [0, max.y]` (Liang-Barsky).
/// Returns `None` when nothing of it is inside, or an endpoint is not finite.
pub fn clip_line(start: Vec2, end: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }

    let d = end - start;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    // (p, q) per boundary: left, right, top, bottom
    let edges = [
        (-d.x, start.x),
        (d.x, max.x - start.x),
        (-d.y, start.y),
        (d.y, max.y - start.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }

    Some((start + d * t0, start + d * t1))
}

/// Walks the integer pixels from `start` to `end`, both inclusive.
pub fn bresenham<F>(start: IVec2, end: IVec2, mut plot: F)
where
    F: FnMut(IVec2),
{
    let (mut x0, mut y0) = (start.x, start.y);
    let (x1, y1) = (end.x, end.y);

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(IVec2::new(x0, y0));

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
